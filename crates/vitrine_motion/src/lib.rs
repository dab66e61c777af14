//! # VITRINE Motion
//!
//! The interaction layer behind the VITRINE landing page: four independent
//! primitives that turn host input into values a renderer binds to
//! transforms.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         MOTION PIPELINE                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  Host events ──> Signal<T> ──> Primitive ──> Signal<U> ──> View  │
//! │                                    ↑                             │
//! │  Host frames ──> Ticker::advance ──┘ (only while scheduled)      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Primitive                       | Input             | Output            |
//! |---------------------------------|-------------------|-------------------|
//! | [`PointerFollower`]             | `PointerSample`   | raw + damped xy   |
//! | [`ScrollProgressMapper`]        | `ScrollSample`    | progress `[0, 1]` |
//! | [`ViewportRevealTrigger`]       | `IntersectionEntry` | one-shot reveal |
//! | [`DirectionalScrollController`] | `ScrollSample`    | nav visibility    |
//!
//! ## Design Principles
//!
//! 1. **No shared state** - each primitive owns its state; composition is by
//!    attaching independent primitives to independent sources
//! 2. **Owned registrations** - every subscription is a handle; dropping it
//!    unsubscribes
//! 3. **Idle is free** - frame work is scheduled only while a value is moving
//!    and someone observes it
//! 4. **No errors on the hot path** - malformed geometry degrades to safe
//!    values; only configuration loading is fallible
//!
//! ## Example
//!
//! ```rust,ignore
//! use vitrine_motion::{EventDriven, PointerFollower, PointerSample, Signal, SpringConfig, Ticker};
//!
//! let ticker = Ticker::default();
//! let pointer_moves = Signal::<PointerSample>::new();
//!
//! let mut cursor = PointerFollower::new(SpringConfig::default(), ticker.clone());
//! cursor.start(&pointer_moves);
//! let _ring = cursor.subscribe(|p| draw_ring(p.filtered));
//!
//! pointer_moves.emit(&PointerSample::new(100.0, 100.0, 0));
//! ticker.advance(frame_time);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod keyframes;
pub mod nav;
pub mod pointer;
pub mod reveal;
pub mod scroll;
pub mod signal;
pub mod spring;
pub mod ticker;
pub mod tween;

pub use config::{MotionConfig, NavConfig, RevealConfig, SpringConfig, TickerConfig};
pub use easing::Easing;
pub use error::{MotionError, MotionResult};
pub use geometry::{Rect, Vec2};
pub use keyframes::{Keyframes, Repeat};
pub use nav::{DirectionalScrollController, NavVisibility, ScrollDirectionState};
pub use pointer::{CursorPosition, PointerFollower, PointerSample};
pub use reveal::{
    ElementId, IntersectionEntry, ObserveOutcome, ObserverSupport, RevealEvent, RevealOptions,
    RevealState, ViewportRevealTrigger,
};
pub use scroll::{
    map_range, ElementBounds, Length, LengthRange, Parallax, ScrollEdge, ScrollOffsets,
    ScrollProgressMapper, ScrollRegion, ScrollSample, Unit,
};
pub use signal::{EventDriven, Signal, Subscription};
pub use spring::DampedValue;
pub use ticker::{FrameTick, TickControl, TickHandle, TickStats, Ticker};
pub use tween::Tween;
