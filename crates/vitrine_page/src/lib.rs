//! # VITRINE Page
//!
//! Wires the [`vitrine_motion`] primitives into the landing page of a
//! surgeon's practice: preloader curtain, auto-hiding navigation, cursor
//! dot and ring, parallax imagery, staggered text reveals, ambient loops,
//! copy-to-clipboard contact and the mobile menu.
//!
//! ## Frame Flow
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          PAGE PIPELINE                         │
//! ├───────────────────────────────────────────────────────────────┤
//! │  PageHost events ──> primitives ──> page state                │
//! │  PageHost::frame ──> Ticker ──> page clock + spring steps     │
//! │  LandingPage::frame ──> PageFrame ──> renderer                │
//! │  LandingPage::events ──> PageEvent (one-off) ──> host         │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use vitrine_page::{LandingConfig, LandingPage, MemoryClipboard, PageHost};
//!
//! let config = LandingConfig::from_toml_file("vitrine.toml")?;
//! let host = PageHost::new(&config.motion.ticker, 900.0);
//! let page = LandingPage::mount(&host, &config, Box::new(MemoryClipboard::default()))?;
//!
//! host.pointer_move(640.0, 360.0, 0);
//! host.frame(frame_time);
//! render(&page.frame());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ambient;
pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod host;
pub mod landing;
pub mod menu;
pub mod preloader;
pub mod smooth_scroll;
pub mod stagger;

pub use ambient::{AmbientScene, AmbientTrack, AmbientValue, Marquee};
pub use config::{LandingConfig, PageSettings};
pub use error::{PageError, PageResult};
pub use events::{EventBus, EventReceiver, EventSender, PageEvent};
pub use feedback::{Clipboard, CopyFeedback, MemoryClipboard};
pub use host::PageHost;
pub use landing::{LandingPage, ListItemFrame, PageFrame, PreloaderFrame, TextFrame};
pub use menu::{nav_links, slugify, MobileMenu, NavLink};
pub use preloader::{Preloader, PreloaderPhase};
pub use smooth_scroll::SmoothScroller;
pub use stagger::ListItemReveal;
