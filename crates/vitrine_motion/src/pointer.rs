//! # Pointer Follower
//!
//! Two views of one pointer:
//! - **raw**: the latest pointer-move coordinates, zero added latency
//!   (the cursor dot)
//! - **filtered**: a spring-damped trail of the raw position (the cursor ring)
//!
//! The follower only asks the [`Ticker`] for frames while somebody observes
//! it AND the spring is still moving. An idle cursor, or one nobody watches,
//! costs nothing.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::SpringConfig;
use crate::geometry::Vec2;
use crate::signal::{EventDriven, Signal, Subscription};
use crate::spring::DampedValue;
use crate::ticker::{FrameTick, TickControl, TickHandle, Ticker};

/// One raw pointer-move event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Client X coordinate.
    pub x: f32,
    /// Client Y coordinate.
    pub y: f32,
    /// Host event timestamp in milliseconds.
    pub timestamp_ms: i64,
}

impl PointerSample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

/// Published pointer state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorPosition {
    /// Latest raw position.
    pub raw: Vec2,
    /// Current damped position.
    pub filtered: Vec2,
}

struct FollowerState {
    spring: SpringConfig,
    x: DampedValue,
    y: DampedValue,
    last_sample: Option<PointerSample>,
    frame: Option<TickHandle>,
    halted: bool,
}

impl FollowerState {
    fn position(&self) -> CursorPosition {
        CursorPosition {
            raw: Vec2::new(self.x.raw, self.y.raw),
            filtered: Vec2::new(self.x.filtered, self.y.filtered),
        }
    }

    fn at_rest(&self) -> bool {
        self.x.is_at_rest(&self.spring) && self.y.is_at_rest(&self.spring)
    }

    fn step(&mut self, dt: f32) {
        self.x.step(&self.spring, dt);
        self.y.step(&self.spring, dt);
        if self.at_rest() {
            self.x.settle();
            self.y.settle();
        }
    }
}

/// Everything the event and frame callbacks share.
#[derive(Clone)]
struct FollowerCore {
    state: Arc<Mutex<FollowerState>>,
    changes: Signal<CursorPosition>,
    ticker: Ticker,
}

impl FollowerCore {
    fn ingest(&self, sample: PointerSample) {
        let position = {
            let mut state = self.state.lock();
            state.x.set_target(sample.x);
            state.y.set_target(sample.y);
            state.last_sample = Some(sample);
            state.position()
        };
        self.changes.emit(&position);
        self.wake();
    }

    /// Schedules frame work if it is wanted and not already scheduled.
    fn wake(&self) {
        let mut state = self.state.lock();
        if state.halted || state.frame.is_some() || state.at_rest() || !self.changes.is_observed() {
            return;
        }
        let core = self.clone();
        state.frame = Some(self.ticker.schedule(move |tick| core.on_frame(tick)));
        tracing::debug!("pointer follower animating");
    }

    fn on_frame(&self, tick: &FrameTick) -> TickControl {
        let (position, control, stale) = {
            let mut state = self.state.lock();
            if state.halted || !self.changes.is_observed() {
                (None, TickControl::Stop, state.frame.take())
            } else {
                state.step(tick.dt);
                if state.at_rest() {
                    (Some(state.position()), TickControl::Stop, state.frame.take())
                } else {
                    (Some(state.position()), TickControl::Continue, None)
                }
            }
        };
        drop(stale);
        if let Some(position) = position {
            self.changes.emit(&position);
        }
        if control == TickControl::Stop {
            tracing::debug!("pointer follower idle");
        }
        control
    }
}

/// Tracks a pointer and publishes its raw and spring-damped positions.
pub struct PointerFollower {
    core: FollowerCore,
    input: Option<Subscription>,
}

impl PointerFollower {
    /// Creates a follower at `(0, 0)` that draws frames from `ticker`.
    #[must_use]
    pub fn new(spring: SpringConfig, ticker: Ticker) -> Self {
        Self {
            core: FollowerCore {
                state: Arc::new(Mutex::new(FollowerState {
                    spring,
                    x: DampedValue::default(),
                    y: DampedValue::default(),
                    last_sample: None,
                    frame: None,
                    halted: false,
                })),
                changes: Signal::new(),
                ticker,
            },
            input: None,
        }
    }

    /// Ingests a raw pointer position.
    pub fn update(&self, x: f32, y: f32) {
        let timestamp_ms = self.core.state.lock().last_sample.map_or(0, |s| s.timestamp_ms);
        self.core.ingest(PointerSample::new(x, y, timestamp_ms));
    }

    /// Ingests a full pointer sample.
    pub fn update_sample(&self, sample: PointerSample) {
        self.core.ingest(sample);
    }

    /// Latest raw position; `(0, 0)` before the first update.
    #[must_use]
    pub fn raw(&self) -> Vec2 {
        self.core.state.lock().position().raw
    }

    /// Current damped position; `(0, 0)` before the first update.
    #[must_use]
    pub fn filtered(&self) -> Vec2 {
        self.core.state.lock().position().filtered
    }

    /// Raw and damped positions together.
    #[must_use]
    pub fn position(&self) -> CursorPosition {
        self.core.state.lock().position()
    }

    /// The most recent sample, if any.
    #[must_use]
    pub fn last_sample(&self) -> Option<PointerSample> {
        self.core.state.lock().last_sample
    }

    /// Per-axis filter state `(x, y)`.
    #[must_use]
    pub fn damped(&self) -> (DampedValue, DampedValue) {
        let state = self.core.state.lock();
        (state.x, state.y)
    }

    /// True while a frame client is scheduled.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.core.state.lock().frame.is_some()
    }

    /// Observes position changes; frames run while any observer exists.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&CursorPosition) + Send + 'static,
    {
        let subscription = self.core.changes.subscribe(callback);
        self.core.wake();
        subscription
    }
}

impl EventDriven for PointerFollower {
    type Input = PointerSample;

    fn start(&mut self, source: &Signal<PointerSample>) {
        if self.input.is_some() {
            return;
        }
        self.core.state.lock().halted = false;
        let core = self.core.clone();
        self.input = Some(source.subscribe(move |sample: &PointerSample| core.ingest(*sample)));
        self.core.wake();
        tracing::debug!("pointer follower started");
    }

    fn stop(&mut self) {
        let frame = {
            let mut state = self.core.state.lock();
            state.halted = true;
            state.frame.take()
        };
        drop(frame);
        if let Some(mut input) = self.input.take() {
            input.unsubscribe();
            tracing::debug!("pointer follower stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.input.is_some()
    }
}

impl Drop for PointerFollower {
    fn drop(&mut self) {
        self.stop();
    }
}
