//! Host-side event sources.
//!
//! The embedding environment owns one [`PageHost`] and forwards its native
//! events into it. Everything the page mounts subscribes here.

use std::time::Duration;

use vitrine_motion::{
    IntersectionEntry, ObserverSupport, PointerSample, ScrollSample, Signal, Ticker, TickerConfig,
};

/// Input signals plus the frame source.
#[derive(Debug, Clone)]
pub struct PageHost {
    /// Pointer-move events.
    pub pointer: Signal<PointerSample>,
    /// Scroll and resize events.
    pub scroll: Signal<ScrollSample>,
    /// Intersection notifications.
    pub intersections: Signal<IntersectionEntry>,
    /// Frame source.
    pub ticker: Ticker,
    /// Whether `intersections` will ever fire.
    pub observer_support: ObserverSupport,
    viewport_height: f32,
}

impl PageHost {
    /// Creates a host with a native intersection observer.
    #[must_use]
    pub fn new(ticker: &TickerConfig, viewport_height: f32) -> Self {
        Self {
            pointer: Signal::new(),
            scroll: Signal::new(),
            intersections: Signal::new(),
            ticker: Ticker::from_config(ticker),
            observer_support: ObserverSupport::Native,
            viewport_height,
        }
    }

    /// Same host without intersection notifications.
    #[must_use]
    pub fn without_observer(mut self) -> Self {
        self.observer_support = ObserverSupport::Unavailable;
        self
    }

    /// Last reported viewport height.
    #[must_use]
    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Forwards a pointer move.
    pub fn pointer_move(&self, x: f32, y: f32, timestamp_ms: i64) {
        self.pointer.emit(&PointerSample::new(x, y, timestamp_ms));
    }

    /// Forwards a scroll offset at the current viewport height.
    pub fn scroll_to(&self, scroll_y: f32) {
        self.scroll.emit(&ScrollSample::new(scroll_y, self.viewport_height));
    }

    /// Forwards a resize at the given scroll offset.
    pub fn resize(&mut self, scroll_y: f32, viewport_height: f32) {
        self.viewport_height = viewport_height;
        self.scroll_to(scroll_y);
    }

    /// Forwards an intersection notification.
    pub fn intersect(&self, entry: IntersectionEntry) {
        self.intersections.emit(&entry);
    }

    /// Forwards one host frame; returns the fixed steps executed.
    pub fn frame(&self, elapsed: Duration) -> u32 {
        self.ticker.advance(elapsed)
    }
}
