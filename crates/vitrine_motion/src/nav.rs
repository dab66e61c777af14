//! # Directional Scroll Hide
//!
//! Hides a fixed navigation bar while the reader scrolls down past a
//! threshold, and shows it again on any upward movement.
//!
//! ```text
//!            down AND y > threshold
//!   VISIBLE ────────────────────────> HIDDEN
//!      ^                                 │
//!      └──── up, still, or y <= threshold┘
//! ```
//!
//! There is no hysteresis band: a one-pixel upward scroll reveals the bar.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::NavConfig;
use crate::scroll::ScrollSample;
use crate::signal::{EventDriven, Signal, Subscription};

/// Direction tracker state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollDirectionState {
    /// Offset seen on the previous sample.
    pub last_scroll_y: f32,
    /// Current bar state.
    pub hidden: bool,
}

/// Bar visibility published on every flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavVisibility {
    /// Bar on screen.
    Visible,
    /// Bar slid out of view.
    Hidden,
}

impl NavVisibility {
    /// Maps the raw flag.
    #[must_use]
    pub const fn from_hidden(hidden: bool) -> Self {
        if hidden {
            Self::Hidden
        } else {
            Self::Visible
        }
    }

    /// True for [`NavVisibility::Hidden`].
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

#[derive(Clone)]
struct NavCore {
    state: Arc<Mutex<ScrollDirectionState>>,
    threshold_px: f32,
    changes: Signal<NavVisibility>,
}

impl NavCore {
    fn on_scroll(&self, scroll_y: f32) -> Option<NavVisibility> {
        let flipped = {
            let mut state = self.state.lock();
            let direction = scroll_y - state.last_scroll_y;
            let hidden = direction > 0.0 && scroll_y > self.threshold_px;
            state.last_scroll_y = scroll_y;
            if hidden == state.hidden {
                None
            } else {
                state.hidden = hidden;
                Some(NavVisibility::from_hidden(hidden))
            }
        };
        if let Some(visibility) = flipped {
            tracing::debug!(?visibility, scroll_y, "navigation visibility changed");
            self.changes.emit(&visibility);
        }
        flipped
    }
}

/// Scroll-direction driven navigation bar visibility.
pub struct DirectionalScrollController {
    core: NavCore,
    input: Option<Subscription>,
}

impl DirectionalScrollController {
    /// Default threshold in pixels.
    pub const DEFAULT_THRESHOLD_PX: f32 = 150.0;

    /// Creates a visible controller at offset 0.
    #[must_use]
    pub fn new(threshold_px: f32) -> Self {
        Self {
            core: NavCore {
                state: Arc::new(Mutex::new(ScrollDirectionState::default())),
                threshold_px,
                changes: Signal::new(),
            },
            input: None,
        }
    }

    /// Creates a controller from configuration.
    #[must_use]
    pub fn from_config(config: &NavConfig) -> Self {
        Self::new(config.threshold_px)
    }

    /// Feeds one scroll offset. Returns the new visibility when it flipped.
    pub fn on_scroll(&self, scroll_y: f32) -> Option<NavVisibility> {
        self.core.on_scroll(scroll_y)
    }

    /// True while the bar is hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.core.state.lock().hidden
    }

    /// Current visibility.
    #[must_use]
    pub fn visibility(&self) -> NavVisibility {
        NavVisibility::from_hidden(self.is_hidden())
    }

    /// Snapshot of the direction state.
    #[must_use]
    pub fn state(&self) -> ScrollDirectionState {
        *self.core.state.lock()
    }

    /// Configured threshold.
    #[must_use]
    pub fn threshold_px(&self) -> f32 {
        self.core.threshold_px
    }

    /// Observes visibility flips.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&NavVisibility) + Send + 'static,
    {
        self.core.changes.subscribe(callback)
    }
}

impl Default for DirectionalScrollController {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD_PX)
    }
}

impl EventDriven for DirectionalScrollController {
    type Input = ScrollSample;

    fn start(&mut self, source: &Signal<ScrollSample>) {
        if self.input.is_some() {
            return;
        }
        let core = self.core.clone();
        self.input = Some(source.subscribe(move |sample: &ScrollSample| {
            core.on_scroll(sample.scroll_y);
        }));
    }

    fn stop(&mut self) {
        if let Some(mut input) = self.input.take() {
            input.unsubscribe();
        }
    }

    fn is_running(&self) -> bool {
        self.input.is_some()
    }
}
