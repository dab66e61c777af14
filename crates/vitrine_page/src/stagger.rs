//! Staggered list entries.
//!
//! Each entry slides in from the right while fading in, one stagger step
//! after the previous one. Position follows an under-damped spring, so it
//! overshoots slightly before settling; opacity follows a short ease.

use std::time::Duration;

use vitrine_motion::{DampedValue, Easing, ElementId, SpringConfig, Tween};

/// Horizontal start offset in pixels.
pub const ITEM_OFFSET_PX: f32 = 20.0;
/// Opacity fade duration in seconds.
pub const ITEM_FADE_S: f32 = 0.3;
/// Opacity fade curve.
pub const ITEM_FADE: Easing = Easing::bezier(0.25, 0.1, 0.35, 1.0);
/// Position spring.
pub const ITEM_SPRING: SpringConfig = SpringConfig {
    stiffness: 500.0,
    damping: 25.0,
    mass: 1.0,
    rest_delta: 0.01,
    rest_speed: 10.0,
};

/// Entrance state of one list entry.
#[derive(Debug, Clone)]
pub struct ListItemReveal {
    element: ElementId,
    x: DampedValue,
    opacity: Tween,
    wait: f32,
    revealed: bool,
}

impl ListItemReveal {
    /// Creates a hidden entry, offset and transparent.
    #[must_use]
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            x: DampedValue::at(ITEM_OFFSET_PX),
            opacity: Tween::new(0.0, ITEM_FADE).with_duration(ITEM_FADE_S),
            wait: 0.0,
            revealed: false,
        }
    }

    /// Element this entry belongs to.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// True once [`ListItemReveal::reveal`] ran.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Horizontal offset in pixels.
    #[must_use]
    pub fn x_px(&self) -> f32 {
        self.x.filtered
    }

    /// Current opacity (0-1).
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    /// True when revealed and both values have arrived.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.revealed
            && self.wait <= 0.0
            && self.x.is_at_rest(&ITEM_SPRING)
            && self.opacity.is_complete()
    }

    /// Starts the entrance after `delay`. Only the first call counts.
    pub fn reveal(&mut self, delay: Duration) {
        if self.revealed {
            return;
        }
        self.revealed = true;
        self.wait = delay.as_secs_f32();
        self.opacity.set_target_after(1.0, self.wait);
    }

    /// Advances by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.opacity.update(dt);
        if !self.revealed || !(dt.is_finite() && dt > 0.0) {
            return;
        }

        let mut dt = dt;
        if self.wait > 0.0 {
            if dt <= self.wait {
                self.wait -= dt;
                return;
            }
            dt -= self.wait;
            self.wait = 0.0;
        }

        self.x.set_target(0.0);
        if !self.x.is_at_rest(&ITEM_SPRING) {
            self.x.step(&ITEM_SPRING, dt);
            if self.x.is_at_rest(&ITEM_SPRING) {
                self.x.settle();
            }
        }
    }
}
