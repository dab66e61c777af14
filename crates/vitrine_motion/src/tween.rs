//! Time-based tweens.
//!
//! A [`Tween`] moves one value from a start to a target over a fixed
//! duration, optionally after a delay. Retargeting mid-flight restarts the
//! curve from wherever the value currently is, so nothing ever jumps.

use crate::easing::Easing;

/// A single animated value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    current: f32,
    target: f32,
    start: f32,
    /// Progress through the curve (0-1).
    progress: f32,
    /// Seconds.
    duration: f32,
    /// Seconds still to wait before progress advances.
    delay: f32,
    easing: Easing,
}

impl Tween {
    /// Default duration in seconds.
    pub const DEFAULT_DURATION: f32 = 0.5;

    /// Creates a tween resting at `value`.
    #[must_use]
    pub fn new(value: f32, easing: Easing) -> Self {
        Self {
            current: value,
            target: value,
            start: value,
            progress: 1.0,
            duration: Self::DEFAULT_DURATION,
            delay: 0.0,
            easing,
        }
    }

    /// Same tween with a custom duration in seconds.
    #[must_use]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Value being approached.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Progress through the curve (0-1).
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// True once the target is reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Starts moving toward `target` from the current value.
    ///
    /// Returns false when `target` is already the target.
    pub fn set_target(&mut self, target: f32) -> bool {
        self.set_target_after(target, 0.0)
    }

    /// Like [`Tween::set_target`], waiting `delay` seconds first.
    pub fn set_target_after(&mut self, target: f32, delay: f32) -> bool {
        if (target - self.target).abs() <= 0.0001 {
            return false;
        }
        self.start = self.current;
        self.target = target;
        self.progress = 0.0;
        self.delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        true
    }

    /// Jumps to `value` without animating.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.start = value;
        self.progress = 1.0;
        self.delay = 0.0;
    }

    /// Advances by `dt` seconds. Returns true while still running.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.progress >= 1.0 {
            return false;
        }
        if !(dt.is_finite() && dt > 0.0) {
            return true;
        }

        let mut dt = dt;
        if self.delay > 0.0 {
            if dt <= self.delay {
                self.delay -= dt;
                return true;
            }
            dt -= self.delay;
            self.delay = 0.0;
        }

        if self.duration > 0.0 {
            self.progress = (self.progress + dt / self.duration).min(1.0);
        } else {
            self.progress = 1.0;
        }

        if self.progress >= 1.0 {
            self.current = self.target;
            return false;
        }
        let eased = self.easing.apply(self.progress);
        self.current = self.start + (self.target - self.start) * eased;
        true
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new(0.0, Easing::EXPO_OUT)
    }
}
