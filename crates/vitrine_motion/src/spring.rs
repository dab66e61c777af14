//! # Spring-Damped Values
//!
//! A second-order follower: `filtered` chases `raw` as if tied to it by a
//! spring with a dashpot.
//!
//! ```text
//! a = (stiffness * (raw - filtered) - damping * velocity) / mass
//! v += a * dt
//! x += v * dt          (semi-implicit Euler)
//! ```
//!
//! With the default `(150, 25, 0.5)` the damping ratio is ~1.44, so the
//! follower approaches without visible overshoot.

use crate::config::SpringConfig;

/// One spring-followed axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DampedValue {
    /// Latest target.
    pub raw: f32,
    /// Current damped position.
    pub filtered: f32,
    /// Current velocity of the damped position (units/second).
    pub velocity: f32,
}

impl DampedValue {
    /// Creates a value at rest at `value`.
    #[must_use]
    pub const fn at(value: f32) -> Self {
        Self {
            raw: value,
            filtered: value,
            velocity: 0.0,
        }
    }

    /// Sets a new target; the damped position is left where it is.
    pub fn set_target(&mut self, raw: f32) {
        self.raw = raw;
    }

    /// Advances the filter by `dt` seconds.
    ///
    /// Non-positive or non-finite steps are ignored.
    pub fn step(&mut self, spring: &SpringConfig, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let displacement = self.raw - self.filtered;
        let acceleration = (spring.stiffness * displacement - spring.damping * self.velocity) / spring.mass;
        self.velocity += acceleration * dt;
        self.filtered += self.velocity * dt;
    }

    /// True when close enough to the target to stop animating.
    #[must_use]
    pub fn is_at_rest(&self, spring: &SpringConfig) -> bool {
        (self.raw - self.filtered).abs() <= spring.rest_delta && self.velocity.abs() <= spring.rest_speed
    }

    /// Snaps onto the target and zeroes velocity.
    pub fn settle(&mut self) {
        self.filtered = self.raw;
        self.velocity = 0.0;
    }
}
