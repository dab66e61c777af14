//! Multi-stop keyframe tracks for ambient, repeating motion.
//!
//! A track is a pure function of elapsed time, so sampling it never mutates
//! anything and two samples at the same time always agree.
//!
//! ```text
//!  Loop:    0 ──> 1 ──> 2 | 0 ──> 1 ──> 2 | ...
//!  Mirror:  0 ──> 1 ──> 2 | 2 ──> 1 ──> 0 | ...
//! ```

use crate::easing::Easing;
use crate::error::{MotionError, MotionResult};

/// What happens after the last keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Hold the final value.
    #[default]
    Never,
    /// Jump back to the first keyframe and play again.
    Loop,
    /// Play backwards, then forwards, forever.
    Mirror,
}

/// An animated value through evenly spaced keyframes.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    values: Vec<f32>,
    /// Seconds per cycle.
    duration: f32,
    /// Seconds before the first cycle starts.
    delay: f32,
    easing: Easing,
    repeat: Repeat,
}

impl Keyframes {
    /// Builds a track.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidParameter`] when there are fewer than
    /// two values, a value is not finite, or the duration is not positive.
    pub fn new(values: Vec<f32>, duration: f32) -> MotionResult<Self> {
        if values.len() < 2 {
            return Err(MotionError::InvalidParameter {
                name: "keyframes.values",
                value: values.len() as f64,
                reason: "needs at least two keyframes",
            });
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(MotionError::InvalidParameter {
                name: "keyframes.values",
                value: f64::from(*bad),
                reason: "must be finite",
            });
        }
        if !(duration.is_finite() && duration > 0.0) {
            return Err(MotionError::InvalidParameter {
                name: "keyframes.duration",
                value: f64::from(duration),
                reason: "must be finite and > 0",
            });
        }
        Ok(Self {
            values,
            duration,
            delay: 0.0,
            easing: Easing::EaseInOut,
            repeat: Repeat::Never,
        })
    }

    /// Easing applied inside every segment.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Repeat mode.
    #[must_use]
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Start delay in seconds; negative values are treated as zero.
    #[must_use]
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        self
    }

    /// Seconds per cycle.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Repeat mode.
    #[must_use]
    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    /// First keyframe.
    #[must_use]
    pub fn first(&self) -> f32 {
        self.values[0]
    }

    /// True once a non-repeating track has reached its last keyframe.
    #[must_use]
    pub fn is_finished(&self, elapsed: f32) -> bool {
        self.repeat == Repeat::Never && elapsed >= self.delay + self.duration
    }

    /// Value at `elapsed` seconds since the track was mounted.
    #[must_use]
    pub fn sample(&self, elapsed: f32) -> f32 {
        let local = elapsed - self.delay;
        if !(local.is_finite() && local > 0.0) {
            return self.first();
        }

        let cycle = (local / self.duration).floor();
        let within = (local - cycle * self.duration) / self.duration;
        let phase = match self.repeat {
            Repeat::Never if cycle >= 1.0 => 1.0,
            Repeat::Never | Repeat::Loop => within,
            Repeat::Mirror => {
                if cycle % 2.0 == 0.0 {
                    within
                } else {
                    1.0 - within
                }
            }
        };
        self.at_phase(phase)
    }

    /// Value at a position in `[0, 1]` through one cycle.
    fn at_phase(&self, phase: f32) -> f32 {
        let segments = self.values.len() - 1;
        let scaled = phase.clamp(0.0, 1.0) * segments as f32;
        let index = (scaled.floor() as usize).min(segments - 1);
        let t = self.easing.apply(scaled - index as f32);
        let (a, b) = (self.values[index], self.values[index + 1]);
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob() -> Keyframes {
        Keyframes::new(vec![1.0, 1.2, 0.9, 1.0], 10.0)
            .unwrap()
            .with_repeat(Repeat::Mirror)
    }

    #[test]
    fn test_hits_every_keyframe() {
        let track = Keyframes::new(vec![0.0, -10.0, 0.0], 4.0)
            .unwrap()
            .with_repeat(Repeat::Loop);
        assert_eq!(track.sample(0.0), 0.0);
        assert!((track.sample(2.0) - -10.0).abs() < 1e-4);
        assert!(track.sample(3.99).abs() < 0.01);
    }

    #[test]
    fn test_loop_restarts() {
        let track = Keyframes::new(vec![0.0, 100.0], 1.0)
            .unwrap()
            .with_easing(Easing::Linear)
            .with_repeat(Repeat::Loop);
        assert!((track.sample(0.25) - 25.0).abs() < 1e-3);
        assert!((track.sample(1.25) - 25.0).abs() < 1e-3);
        assert!((track.sample(7.25) - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_mirror_plays_backwards() {
        let track = Keyframes::new(vec![0.0, 100.0], 1.0)
            .unwrap()
            .with_easing(Easing::Linear)
            .with_repeat(Repeat::Mirror);
        assert!((track.sample(0.25) - 25.0).abs() < 1e-3);
        assert!((track.sample(1.25) - 75.0).abs() < 1e-3);
        assert!((track.sample(2.25) - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_mirror_is_continuous_at_cycle_edge() {
        let track = blob();
        let before = track.sample(9.999);
        let after = track.sample(10.001);
        assert!((before - after).abs() < 1e-2);
    }

    #[test]
    fn test_never_holds_last_value() {
        let track = Keyframes::new(vec![0.0, 5.0, 9.0], 2.0).unwrap();
        assert_eq!(track.sample(50.0), 9.0);
        assert!(track.is_finished(2.0));
        assert!(!track.is_finished(1.0));
    }

    #[test]
    fn test_delay_holds_first_value() {
        let track = blob().with_delay(2.0);
        assert_eq!(track.sample(1.5), 1.0);
        assert_eq!(track.sample(2.0), 1.0);
        assert!(track.sample(4.0) > 1.0);
    }

    #[test]
    fn test_rejects_bad_tracks() {
        assert!(Keyframes::new(vec![1.0], 1.0).is_err());
        assert!(Keyframes::new(vec![0.0, f32::NAN], 1.0).is_err());
        assert!(Keyframes::new(vec![0.0, 1.0], 0.0).is_err());
    }
}
