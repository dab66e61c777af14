//! Easing curves for time-based transitions.
//!
//! The page uses three named cubic-bézier curves:
//! - [`Easing::EXPO_OUT`] `(0.16, 1, 0.3, 1)`: text and image reveals
//! - [`Easing::CURTAIN`] `(0.76, 0, 0.24, 1)`: preloader exit
//! - [`Easing::NAV`] `(0.22, 1, 0.36, 1)`: navigation bar slide

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in (accelerating).
    EaseIn,
    /// Quadratic ease-out (decelerating).
    EaseOut,
    /// Quadratic ease-in-out.
    EaseInOut,
    /// CSS-style cubic bézier through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    CubicBezier {
        /// First control point X, in `[0, 1]`.
        x1: f32,
        /// First control point Y.
        y1: f32,
        /// Second control point X, in `[0, 1]`.
        x2: f32,
        /// Second control point Y.
        y2: f32,
    },
}

impl Easing {
    /// Sharp deceleration used by reveals.
    pub const EXPO_OUT: Self = Self::bezier(0.16, 1.0, 0.3, 1.0);
    /// Slow-fast-slow curve used by the preloader curtain.
    pub const CURTAIN: Self = Self::bezier(0.76, 0.0, 0.24, 1.0);
    /// Navigation bar slide.
    pub const NAV: Self = Self::bezier(0.22, 1.0, 0.36, 1.0);

    /// Builds a cubic bézier curve.
    #[must_use]
    pub const fn bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::CubicBezier { x1, y1, x2, y2 }
    }

    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        if t.is_nan() {
            return 0.0;
        }
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    let s = solve_curve_x(t, x1.clamp(0.0, 1.0), x2.clamp(0.0, 1.0));
                    bezier_axis(s, y1, y2)
                }
            }
        }
    }
}

/// One axis of a bézier with endpoints fixed at 0 and 1.
fn bezier_axis(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_axis_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Finds the curve parameter whose X equals `x`.
fn solve_curve_x(x: f32, x1: f32, x2: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    let mut s = x;
    for _ in 0..8 {
        let error = bezier_axis(s, x1, x2) - x;
        if error.abs() < EPSILON {
            return s;
        }
        let slope = bezier_axis_slope(s, x1, x2);
        if slope.abs() < EPSILON {
            break;
        }
        s -= error / slope;
    }

    // Newton stalled on a flat stretch; X is monotonic in s, so bisect.
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = bezier_axis(s, x1, x2);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    s
}
