//! Screen-space geometry shared by the primitives.

/// A 2D point or offset in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// A viewport-sized rectangle anchored at the origin.
    #[must_use]
    pub const fn viewport(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Area, zero for degenerate rectangles.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// True when every field is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Returns true if two rectangles touch or overlap.
    ///
    /// Edge-adjacent rectangles count, matching how browsers report a
    /// zero-ratio intersection for an element sitting exactly on the fold.
    #[must_use]
    pub fn touches(&self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't touch.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.touches(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Expands the rectangle by the given amount on all sides.
    ///
    /// Negative amounts shrink it, which is how a negative root margin
    /// pulls the observation boundary inside the viewport.
    #[must_use]
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Fraction of `self` visible inside `root`, in `[0, 1]`.
    ///
    /// Returns `None` when the rectangles do not touch at all. A zero-area
    /// element that touches the root counts as fully visible.
    #[must_use]
    pub fn visible_ratio(&self, root: &Self) -> Option<f32> {
        if !self.is_finite() || !root.is_finite() {
            return None;
        }
        let overlap = self.intersection(root)?;
        let area = self.area();
        if area <= f32::EPSILON {
            return Some(1.0);
        }
        Some((overlap.area() / area).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_ratio_half() {
        let element = Rect::new(0.0, 500.0, 100.0, 200.0);
        let viewport = Rect::viewport(1280.0, 600.0);

        let ratio = element.visible_ratio(&viewport).unwrap();
        assert!((ratio - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_visible_ratio_outside() {
        let element = Rect::new(0.0, 900.0, 100.0, 200.0);
        let viewport = Rect::viewport(1280.0, 600.0);

        assert!(element.visible_ratio(&viewport).is_none());
        // A 300px margin pulls it in.
        assert!(element.visible_ratio(&viewport.expand(300.0)).is_some());
    }

    #[test]
    fn test_edge_touch_counts() {
        let element = Rect::new(0.0, 600.0, 100.0, 50.0);
        let viewport = Rect::viewport(1280.0, 600.0);

        assert_eq!(element.visible_ratio(&viewport), Some(0.0));
    }

    #[test]
    fn test_non_finite_is_invisible() {
        let element = Rect::new(0.0, f32::NAN, 100.0, 50.0);
        assert!(element.visible_ratio(&Rect::viewport(10.0, 10.0)).is_none());
    }
}
