//! Animated document scrolling for in-page links.
//!
//! The page only computes offsets; the host applies each one to the
//! document and the resulting scroll events flow back through the normal
//! scroll source.

use std::time::Duration;

use vitrine_motion::{Easing, Tween};

/// Document scroll animation.
#[derive(Debug, Clone)]
pub struct SmoothScroller {
    tween: Tween,
    active: bool,
    /// Offset the document should be at if nobody else scrolled it.
    expected: f32,
}

impl SmoothScroller {
    /// Scroll offsets within this distance of the expected one count as our own.
    pub const TOLERANCE_PX: f32 = 1.0;

    /// Creates an idle scroller whose animations last `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            tween: Tween::new(0.0, Easing::EaseInOut).with_duration(duration.as_secs_f32()),
            active: false,
            expected: 0.0,
        }
    }

    /// True while an animation is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Offset being scrolled to, while active.
    #[must_use]
    pub fn target(&self) -> Option<f32> {
        self.active.then(|| self.tween.target())
    }

    /// Starts scrolling from `from` to `to`.
    ///
    /// Returns false (and does nothing) for non-finite offsets or when
    /// already there.
    pub fn scroll_to(&mut self, from: f32, to: f32) -> bool {
        if !(from.is_finite() && to.is_finite()) || (to - from).abs() < 0.5 {
            return false;
        }
        self.tween.set_immediate(from);
        self.tween.set_target(to);
        self.active = true;
        self.expected = from;
        tracing::debug!(from, to, "smooth scroll started");
        true
    }

    /// Abandons the animation, e.g. when the user scrolls manually.
    pub fn cancel(&mut self) {
        if self.active {
            self.active = false;
            tracing::debug!("smooth scroll cancelled");
        }
    }

    /// Reports a document scroll offset seen by the host.
    ///
    /// An offset other than the one last handed out means the user took
    /// over, and the animation is cancelled. Returns true when that happened.
    pub fn on_document_scroll(&mut self, scroll_y: f32) -> bool {
        if !self.active || (scroll_y - self.expected).abs() <= Self::TOLERANCE_PX {
            return false;
        }
        self.cancel();
        true
    }

    /// Advances by `dt` seconds; returns the offset the host should apply.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if !self.active {
            return None;
        }
        if !self.tween.update(dt) {
            self.active = false;
        }
        self.expected = self.tween.value();
        Some(self.expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_scroll_reaches_target() {
        let mut scroller = SmoothScroller::new(Duration::from_millis(1000));
        assert!(scroller.scroll_to(0.0, 4200.0));

        let offsets: Vec<f32> = std::iter::from_fn(|| scroller.advance(DT)).collect();
        assert!(offsets.len() >= 59 && offsets.len() <= 62, "{} frames", offsets.len());
        assert_eq!(offsets.last().copied(), Some(4200.0));
        assert!(offsets.windows(2).all(|w| w[1] >= w[0]));
        assert!(!scroller.is_active());
    }

    #[test]
    fn test_ease_in_out_is_slow_at_edges() {
        let mut scroller = SmoothScroller::new(Duration::from_millis(1000));
        scroller.scroll_to(0.0, 1000.0);
        let first = scroller.advance(DT).unwrap_or_default();
        assert!(first < 1000.0 * DT);
    }

    #[test]
    fn test_cancel_stops_offsets() {
        let mut scroller = SmoothScroller::new(Duration::from_millis(1000));
        scroller.scroll_to(0.0, 500.0);
        scroller.advance(DT);
        scroller.cancel();
        assert_eq!(scroller.advance(DT), None);
        assert_eq!(scroller.target(), None);
    }

    #[test]
    fn test_own_offsets_do_not_cancel() {
        let mut scroller = SmoothScroller::new(Duration::from_millis(1000));
        scroller.scroll_to(100.0, 900.0);
        assert!(!scroller.on_document_scroll(100.0));
        for _ in 0..10 {
            let y = scroller.advance(DT).unwrap_or_default();
            assert!(!scroller.on_document_scroll(y));
        }
        assert!(scroller.is_active());
    }

    #[test]
    fn test_manual_scroll_takes_over() {
        let mut scroller = SmoothScroller::new(Duration::from_millis(1000));
        scroller.scroll_to(0.0, 3200.0);
        for _ in 0..10 {
            scroller.advance(DT);
        }
        assert!(scroller.on_document_scroll(0.0));
        assert!(!scroller.is_active());
        assert_eq!(scroller.advance(DT), None);
        assert!(!scroller.on_document_scroll(50.0));
    }

    #[test]
    fn test_already_there_is_noop() {
        let mut scroller = SmoothScroller::new(Duration::from_millis(1000));
        assert!(!scroller.scroll_to(300.0, 300.2));
        assert!(!scroller.scroll_to(0.0, f32::NAN));
        assert!(!scroller.is_active());
    }
}
