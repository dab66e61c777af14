//! # Preloader
//!
//! Full-screen curtain shown on mount.
//!
//! ```text
//!   SHOWING ──(delay elapsed)──> EXITING ──(slide done)──> DONE
//!   offset 0%                    0% → -100%                 removed
//! ```
//!
//! The deferral is a frame-clock timer: it only advances while the page's
//! frame client runs, so unmounting before the delay cancels the exit.

use std::time::Duration;

use vitrine_motion::{Easing, Tween};

use crate::config::PageSettings;

/// Preloader lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreloaderPhase {
    /// Covering the page; the progress bar sweeps.
    Showing,
    /// Sliding up out of view.
    Exiting,
    /// Gone.
    Done,
}

/// Curtain timer and exit animation.
#[derive(Debug, Clone)]
pub struct Preloader {
    phase: PreloaderPhase,
    delay: f32,
    clock: f32,
    exit: Tween,
}

impl Preloader {
    /// Width of the progress bar sweep.
    pub const BAR_WIDTH_PX: f32 = 200.0;
    /// Seconds per bar sweep.
    pub const BAR_PERIOD_S: f32 = 1.5;

    /// Creates a showing preloader.
    #[must_use]
    pub fn new(delay: Duration, exit: Duration) -> Self {
        Self {
            phase: PreloaderPhase::Showing,
            delay: delay.as_secs_f32(),
            clock: 0.0,
            exit: Tween::new(0.0, Easing::CURTAIN).with_duration(exit.as_secs_f32()),
        }
    }

    /// Creates a preloader with the configured timings.
    #[must_use]
    pub fn from_settings(settings: &PageSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.preloader_delay_ms),
            Duration::from_millis(settings.preloader_exit_ms),
        )
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> PreloaderPhase {
        self.phase
    }

    /// True until the exit finishes.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.phase != PreloaderPhase::Done
    }

    /// Vertical offset in percent of the viewport (0 = covering).
    #[must_use]
    pub fn offset_percent(&self) -> f32 {
        self.exit.value()
    }

    /// Width of the progress bar's moving segment.
    #[must_use]
    pub fn bar_px(&self) -> f32 {
        let cycle = (self.clock / Self::BAR_PERIOD_S).fract();
        Self::BAR_WIDTH_PX * Easing::EaseInOut.apply(cycle)
    }

    /// Advances by `dt` seconds; returns the new phase on a transition.
    pub fn advance(&mut self, dt: f32) -> Option<PreloaderPhase> {
        if !(dt.is_finite() && dt > 0.0) || self.phase == PreloaderPhase::Done {
            return None;
        }
        self.clock += dt;
        match self.phase {
            PreloaderPhase::Showing => {
                if self.clock < self.delay {
                    return None;
                }
                self.exit.set_target(-100.0);
                // Time past the deadline already counts toward the slide.
                self.exit.update(self.clock - self.delay);
                self.phase = if self.exit.is_complete() {
                    PreloaderPhase::Done
                } else {
                    PreloaderPhase::Exiting
                };
                tracing::info!(phase = ?self.phase, "preloader exit started");
                Some(self.phase)
            }
            PreloaderPhase::Exiting => {
                if self.exit.update(dt) {
                    return None;
                }
                self.phase = PreloaderPhase::Done;
                tracing::info!("preloader done");
                Some(self.phase)
            }
            PreloaderPhase::Done => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run(preloader: &mut Preloader, seconds: f32) -> Vec<PreloaderPhase> {
        let steps = (seconds / DT).round() as usize;
        (0..steps).filter_map(|_| preloader.advance(DT)).collect()
    }

    #[test]
    fn test_holds_for_the_delay() {
        let mut preloader = Preloader::from_settings(&PageSettings::default());
        assert!(run(&mut preloader, 1.9).is_empty());
        assert_eq!(preloader.phase(), PreloaderPhase::Showing);
        assert_eq!(preloader.offset_percent(), 0.0);
    }

    #[test]
    fn test_full_lifecycle() {
        let mut preloader = Preloader::from_settings(&PageSettings::default());
        let transitions = run(&mut preloader, 3.0);

        assert_eq!(transitions, vec![PreloaderPhase::Exiting, PreloaderPhase::Done]);
        assert_eq!(preloader.offset_percent(), -100.0);
        assert!(!preloader.is_visible());
        assert_eq!(preloader.advance(DT), None);
    }

    #[test]
    fn test_exit_slides_monotonically() {
        let mut preloader = Preloader::new(Duration::ZERO, Duration::from_millis(800));
        let mut last = 0.0;
        for _ in 0..60 {
            preloader.advance(DT);
            let offset = preloader.offset_percent();
            assert!(offset <= last + 1e-4);
            last = offset;
        }
        assert_eq!(last, -100.0);
    }

    #[test]
    fn test_bar_sweeps_within_width() {
        let mut preloader = Preloader::from_settings(&PageSettings::default());
        for _ in 0..200 {
            preloader.advance(DT);
            let bar = preloader.bar_px();
            assert!((0.0..=Preloader::BAR_WIDTH_PX).contains(&bar));
        }
    }

    #[test]
    fn test_large_frame_skips_straight_to_done() {
        let mut preloader = Preloader::from_settings(&PageSettings::default());
        assert_eq!(preloader.advance(5.0), Some(PreloaderPhase::Done));
    }
}
