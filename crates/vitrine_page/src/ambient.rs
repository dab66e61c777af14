//! # Ambient Motion
//!
//! Decorative loops that run for as long as the page is mounted: the
//! specialty marquee, the hero background blobs, the floating badge, the
//! scroll hint and the footer's breathing orbs.
//!
//! Everything here is a pure function of the page clock.

use vitrine_motion::{Easing, Keyframes, MotionResult, Repeat};

/// Infinite horizontal ticker tape.
///
/// The content is rendered twice side by side, so sliding by half its width
/// and jumping back is seamless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    period_s: f32,
}

impl Marquee {
    /// Creates a marquee completing one cycle every `period_s` seconds.
    #[must_use]
    pub fn new(period_s: f32) -> Self {
        Self { period_s }
    }

    /// Horizontal offset in percent, in `(-50, 0]`.
    #[must_use]
    pub fn offset_percent(&self, elapsed: f32) -> f32 {
        if !(elapsed.is_finite() && elapsed > 0.0 && self.period_s > 0.0) {
            return 0.0;
        }
        -50.0 * (elapsed / self.period_s).fract()
    }
}

/// One named animated property.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientTrack {
    /// Renderer binding, `"element.property"`.
    pub name: &'static str,
    /// The motion.
    pub keyframes: Keyframes,
}

/// A sampled property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientValue {
    /// Renderer binding, `"element.property"`.
    pub name: &'static str,
    /// Value at the sampled time.
    pub value: f32,
}

/// Every ambient loop on the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmbientScene {
    tracks: Vec<AmbientTrack>,
}

impl AmbientScene {
    /// An empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The landing page's loops.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in tracks; the signature follows
    /// [`Keyframes::new`].
    pub fn landing() -> MotionResult<Self> {
        let mut scene = Self::new();
        // Hero background blobs.
        scene.push("blob.scale", looped(&[1.0, 1.2, 0.9, 1.0], 10.0, Repeat::Mirror)?);
        scene.push("blob.opacity", looped(&[0.3, 0.5, 0.3], 10.0, Repeat::Mirror)?);
        scene.push("blob.rotate", looped(&[0.0, 45.0, -45.0, 0.0], 10.0, Repeat::Mirror)?);
        // Floating credential badge and scroll hint.
        scene.push("badge.y", looped(&[0.0, -10.0, 0.0], 4.0, Repeat::Loop)?);
        scene.push("scroll_hint.y", looped(&[0.0, 10.0, 0.0], 2.0, Repeat::Loop)?);
        // Footer orbs.
        scene.push("orb1.scale", looped(&[1.0, 1.2, 1.0], 12.0, Repeat::Loop)?);
        scene.push("orb1.opacity", looped(&[0.15, 0.25, 0.15], 12.0, Repeat::Loop)?);
        scene.push("orb1.x", looped(&[0.0, 50.0, 0.0], 12.0, Repeat::Loop)?);
        scene.push("orb1.y", looped(&[0.0, -30.0, 0.0], 12.0, Repeat::Loop)?);
        scene.push("orb2.scale", looped(&[1.0, 1.3, 1.0], 15.0, Repeat::Loop)?.with_delay(2.0));
        scene.push("orb2.opacity", looped(&[0.1, 0.2, 0.1], 15.0, Repeat::Loop)?.with_delay(2.0));
        scene.push("orb2.x", looped(&[0.0, -40.0, 0.0], 15.0, Repeat::Loop)?.with_delay(2.0));
        scene.push("orb2.y", looped(&[0.0, 40.0, 0.0], 15.0, Repeat::Loop)?.with_delay(2.0));
        scene.push("orb3.opacity", looped(&[0.05, 0.1, 0.05], 8.0, Repeat::Loop)?);
        scene.push("orb3.scale", looped(&[1.0, 1.1, 1.0], 8.0, Repeat::Loop)?);
        Ok(scene)
    }

    /// Adds a track.
    pub fn push(&mut self, name: &'static str, keyframes: Keyframes) {
        self.tracks.push(AmbientTrack { name, keyframes });
    }

    /// Number of tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True without tracks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Samples every track at `elapsed` seconds.
    #[must_use]
    pub fn sample(&self, elapsed: f32) -> Vec<AmbientValue> {
        self.tracks
            .iter()
            .map(|track| AmbientValue {
                name: track.name,
                value: track.keyframes.sample(elapsed),
            })
            .collect()
    }

    /// Samples one track by name.
    #[must_use]
    pub fn value(&self, name: &str, elapsed: f32) -> Option<f32> {
        self.tracks
            .iter()
            .find(|track| track.name == name)
            .map(|track| track.keyframes.sample(elapsed))
    }
}

fn looped(values: &[f32], duration: f32, repeat: Repeat) -> MotionResult<Keyframes> {
    Ok(Keyframes::new(values.to_vec(), duration)?
        .with_easing(Easing::EaseInOut)
        .with_repeat(repeat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marquee_wraps_every_period() {
        let marquee = Marquee::new(20.0);
        assert_eq!(marquee.offset_percent(0.0), 0.0);
        assert!((marquee.offset_percent(10.0) - -25.0).abs() < 1e-4);
        assert!((marquee.offset_percent(30.0) - -25.0).abs() < 1e-3);
        assert!(marquee.offset_percent(19.99) > -50.0);
    }

    #[test]
    fn test_landing_scene_starts_at_rest() {
        let scene = AmbientScene::landing().unwrap();
        assert_eq!(scene.len(), 15);
        assert_eq!(scene.value("blob.scale", 0.0), Some(1.0));
        assert_eq!(scene.value("badge.y", 0.0), Some(0.0));
        assert_eq!(scene.value("missing", 0.0), None);
    }

    #[test]
    fn test_badge_floats_up() {
        let scene = AmbientScene::landing().unwrap();
        let peak = scene.value("badge.y", 2.0).unwrap();
        assert!((peak - -10.0).abs() < 1e-3);
        let again = scene.value("badge.y", 6.0).unwrap();
        assert!((again - -10.0).abs() < 1e-3);
    }

    #[test]
    fn test_delayed_orb_waits() {
        let scene = AmbientScene::landing().unwrap();
        assert_eq!(scene.value("orb2.scale", 1.9), Some(1.0));
        assert!(scene.value("orb2.scale", 9.5).unwrap() > 1.2);
    }
}
