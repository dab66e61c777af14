//! # Motion Configuration
//!
//! Tuning constants for every primitive, loaded once at startup from TOML.
//! Every field has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! [spring]
//! stiffness = 150.0
//! damping = 25.0
//! mass = 0.5
//!
//! [nav]
//! threshold_px = 150.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, MotionResult};

/// Spring-damper parameters for the pointer follower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Restoring force per pixel of displacement.
    pub stiffness: f32,
    /// Opposing force per pixel/second of velocity.
    pub damping: f32,
    /// Inertia of the follower.
    pub mass: f32,
    /// Distance below which the spring may come to rest.
    pub rest_delta: f32,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 150.0,
            damping: 25.0,
            mass: 0.5,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }
}

impl SpringConfig {
    /// Rejects parameters that cannot produce a stable follower.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidSpring`] for non-finite values, a
    /// non-positive stiffness or mass, or negative damping, and
    /// [`MotionError::InvalidParameter`] for negative rest thresholds.
    pub fn validate(&self) -> MotionResult<()> {
        let finite = self.stiffness.is_finite() && self.damping.is_finite() && self.mass.is_finite();
        if !finite || self.stiffness <= 0.0 || self.mass <= 0.0 || self.damping < 0.0 {
            return Err(MotionError::InvalidSpring {
                stiffness: self.stiffness,
                damping: self.damping,
                mass: self.mass,
            });
        }
        non_negative("spring.rest_delta", self.rest_delta)?;
        non_negative("spring.rest_speed", self.rest_speed)
    }
}

/// Directional scroll-hide parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Minimum scroll offset before scrolling down hides the bar.
    pub threshold_px: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self { threshold_px: 150.0 }
    }
}

/// Reveal-on-scroll parameters applied when a caller passes no options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible, in `[0, 1]`.
    pub threshold_ratio: f32,
    /// Pixels added around the viewport before testing visibility.
    pub root_margin_px: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: 0.0,
            root_margin_px: 0.0,
        }
    }
}

/// Frame source parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Fixed steps per second.
    pub rate_hz: u32,
    /// Maximum steps one host frame may run.
    pub max_catch_up_steps: u32,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            rate_hz: 60,
            max_catch_up_steps: 8,
        }
    }
}

/// Configuration for the whole motion layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Pointer follower spring.
    pub spring: SpringConfig,
    /// Navigation bar hiding.
    pub nav: NavConfig,
    /// Reveal defaults.
    pub reveal: RevealConfig,
    /// Frame source.
    pub ticker: TickerConfig,
}

impl MotionConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::ConfigParse`] for malformed TOML and any
    /// validation error from [`MotionConfig::validate`].
    pub fn from_toml_str(text: &str) -> MotionResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::ConfigIo`] when the file cannot be read, plus
    /// everything [`MotionConfig::from_toml_str`] returns.
    pub fn from_toml_file(path: impl AsRef<Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| MotionError::ConfigIo {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> MotionResult<()> {
        self.spring.validate()?;
        non_negative("nav.threshold_px", self.nav.threshold_px)?;
        if !(0.0..=1.0).contains(&self.reveal.threshold_ratio) {
            return Err(MotionError::InvalidParameter {
                name: "reveal.threshold_ratio",
                value: f64::from(self.reveal.threshold_ratio),
                reason: "must be within [0, 1]",
            });
        }
        if !self.reveal.root_margin_px.is_finite() {
            return Err(MotionError::InvalidParameter {
                name: "reveal.root_margin_px",
                value: f64::from(self.reveal.root_margin_px),
                reason: "must be finite",
            });
        }
        if self.ticker.rate_hz == 0 {
            return Err(MotionError::InvalidParameter {
                name: "ticker.rate_hz",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if self.ticker.max_catch_up_steps == 0 {
            return Err(MotionError::InvalidParameter {
                name: "ticker.max_catch_up_steps",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f32) -> MotionResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MotionError::InvalidParameter {
            name,
            value: f64::from(value),
            reason: "must be finite and >= 0",
        })
    }
}
