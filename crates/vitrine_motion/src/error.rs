//! # Motion Error Types
//!
//! Errors only exist at the edges: loading and validating configuration.
//! Nothing on the per-event path returns an error; bad geometry degrades
//! to a safe value instead.

use thiserror::Error;

/// Errors that can occur while configuring motion primitives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Spring parameters that cannot produce a stable filter.
    #[error("invalid spring: stiffness={stiffness}, damping={damping}, mass={mass}")]
    InvalidSpring {
        /// Spring stiffness.
        stiffness: f32,
        /// Damping coefficient.
        damping: f32,
        /// Mass of the follower.
        mass: f32,
    },

    /// A parameter outside its accepted range.
    #[error("invalid parameter `{name}`: {value} ({reason})")]
    InvalidParameter {
        /// Parameter name as it appears in the config file.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Accepted range, human readable.
        reason: &'static str,
    },

    /// The configuration text was not valid TOML for this schema.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// The configuration file could not be read.
    #[error("cannot read config {path}: {reason}")]
    ConfigIo {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },
}

impl From<toml::de::Error> for MotionError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

/// Result type for motion configuration.
pub type MotionResult<T> = Result<T, MotionError>;
