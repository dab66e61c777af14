//! Page error types.

use thiserror::Error;
use vitrine_motion::MotionError;

/// Errors that can occur while mounting or driving the landing page.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageError {
    /// Motion configuration was rejected.
    #[error(transparent)]
    Motion(#[from] MotionError),

    /// The host clipboard refused the write.
    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    /// Page content that cannot be rendered.
    #[error("invalid page content `{field}`: {reason}")]
    InvalidContent {
        /// Setting name as it appears in the config file.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<toml::de::Error> for PageError {
    fn from(err: toml::de::Error) -> Self {
        Self::Motion(MotionError::from(err))
    }
}

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;
