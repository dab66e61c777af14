//! Copy-to-clipboard with a transient confirmation.

use std::time::Duration;

use crate::error::{PageError, PageResult};

/// Host clipboard access.
pub trait Clipboard: Send {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns the host's reason when the write is refused.
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

/// In-process clipboard for replays and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    refuse: bool,
}

impl MemoryClipboard {
    /// A clipboard that rejects every write.
    #[must_use]
    pub fn refusing() -> Self {
        Self {
            contents: None,
            refuse: true,
        }
    }

    /// Last text written.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        if self.refuse {
            return Err("clipboard permission denied".to_string());
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// The "copied" flag and its reset timer.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    reset_after: Duration,
    remaining: Option<Duration>,
}

impl CopyFeedback {
    /// Creates feedback that clears `reset_after` a successful copy.
    #[must_use]
    pub fn new(reset_after: Duration) -> Self {
        Self {
            reset_after,
            remaining: None,
        }
    }

    /// True while the confirmation is showing.
    #[must_use]
    pub fn is_copied(&self) -> bool {
        self.remaining.is_some()
    }

    /// Writes `text` and starts (or restarts) the confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Clipboard`] when the host refuses; the flag is
    /// left off.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, text: &str) -> PageResult<()> {
        match clipboard.write_text(text) {
            Ok(()) => {
                self.remaining = Some(self.reset_after);
                tracing::debug!("contact address copied");
                Ok(())
            }
            Err(reason) => {
                self.remaining = None;
                tracing::warn!(%reason, "clipboard write failed");
                Err(PageError::Clipboard(reason))
            }
        }
    }

    /// Runs the reset timer; true when the flag just cleared.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        match remaining.checked_sub(dt) {
            Some(left) if !left.is_zero() => {
                self.remaining = Some(left);
                false
            }
            _ => {
                self.remaining = None;
                true
            }
        }
    }
}
