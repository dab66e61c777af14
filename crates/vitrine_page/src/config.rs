//! # Landing Page Configuration
//!
//! One TOML file configures both layers: the motion sections (`[spring]`,
//! `[nav]`, `[reveal]`, `[ticker]`) sit next to a `[page]` section with
//! timings and content.
//!
//! ```toml
//! [spring]
//! stiffness = 150.0
//!
//! [page]
//! preloader_delay_ms = 2000
//! email = "contato@example.com"
//! nav_items = ["Início", "Sobre", "Atuação", "Galeria"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use vitrine_motion::{MotionConfig, MotionError};

use crate::error::{PageError, PageResult};

/// Page timings and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Time the preloader stays up before its exit starts.
    pub preloader_delay_ms: u64,
    /// Length of the preloader's exit slide.
    pub preloader_exit_ms: u64,
    /// Time the "copied" confirmation stays visible.
    pub copy_reset_ms: u64,
    /// Seconds per marquee cycle.
    pub marquee_period_s: f32,
    /// Delay between consecutive items of a staggered list.
    pub stagger_ms: u64,
    /// Length of the animated scroll to the footer.
    pub scroll_to_ms: u64,
    /// Contact address offered by the copy button.
    pub email: String,
    /// Desktop navigation labels, in order.
    pub nav_items: Vec<String>,
    /// Mobile menu labels, in order.
    pub menu_items: Vec<String>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            preloader_delay_ms: 2000,
            preloader_exit_ms: 800,
            copy_reset_ms: 2500,
            marquee_period_s: 20.0,
            stagger_ms: 100,
            scroll_to_ms: 1000,
            email: "contato@vitrine.example".to_string(),
            nav_items: ["Início", "Sobre", "Atuação", "Galeria"].map(String::from).to_vec(),
            menu_items: ["Início", "Sobre", "Atuação", "Galeria", "Contato"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Everything the landing page needs, from one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    /// Motion primitive tuning.
    #[serde(flatten)]
    pub motion: MotionConfig,
    /// Page timings and content.
    pub page: PageSettings,
}

impl LandingConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Motion`] for malformed TOML or invalid motion
    /// tuning, and [`PageError::InvalidContent`] for unusable page settings.
    pub fn from_toml_str(text: &str) -> PageResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::ConfigIo`] (wrapped) when the file cannot be
    /// read, plus everything [`LandingConfig::from_toml_str`] returns.
    pub fn from_toml_file(path: impl AsRef<Path>) -> PageResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| MotionError::ConfigIo {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks both layers.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> PageResult<()> {
        self.motion.validate()?;
        let page = &self.page;
        if !(page.marquee_period_s.is_finite() && page.marquee_period_s > 0.0) {
            return Err(PageError::InvalidContent {
                field: "page.marquee_period_s",
                reason: format!("{} is not a positive duration", page.marquee_period_s),
            });
        }
        if page.email.trim().is_empty() || !page.email.contains('@') {
            return Err(PageError::InvalidContent {
                field: "page.email",
                reason: format!("{:?} is not an e-mail address", page.email),
            });
        }
        for (field, items) in [("page.nav_items", &page.nav_items), ("page.menu_items", &page.menu_items)] {
            if let Some(blank) = items.iter().find(|label| label.trim().is_empty()) {
                return Err(PageError::InvalidContent {
                    field,
                    reason: format!("blank label {blank:?}"),
                });
            }
        }
        Ok(())
    }
}
