//! Configuration loading and management.
//!
//! A single immutable [`SearchConfig`] is built once at process start (from
//! defaults, an optional TOML file, and caller overrides) and passed
//! explicitly into every component. No component reads global state.

use crate::{Result, RollscanError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunable limits and knobs for one batch run.
///
/// # Example
///
/// ```rust
/// use rollscan::SearchConfig;
///
/// let config = SearchConfig {
///     threshold: 90,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Rasterization resolution in dots per inch.
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Tesseract language model identifier (e.g. "ben").
    #[serde(default = "default_language")]
    pub language: String,

    /// Hard deadline for recognizing a single page.
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Largest document accepted, in megabytes.
    #[serde(default = "default_max_document_size_mb")]
    pub max_document_size_mb: u64,

    /// Largest page count accepted per document.
    #[serde(default = "default_max_document_pages")]
    pub max_document_pages: usize,

    /// Largest names file accepted, in megabytes.
    #[serde(default = "default_max_names_file_size_mb")]
    pub max_names_file_size_mb: u64,

    /// Largest number of search names accepted.
    #[serde(default = "default_max_query_names")]
    pub max_query_names: usize,

    /// Minimum similarity score (0-100) declaring a match.
    #[serde(default = "default_threshold")]
    pub threshold: u8,
}

fn default_dpi() -> u32 {
    350
}
fn default_language() -> String {
    "ben".to_string()
}
fn default_page_timeout_secs() -> u64 {
    30
}
fn default_max_document_size_mb() -> u64 {
    50
}
fn default_max_document_pages() -> usize {
    100
}
fn default_max_names_file_size_mb() -> u64 {
    10
}
fn default_max_query_names() -> usize {
    1000
}
fn default_threshold() -> u8 {
    82
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            language: default_language(),
            page_timeout_secs: default_page_timeout_secs(),
            max_document_size_mb: default_max_document_size_mb(),
            max_document_pages: default_max_document_pages(),
            max_names_file_size_mb: default_max_names_file_size_mb(),
            max_query_names: default_max_query_names(),
            threshold: default_threshold(),
        }
    }
}

impl SearchConfig {
    /// Load configuration from a TOML file; absent keys fall back to
    /// defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: SearchConfig = toml::from_str(&content).map_err(|e| {
            RollscanError::validation_with_source(format!("invalid config file: {}", path.as_ref().display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges before the config reaches any component.
    pub fn validate(&self) -> Result<()> {
        if self.threshold > 100 {
            return Err(RollscanError::validation(format!(
                "threshold must be between 0 and 100, got {}",
                self.threshold
            )));
        }
        if self.dpi == 0 {
            return Err(RollscanError::validation("dpi must be positive"));
        }
        if self.page_timeout_secs == 0 {
            return Err(RollscanError::validation("page timeout must be positive"));
        }
        if self.max_document_pages == 0 {
            return Err(RollscanError::validation("max document pages must be positive"));
        }
        if self.max_query_names == 0 {
            return Err(RollscanError::validation("max query names must be positive"));
        }
        if self.language.is_empty() || !self.language.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '+')
        {
            return Err(RollscanError::validation(format!(
                "invalid OCR language identifier: '{}'",
                self.language
            )));
        }
        Ok(())
    }

    /// Per-page OCR deadline as a `Duration`.
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }
}
