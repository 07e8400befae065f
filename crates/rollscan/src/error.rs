//! Error types for rollscan.
//!
//! All fallible operations in the library return [`Result`], whose error type
//! is [`RollscanError`]. The variants mirror the failure taxonomy of the
//! pipeline:
//!
//! - **Fatal before the batch starts:** `PathSecurity`, `NotFound`,
//!   `EngineUnavailable`, and names-file load failures (`ResourceLimit`,
//!   `Validation`). These abort the run with no partial results.
//! - **Fatal for a single document only:** `InvalidFormat`, `ResourceLimit`,
//!   `Document`. The batch loop catches these at the document boundary and
//!   records them into the processing stats.
//! - **System errors** (`Io`) always bubble up unchanged so real filesystem
//!   problems surface to the user.
//!
//! Per-page OCR timeouts and extraction misses are not errors at all: they
//! are modeled as outcomes (`OcrOutcome::TimedOut`, `PageExtraction::misses`)
//! because the pipeline recovers from them in place.
use thiserror::Error;

/// Result type alias using `RollscanError`.
pub type Result<T> = std::result::Result<T, RollscanError>;

/// Main error type for all rollscan operations.
#[derive(Debug, Error)]
pub enum RollscanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path security violation: {message}")]
    PathSecurity { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Invalid document format: {message}")]
    InvalidFormat { message: String },

    #[error("Resource limit exceeded: {message}")]
    ResourceLimit { message: String },

    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Document error: {message}")]
    Document {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<serde_json::Error> for RollscanError {
    fn from(err: serde_json::Error) -> Self {
        RollscanError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<crate::ingest::error::DocumentError> for RollscanError {
    fn from(err: crate::ingest::error::DocumentError) -> Self {
        RollscanError::Document {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<crate::ocr::error::OcrError> for RollscanError {
    fn from(err: crate::ocr::error::OcrError) -> Self {
        match err {
            crate::ocr::error::OcrError::EngineMissing(msg) | crate::ocr::error::OcrError::LanguageMissing(msg) => {
                RollscanError::EngineUnavailable(msg)
            }
            other => RollscanError::Ocr {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}

impl RollscanError {
    /// Create a PathSecurity error
    pub fn path_security<S: Into<String>>(message: S) -> Self {
        Self::PathSecurity {
            message: message.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an InvalidFormat error
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a ResourceLimit error
    pub fn resource_limit<S: Into<String>>(message: S) -> Self {
        Self::ResourceLimit {
            message: message.into(),
        }
    }

    /// Create a Validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Validation error with source
    pub fn validation_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an Ocr error
    pub fn ocr<S: Into<String>>(message: S) -> Self {
        Self::Ocr {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Document error
    pub fn document<S: Into<String>>(message: S) -> Self {
        Self::Document {
            message: message.into(),
            source: None,
        }
    }

    /// True for conditions that must abort the run before any document is
    /// touched (engine or input-path problems), as opposed to per-document
    /// failures the batch loop absorbs.
    pub fn is_fatal_for_batch(&self) -> bool {
        matches!(
            self,
            RollscanError::PathSecurity { .. } | RollscanError::NotFound { .. } | RollscanError::EngineUnavailable(_)
        )
    }
}
