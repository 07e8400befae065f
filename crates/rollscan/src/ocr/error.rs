use std::fmt;

/// OCR-specific errors.
///
/// `EngineMissing` and `LanguageMissing` are fatal for the whole batch (no
/// page could ever succeed); the rest are per-page. Deadline expiry is not an
/// error at all - it surfaces as [`super::OcrOutcome::TimedOut`].
#[derive(Debug, Clone)]
pub enum OcrError {
    EngineMissing(String),
    LanguageMissing(String),
    ImageEncodingFailed(String),
    ProcessingFailed(String),
}

impl fmt::Display for OcrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EngineMissing(msg) => write!(f, "OCR engine missing: {}", msg),
            Self::LanguageMissing(msg) => write!(f, "OCR language data missing: {}", msg),
            Self::ImageEncodingFailed(msg) => write!(f, "Image encoding failed: {}", msg),
            Self::ProcessingFailed(msg) => write!(f, "OCR processing failed: {}", msg),
        }
    }
}

impl std::error::Error for OcrError {}

// NOTE: No From<std::io::Error> impl - IO errors must bubble up unchanged per error handling policy
