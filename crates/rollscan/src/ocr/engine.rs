//! Tesseract invocation under a per-page deadline.
//!
//! Each page image is written to a temporary PNG and recognized by the
//! `tesseract` binary in a child process. A cooperative deadline bounds the
//! call: when it expires, the child is abandoned (and killed on drop) and
//! the caller receives [`OcrOutcome::TimedOut`] rather than an error, since
//! a slow page is a recoverable condition.

use super::error::OcrError;
use crate::core::config::SearchConfig;
use image::DynamicImage;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Page segmentation mode 6: assume a single uniform block of text.
const PAGE_SEGMENTATION_MODE: &str = "6";

/// RAII guard for automatic temporary file cleanup.
struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        // Best-effort cleanup on all exit paths, including timeout and panic.
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Result of one recognition call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrOutcome {
    /// Raw recognized text for the page.
    Text(String),
    /// The per-page deadline expired; the page is skipped, not failed.
    TimedOut,
}

/// Wrapper around the external `tesseract` binary.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    language: String,
    deadline: Duration,
}

impl OcrEngine {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            language: config.language.clone(),
            deadline: config.page_timeout(),
        }
    }

    /// Recognize one page image, returning its text or a timeout outcome.
    pub async fn recognize(&self, image: &DynamicImage) -> Result<OcrOutcome, OcrError> {
        let input_path = std::env::temp_dir().join(format!(
            "rollscan_page_{}_{}.png",
            std::process::id(),
            uuid::Uuid::new_v4()
        ));

        // Guard ensures the PNG is removed whether recognition succeeds,
        // times out, or fails.
        let _temp_guard = TempFile::new(input_path.clone());

        image
            .save_with_format(&input_path, image::ImageFormat::Png)
            .map_err(|e| OcrError::ImageEncodingFailed(e.to_string()))?;

        let child = Command::new("tesseract")
            .arg(&input_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(PAGE_SEGMENTATION_MODE)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| OcrError::EngineMissing(format!("failed to execute tesseract: {}", e)))?;

        let output = match timeout(self.deadline, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(OcrError::ProcessingFailed(format!("failed to wait for tesseract: {}", e)));
            }
            Err(_) => {
                // Deadline expired. The child was consumed by
                // wait_with_output() and is killed when its future drops.
                tracing::warn!(deadline_secs = self.deadline.as_secs(), "page recognition timed out");
                return Ok(OcrOutcome::TimedOut);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr_lower = stderr.to_lowercase();
            if stderr_lower.contains("failed loading language") || stderr_lower.contains("tessdata") {
                return Err(OcrError::LanguageMissing(format!(
                    "language '{}' unavailable: {}",
                    self.language,
                    stderr.trim()
                )));
            }
            return Err(OcrError::ProcessingFailed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8(output.stdout)
            .map_err(|e| OcrError::ProcessingFailed(format!("failed to decode tesseract output: {}", e)))?;

        Ok(OcrOutcome::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::preflight::verify_engine;
    use serial_test::serial;

    fn engine_with_timeout(secs: u64) -> OcrEngine {
        OcrEngine::new(&SearchConfig {
            language: "eng".to_string(),
            page_timeout_secs: secs,
            ..Default::default()
        })
    }

    #[test]
    fn test_engine_carries_config() {
        let config = SearchConfig {
            language: "ben".to_string(),
            page_timeout_secs: 12,
            ..Default::default()
        };
        let engine = OcrEngine::new(&config);
        assert_eq!(engine.language, "ben");
        assert_eq!(engine.deadline, Duration::from_secs(12));
    }

    #[test]
    fn test_temp_file_guard_removes_file() {
        let path = std::env::temp_dir().join(format!("rollscan_guard_test_{}.png", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"scratch").unwrap();
        assert!(path.exists());
        {
            let _guard = TempFile::new(path.clone());
        }
        assert!(!path.exists());
    }

    #[tokio::test]
    #[serial]
    async fn test_recognize_blank_page_returns_text() {
        if verify_engine("eng").await.is_err() {
            return;
        }

        let image = DynamicImage::new_rgb8(64, 64);
        let outcome = engine_with_timeout(30).recognize(&image).await.unwrap();
        assert!(matches!(outcome, OcrOutcome::Text(_)));
    }

    #[tokio::test]
    #[serial]
    async fn test_recognize_tight_deadline_times_out_or_succeeds() {
        if verify_engine("eng").await.is_err() {
            return;
        }

        // A 1-second deadline on a large page is tight enough to exercise the
        // timeout path on slow machines; either outcome is valid, an error is
        // not.
        let image = DynamicImage::new_rgb8(2400, 3200);
        let outcome = engine_with_timeout(1).recognize(&image).await.unwrap();
        assert!(matches!(outcome, OcrOutcome::Text(_) | OcrOutcome::TimedOut));
    }
}
