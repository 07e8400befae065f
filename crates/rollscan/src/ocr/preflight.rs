//! Startup availability check for the recognition engine.
//!
//! If the `tesseract` binary or the configured language data is missing, no
//! page in the batch could ever succeed, so the condition is reported once,
//! before any document is touched. A successful check is cached for the
//! lifetime of the process.

use super::error::OcrError;
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use tokio::process::Command;

static ENGINE_VALIDATED: OnceCell<()> = OnceCell::new();

/// Verify that tesseract is installed and the language data is available.
pub async fn verify_engine(language: &str) -> Result<(), OcrError> {
    if ENGINE_VALIDATED.get().is_some() {
        return Ok(());
    }

    let output = Command::new("tesseract").arg("--version").output().await.map_err(|e| {
        OcrError::EngineMissing(format!(
            "tesseract is required but was not found in PATH (install tesseract-ocr): {}",
            e
        ))
    })?;
    if !output.status.success() {
        return Err(OcrError::EngineMissing(
            "tesseract is required but `tesseract --version` failed".to_string(),
        ));
    }

    let output = Command::new("tesseract")
        .arg("--list-langs")
        .output()
        .await
        .map_err(|e| OcrError::EngineMissing(format!("failed to query tesseract languages: {}", e)))?;

    // Older tesseract prints the language list on stderr, newer on stdout.
    let mut listing = String::from_utf8_lossy(&output.stdout).into_owned();
    listing.push('\n');
    listing.push_str(&String::from_utf8_lossy(&output.stderr));
    let installed = parse_language_listing(&listing);

    for code in language.split('+') {
        if !installed.contains(code) {
            return Err(OcrError::LanguageMissing(format!(
                "tesseract language data '{}' is not installed (install tesseract-ocr-{})",
                code, code
            )));
        }
    }

    let _ = ENGINE_VALIDATED.set(());

    Ok(())
}

/// Language codes from `tesseract --list-langs` output.
///
/// The listing is a header line followed by one code per line; anything with
/// spaces or punctuation other than `_` is not a code and is skipped.
fn parse_language_listing(output: &str) -> HashSet<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_language_listing_standard() {
        let listing = "List of available languages (3):\nben\neng\nosd\n";
        let langs = parse_language_listing(listing);
        assert!(langs.contains("ben"));
        assert!(langs.contains("eng"));
        assert!(langs.contains("osd"));
        assert!(!langs.contains("List of available languages (3):"));
    }

    #[test]
    fn test_parse_language_listing_with_script_codes() {
        let listing = "List of available languages (2):\nchi_sim\nsrp_latn\n";
        let langs = parse_language_listing(listing);
        assert!(langs.contains("chi_sim"));
        assert!(langs.contains("srp_latn"));
    }

    #[test]
    fn test_parse_language_listing_empty() {
        assert!(parse_language_listing("").is_empty());
    }

    #[test]
    fn test_parse_language_listing_skips_noise() {
        let listing = "Warning: something odd\nList of available languages (1):\n  eng  \n";
        let langs = parse_language_listing(listing);
        assert!(langs.contains("eng"));
        assert!(!langs.iter().any(|l| l.contains(' ')));
    }

    #[tokio::test]
    #[serial]
    async fn test_verify_engine_reports_missing_language() {
        // Only meaningful where tesseract itself is installed.
        if Command::new("tesseract").arg("--version").output().await.is_err() {
            return;
        }

        let result = verify_engine("zzz_not_a_language").await;
        if ENGINE_VALIDATED.get().is_none() {
            assert!(matches!(result.unwrap_err(), OcrError::LanguageMissing(_)));
        }
    }
}
