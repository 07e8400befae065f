use std::fmt;

/// Failures raised while opening or rasterizing a single document.
///
/// These never cross the document boundary: the batch loop records them and
/// moves on to the next file.
#[derive(Debug, Clone)]
pub enum DocumentError {
    InvalidPdf(String),
    PageNotFound(usize),
    RenderingFailed(String),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::InvalidPdf(msg) => write!(f, "Invalid PDF: {}", msg),
            DocumentError::PageNotFound(page) => write!(f, "Page {} not found", page),
            DocumentError::RenderingFailed(msg) => write!(f, "Page rendering failed: {}", msg),
        }
    }
}

impl std::error::Error for DocumentError {}

// NOTE: No From<std::io::Error> impl - IO errors must bubble up unchanged per error handling policy

pub type Result<T> = std::result::Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pdf_error() {
        let err = DocumentError::InvalidPdf("corrupted header".to_string());
        assert_eq!(err.to_string(), "Invalid PDF: corrupted header");
    }

    #[test]
    fn test_page_not_found_error() {
        let err = DocumentError::PageNotFound(5);
        assert_eq!(err.to_string(), "Page 5 not found");
    }

    #[test]
    fn test_rendering_failed_error() {
        let err = DocumentError::RenderingFailed("out of memory".to_string());
        assert_eq!(err.to_string(), "Page rendering failed: out of memory");
    }

    #[test]
    fn test_error_clone() {
        let err1 = DocumentError::PageNotFound(3);
        let err2 = err1.clone();
        assert_eq!(err1.to_string(), err2.to_string());
    }
}
