//! OCR subsystem.
//!
//! Recognition runs through the external `tesseract` binary: one child
//! process per page, fixed page-segmentation mode (a single uniform block of
//! text), hard per-page deadline. Engine and language availability are
//! verified once at startup via [`verify_engine`] so a missing installation
//! fails the run before any document is processed.

pub mod engine;
pub mod error;
pub mod preflight;

pub use engine::{OcrEngine, OcrOutcome};
pub use error::OcrError;
pub use preflight::verify_engine;
