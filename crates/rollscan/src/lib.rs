//! Rollscan - OCR search over scanned Bengali electoral rolls
//!
//! Rollscan rasterizes scanned electoral-roll PDFs, recognizes each page
//! with Tesseract, extracts voter name/guardian records from the noisy
//! output, and fuzzy-matches them against a list of target names.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rollscan::{BatchRunner, SearchConfig, SearchQuery};
//!
//! # async fn example() -> rollscan::Result<()> {
//! let config = SearchConfig::default();
//! let queries = vec![SearchQuery::new("রহিম আলী")];
//!
//! let runner = BatchRunner::new(config)?;
//! let report = runner.run(std::path::Path::new("rolls/"), &queries).await?;
//! println!("{} matches in {} files", report.results.len(), report.stats.files_processed);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core** (`core`): configuration, path confinement, query loading,
//!   document discovery, and the sequential batch pipeline
//! - **Ingest** (`ingest`): document validation and lazy page rasterization
//! - **OCR** (`ocr`): Tesseract subprocess invocation under a per-page deadline
//! - **Extract** (`extract`): bounded-pattern voter-record extraction
//! - **Text** (`text`): Bengali normalization and token-set similarity
//!
//! # Failure Model
//!
//! A missing OCR engine or an invalid input path aborts the run before any
//! document is touched. Everything after that is isolated: a corrupt
//! document, an over-limit file, or a page that times out is recorded in the
//! final [`ProcessingStats`] and never stops the batch.

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod ocr;
pub mod text;
pub mod types;

pub use error::{Result, RollscanError};
pub use types::{ProcessingError, ProcessingStage, ProcessingStats, SearchQuery, SearchResult, VoterInfo};

pub use core::config::SearchConfig;
pub use core::paths::{require_dir, require_file, resolve_secure};
pub use core::pipeline::{BatchReport, BatchRunner, ResultAggregator, discover_documents};
pub use core::queries::load_search_queries;

pub use extract::{PageExtraction, extract_voter_blocks};
pub use ingest::{DocumentIngestor, PageImage, PageImages};
pub use ocr::{OcrEngine, OcrOutcome, verify_engine};
pub use text::{normalize_bengali, token_set_ratio};
