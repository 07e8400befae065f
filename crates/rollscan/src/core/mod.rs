//! Core orchestration module.
//!
//! This module holds the configuration surface, input validation, query
//! loading, document discovery, and the batch pipeline that ties the
//! ingest/OCR/extract/match stages together.

pub mod config;
pub mod io;
pub mod paths;
pub mod pipeline;
pub mod queries;

pub use config::SearchConfig;
pub use pipeline::{BatchReport, BatchRunner, ResultAggregator, discover_documents};
pub use queries::load_search_queries;
