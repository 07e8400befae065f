//! Core value types shared across the pipeline.
//!
//! Every record flowing through the batch is one of the fixed-schema types
//! defined here. `VoterInfo` and `SearchResult` are immutable once built;
//! `ProcessingStats` is mutated only by the orchestrating loop and its
//! counters never decrease.

use crate::text::normalize_bengali;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One voter record recovered from a page of OCR text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterInfo {
    /// Voter name as recognized (raw script text, for display).
    pub name: String,
    /// Father's or husband's name, when a guardian label was found.
    pub guardian_name: Option<String>,
    /// 1-based page the record was found on.
    pub page_number: u32,
    /// Document the record came from.
    pub source_file: PathBuf,
}

/// A target name to search for, normalized exactly once at load time.
///
/// The normalized form is reused for every comparison so normalization cost
/// is paid per query, not per (query, candidate) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub raw: String,
    pub normalized: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize_bengali(&raw);
        Self { raw, normalized }
    }
}

/// A fuzzy match between a query and an extracted voter record.
///
/// Created only when the score clears the configured threshold. Several
/// results may reference the same query or the same record; no deduplication
/// is performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub query_name: String,
    pub matched_record: VoterInfo,
    /// Similarity of the normalized query and normalized candidate, 0-100.
    pub score: u8,
    pub source_file: PathBuf,
    pub page_number: u32,
}

/// Pipeline stage an error was recorded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStage {
    Validation,
    Rasterization,
    Recognition,
    Extraction,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Validation => write!(f, "validation"),
            ProcessingStage::Rasterization => write!(f, "rasterization"),
            ProcessingStage::Recognition => write!(f, "recognition"),
            ProcessingStage::Extraction => write!(f, "extraction"),
        }
    }
}

/// One per-document failure, recorded in batch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingError {
    pub file: PathBuf,
    pub stage: ProcessingStage,
    pub message: String,
}

/// Counters and error records accumulated over one batch run.
///
/// Owned exclusively by the batch loop while processing; handed out inside
/// the final report, where ownership makes the snapshot read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub files_processed: u64,
    pub files_failed: u64,
    pub pages_processed: u64,
    /// Pages abandoned on OCR timeout or recognition failure.
    pub pages_skipped: u64,
    pub matches_found: u64,
    pub errors: Vec<ProcessingError>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_file_processed(&mut self) {
        self.files_processed += 1;
    }

    pub fn record_file_failed(&mut self) {
        self.files_failed += 1;
    }

    pub fn record_page_processed(&mut self) {
        self.pages_processed += 1;
    }

    pub fn record_page_skipped(&mut self) {
        self.pages_skipped += 1;
    }

    pub fn record_match(&mut self) {
        self.matches_found += 1;
    }

    pub fn record_error(&mut self, file: impl Into<PathBuf>, stage: ProcessingStage, message: impl Into<String>) {
        self.errors.push(ProcessingError {
            file: file.into(),
            stage,
            message: message.into(),
        });
    }
}
