//! Batch orchestration.
//!
//! [`BatchRunner`] drives the whole run: engine preflight, deterministic
//! document discovery, and the strictly sequential per-document loop. Every
//! document is processed inside [`process_document`](BatchRunner), which
//! always resolves to an outcome - nothing raised while validating,
//! rasterizing, recognizing, or extracting a single document can escape past
//! the batch loop. The stats tracker and result aggregator are owned by the
//! loop alone; no other writer exists.
//!
//! Results come out in document-then-page-then-query order, deterministic
//! for deterministic OCR output.

use crate::core::config::SearchConfig;
use crate::core::io::find_files_by_extension;
use crate::extract::extract_voter_blocks;
use crate::ingest::DocumentIngestor;
use crate::ocr::{OcrEngine, OcrOutcome, verify_engine};
use crate::text::{normalize_bengali, token_set_ratio};
use crate::types::{ProcessingStage, ProcessingStats, SearchQuery, SearchResult};
use crate::Result;
use std::path::{Path, PathBuf};

/// Collects match results in the order they are produced.
///
/// No deduplication and no sorting; presentation ordering is the renderer's
/// concern.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    results: Vec<SearchResult>,
}

impl ResultAggregator {
    pub fn push(&mut self, result: SearchResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
    }
}

/// Final output of one batch run: ordered results plus a frozen stats
/// snapshot. Serialization and display are the caller's concern.
#[derive(Debug)]
pub struct BatchReport {
    pub results: Vec<SearchResult>,
    pub stats: ProcessingStats,
}

/// How a single document left the boundary.
#[derive(Debug)]
enum DocumentOutcome {
    Processed,
    Failed { stage: ProcessingStage, message: String },
}

/// Sequential, failure-isolated batch processor.
pub struct BatchRunner {
    config: SearchConfig,
    ingestor: DocumentIngestor,
    engine: OcrEngine,
}

impl BatchRunner {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let ingestor = DocumentIngestor::new(&config);
        let engine = OcrEngine::new(&config);
        Ok(Self {
            config,
            ingestor,
            engine,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the full batch over `directory`.
    ///
    /// Fails fast - before touching any document - when the OCR engine or
    /// its language data is unavailable. After that point the run always
    /// completes: per-document failures are recorded and skipped over.
    pub async fn run(&self, directory: &Path, queries: &[SearchQuery]) -> Result<BatchReport> {
        verify_engine(&self.config.language).await?;

        let documents = discover_documents(directory)?;
        tracing::info!(count = documents.len(), directory = %directory.display(), "starting batch");

        Ok(self.process_all(&documents, queries).await)
    }

    /// Process an explicit document list. Infallible by design: every
    /// per-document error ends up in the stats, not in a `Result`.
    async fn process_all(&self, documents: &[PathBuf], queries: &[SearchQuery]) -> BatchReport {
        let mut stats = ProcessingStats::new();
        let mut aggregator = ResultAggregator::default();

        for path in documents {
            match self.process_document(path, queries, &mut stats, &mut aggregator).await {
                DocumentOutcome::Processed => {
                    stats.record_file_processed();
                }
                DocumentOutcome::Failed { stage, message } => {
                    tracing::error!(file = %path.display(), %stage, error = %message, "document failed");
                    stats.record_file_failed();
                    stats.record_error(path.clone(), stage, message);
                }
            }
        }

        tracing::info!(
            files_processed = stats.files_processed,
            files_failed = stats.files_failed,
            matches = stats.matches_found,
            "batch complete"
        );

        BatchReport {
            results: aggregator.into_results(),
            stats,
        }
    }

    /// The per-document boundary.
    ///
    /// Validates, rasterizes, recognizes and extracts one document, page by
    /// page. Page images are rendered lazily and dropped before the next
    /// page is requested, so at most one page bitmap is resident. OCR
    /// timeouts and per-page recognition failures skip the page; a
    /// mid-rasterization error abandons the remaining pages and fails the
    /// document.
    async fn process_document(
        &self,
        path: &Path,
        queries: &[SearchQuery],
        stats: &mut ProcessingStats,
        aggregator: &mut ResultAggregator,
    ) -> DocumentOutcome {
        tracing::info!(file = %path.display(), "processing document");

        let mut pages = match self.ingestor.open(path) {
            Ok(pages) => pages,
            Err(e) => {
                return DocumentOutcome::Failed {
                    stage: ProcessingStage::Validation,
                    message: e.to_string(),
                };
            }
        };

        while let Some(rendered) = pages.next_page() {
            let page = match rendered {
                Ok(page) => page,
                Err(e) => {
                    return DocumentOutcome::Failed {
                        stage: ProcessingStage::Rasterization,
                        message: e.to_string(),
                    };
                }
            };

            let page_number = page.number;
            let recognized = self.engine.recognize(&page.image).await;
            // Release the bitmap before anything else happens with this page.
            drop(page);

            let text = match recognized {
                Ok(OcrOutcome::Text(text)) => text,
                Ok(OcrOutcome::TimedOut) => {
                    stats.record_page_skipped();
                    continue;
                }
                Err(e) => {
                    tracing::warn!(file = %path.display(), page = page_number, error = %e, "page recognition failed");
                    stats.record_page_skipped();
                    continue;
                }
            };

            stats.record_page_processed();

            let extraction = extract_voter_blocks(&text, page_number, path);
            tracing::debug!(
                file = %path.display(),
                page = page_number,
                records = extraction.records.len(),
                misses = extraction.misses,
                "page extracted"
            );

            for record in extraction.records {
                for result in self.matches_for_record(&record, queries) {
                    stats.record_match();
                    tracing::info!(
                        query = %result.query_name,
                        name = %record.name,
                        score = result.score,
                        page = page_number,
                        "match found"
                    );
                    aggregator.push(result);
                }
            }
        }

        DocumentOutcome::Processed
    }

    /// Score one record against every query, in query order.
    ///
    /// The candidate is normalized exactly once and reused for all queries;
    /// queries were normalized once at load time.
    fn matches_for_record(&self, record: &crate::types::VoterInfo, queries: &[SearchQuery]) -> Vec<SearchResult> {
        let candidate = normalize_bengali(&record.name);
        let mut results = Vec::new();
        for query in queries {
            let score = token_set_ratio(&query.normalized, &candidate);
            if score >= self.config.threshold {
                results.push(SearchResult {
                    query_name: query.raw.clone(),
                    score,
                    source_file: record.source_file.clone(),
                    page_number: record.page_number,
                    matched_record: record.clone(),
                });
            }
        }
        results
    }
}

/// All PDF files under `directory`, recursively, in sorted order so batch
/// output is deterministic.
pub fn discover_documents(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = find_files_by_extension(directory, "pdf", true)?;
    documents.sort();
    Ok(documents)
}
