//! Document validation and page rasterization.
//!
//! [`DocumentIngestor`] gates every candidate file before any expensive work
//! happens, in a fixed order: magic signature (reading only the first bytes),
//! file size (from metadata, before the body is read), then declared page
//! count. Only a document that clears all three produces a [`PageImages`]
//! sequence, which rasterizes lazily so at most one page bitmap is resident
//! at a time.

pub mod error;
pub(crate) mod rendering;

use crate::core::config::SearchConfig;
use crate::{Result, RollscanError};
use image::DynamicImage;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Leading bytes every PDF starts with.
const PDF_MAGIC: &[u8; 5] = b"%PDF-";

/// Validates candidate documents and opens them for page-by-page
/// rasterization.
#[derive(Debug, Clone)]
pub struct DocumentIngestor {
    dpi: u32,
    max_size_bytes: u64,
    max_pages: usize,
}

impl DocumentIngestor {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            dpi: config.dpi,
            max_size_bytes: config.max_document_size_mb * 1024 * 1024,
            max_pages: config.max_document_pages,
        }
    }

    /// Validate `path` and open it as a lazy page sequence.
    ///
    /// Fails with `InvalidFormat` on a bad signature, `ResourceLimit` on an
    /// over-size or over-long document, and `Document` when the body cannot
    /// be parsed. The page-count check happens before any rasterization.
    pub fn open(&self, path: &Path) -> Result<PageImages> {
        let mut header = [0u8; PDF_MAGIC.len()];
        let mut file = std::fs::File::open(path)?;
        match file.read_exact(&mut header) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(RollscanError::invalid_format(format!(
                    "file too short for %PDF- signature: {}",
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        }
        if &header != PDF_MAGIC {
            return Err(RollscanError::invalid_format(format!(
                "missing %PDF- signature: {}",
                path.display()
            )));
        }

        let size = file.metadata()?.len();
        if size > self.max_size_bytes {
            return Err(RollscanError::resource_limit(format!(
                "document is {:.1}MB (max: {}MB): {}",
                size as f64 / (1024.0 * 1024.0),
                self.max_size_bytes / (1024 * 1024),
                path.display()
            )));
        }
        drop(file);

        let bytes = std::fs::read(path)?;
        let page_count = rendering::page_count(&bytes)?;
        if page_count > self.max_pages {
            return Err(RollscanError::resource_limit(format!(
                "document has {} pages (max: {}): {}",
                page_count,
                self.max_pages,
                path.display()
            )));
        }

        tracing::debug!(path = %path.display(), pages = page_count, "document opened");

        Ok(PageImages {
            source_file: path.to_path_buf(),
            bytes,
            dpi: self.dpi,
            page_count,
            next_index: 0,
        })
    }
}

/// Lazy, finite, non-restartable sequence of rasterized pages.
///
/// Each call to [`next_page`](Self::next_page) renders exactly one page; the
/// caller is expected to drop the returned [`PageImage`] before asking for
/// the next one, which keeps peak memory at a single page bitmap no matter
/// how large the document is. Rendering failures surface as
/// [`error::DocumentError`] and the remaining pages are not retried.
#[derive(Debug)]
pub struct PageImages {
    source_file: PathBuf,
    bytes: Vec<u8>,
    dpi: u32,
    page_count: usize,
    next_index: usize,
}

/// One rasterized page. Dropping it releases the bitmap.
pub struct PageImage {
    /// 1-based page number.
    pub number: u32,
    pub image: DynamicImage,
}

impl PageImages {
    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Rasterize the next page, or `None` once the document is exhausted.
    pub fn next_page(&mut self) -> Option<error::Result<PageImage>> {
        if self.next_index >= self.page_count {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;

        Some(rendering::render_page(&self.bytes, index, self.dpi).map(|image| PageImage {
            number: (index + 1) as u32,
            image,
        }))
    }
}
