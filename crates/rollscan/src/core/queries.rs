//! Search-query loading.
//!
//! The names list is a UTF-8 text file with one target name per line. It is
//! loaded once per run, under resource caps, and each surviving line is
//! normalized exactly once into a [`SearchQuery`] so later comparisons never
//! re-normalize the query side.

use crate::core::config::SearchConfig;
use crate::types::SearchQuery;
use crate::{Result, RollscanError};
use std::collections::HashSet;
use std::path::Path;

/// Load, validate, deduplicate and normalize the names list.
///
/// Fatal-for-the-run failures: file larger than the configured cap, non-UTF-8
/// content, an empty list, or more names than `max_query_names` (excess is
/// rejected, never silently truncated).
pub fn load_search_queries(path: &Path, config: &SearchConfig) -> Result<Vec<SearchQuery>> {
    let metadata = std::fs::metadata(path)?;
    let max_bytes = config.max_names_file_size_mb * 1024 * 1024;
    if metadata.len() > max_bytes {
        return Err(RollscanError::resource_limit(format!(
            "names file is {:.1}MB (max: {}MB): {}",
            metadata.len() as f64 / (1024.0 * 1024.0),
            config.max_names_file_size_mb,
            path.display()
        )));
    }

    let bytes = std::fs::read(path)?;
    let content = String::from_utf8(bytes)
        .map_err(|e| RollscanError::validation_with_source(format!("names file must be UTF-8: {}", path.display()), e))?;

    let mut seen = HashSet::new();
    let mut queries = Vec::new();
    for line in content.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_string()) {
            queries.push(SearchQuery::new(name));
        }
    }

    if queries.is_empty() {
        return Err(RollscanError::validation(format!(
            "names file contains no names: {}",
            path.display()
        )));
    }

    if queries.len() > config.max_query_names {
        return Err(RollscanError::resource_limit(format!(
            "names file contains {} names (max: {}): {}",
            queries.len(),
            config.max_query_names,
            path.display()
        )));
    }

    tracing::info!(count = queries.len(), "loaded search names");
    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_names(dir: &tempfile::TempDir, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join("names.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_load_basic_list() {
        let dir = tempdir().unwrap();
        let path = write_names(&dir, "রহিম আলী\nকরিম মিয়া\n".as_bytes());

        let queries = load_search_queries(&path, &SearchConfig::default()).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].raw, "রহিম আলী");
        assert_eq!(queries[0].normalized, "রহিমআলী");
    }

    #[test]
    fn test_blank_lines_and_padding_ignored() {
        let dir = tempdir().unwrap();
        let path = write_names(&dir, "\n  রহিম  \n\n\nকরিম\n   \n".as_bytes());

        let queries = load_search_queries(&path, &SearchConfig::default()).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].raw, "রহিম");
    }

    #[test]
    fn test_duplicates_removed_order_preserved() {
        let dir = tempdir().unwrap();
        let path = write_names(&dir, "করিম\nরহিম\nকরিম\nরহিম\n".as_bytes());

        let queries = load_search_queries(&path, &SearchConfig::default()).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].raw, "করিম");
        assert_eq!(queries[1].raw, "রহিম");
    }

    #[test]
    fn test_empty_file_rejected() {
        let dir = tempdir().unwrap();
        let path = write_names(&dir, b"\n\n");

        let result = load_search_queries(&path, &SearchConfig::default());
        assert!(matches!(result.unwrap_err(), RollscanError::Validation { .. }));
    }

    #[test]
    fn test_non_utf8_rejected() {
        let dir = tempdir().unwrap();
        let path = write_names(&dir, &[0xff, 0xfe, 0x41]);

        let result = load_search_queries(&path, &SearchConfig::default());
        assert!(matches!(result.unwrap_err(), RollscanError::Validation { .. }));
    }

    #[test]
    fn test_too_many_names_rejected_not_truncated() {
        let dir = tempdir().unwrap();
        let mut content = String::new();
        for i in 0..5 {
            content.push_str(&format!("নাম{i}\n"));
        }
        let path = write_names(&dir, content.as_bytes());

        let config = SearchConfig {
            max_query_names: 3,
            ..Default::default()
        };
        let result = load_search_queries(&path, &config);
        assert!(matches!(result.unwrap_err(), RollscanError::ResourceLimit { .. }));
    }

    #[test]
    fn test_oversized_file_rejected_before_read() {
        let dir = tempdir().unwrap();
        let path = write_names(&dir, &vec![b'a'; 2048]);

        let config = SearchConfig {
            max_names_file_size_mb: 0,
            ..Default::default()
        };
        let result = load_search_queries(&path, &config);
        assert!(matches!(result.unwrap_err(), RollscanError::ResourceLimit { .. }));
    }

    #[test]
    fn test_queries_are_normalized_once_at_load() {
        let dir = tempdir().unwrap();
        let path = write_names(&dir, "নামঃ রহিম।\n".as_bytes());

        let queries = load_search_queries(&path, &SearchConfig::default()).unwrap();
        assert_eq!(queries[0].normalized, "নামরহিম");
    }
}
