//! Result rendering and export.
//!
//! The core hands the CLI an ordered result list plus a stats snapshot; this
//! module turns them into a console table, a stats summary, and optional
//! JSON/CSV files.

use anyhow::{Context, Result, bail};
use rollscan::{ProcessingStats, SearchResult};
use std::fs;
use std::path::Path;

/// Export format resolved from the `--format` flag or the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

/// Pick the export format, falling back to the output file's extension.
pub fn resolve_format(explicit: Option<ExportFormat>, output_path: &Path) -> Result<ExportFormat> {
    if let Some(format) = explicit {
        return Ok(format);
    }
    match output_path.extension().and_then(|e| e.to_str()).map(str::to_lowercase) {
        Some(ext) if ext == "json" => Ok(ExportFormat::Json),
        Some(ext) if ext == "csv" => Ok(ExportFormat::Csv),
        other => bail!(
            "cannot detect export format from extension {:?}; use .json or .csv, or pass --format",
            other.unwrap_or_default()
        ),
    }
}

/// Write results to `output_path` in the given format.
pub fn export_results(results: &[SearchResult], output_path: &Path, format: ExportFormat) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }

    match format {
        ExportFormat::Json => write_json(results, output_path),
        ExportFormat::Csv => write_csv(results, output_path),
    }
}

fn write_json(results: &[SearchResult], output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results).context("failed to serialize results")?;
    fs::write(output_path, json).with_context(|| format!("failed to write {}", output_path.display()))?;
    Ok(())
}

fn write_csv(results: &[SearchResult], output_path: &Path) -> Result<()> {
    let mut content = String::from("file,page,name,guardian,query,score\n");
    for result in results {
        content.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_field(&result.source_file.display().to_string()),
            result.page_number,
            csv_field(&result.matched_record.name),
            csv_field(result.matched_record.guardian_name.as_deref().unwrap_or("")),
            csv_field(&result.query_name),
            result.score,
        ));
    }
    fs::write(output_path, content).with_context(|| format!("failed to write {}", output_path.display()))?;
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Column-aligned match table for the console.
pub fn render_table(results: &[SearchResult]) -> String {
    let headers = ["File", "Page", "Name", "Father / Guardian", "Query", "Score"];
    let rows: Vec<[String; 6]> = results
        .iter()
        .map(|r| {
            [
                r.source_file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| r.source_file.display().to_string()),
                r.page_number.to_string(),
                r.matched_record.name.clone(),
                r.matched_record.guardian_name.clone().unwrap_or_default(),
                r.query_name.clone(),
                r.score.to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut table = format!("Electoral Roll Matches ({} found)\n", results.len());
    let format_row = |cells: &[&str]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let pad = widths[i].saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    table.push_str(&format_row(&headers));
    table.push('\n');
    table.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    table.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        table.push_str(&format_row(&cells));
        table.push('\n');
    }
    table
}

/// Final batch summary: counters plus the failed-document list.
pub fn render_stats(stats: &ProcessingStats) -> String {
    let mut summary = String::from("Processing Statistics:\n");
    summary.push_str(&format!("  Files processed: {}\n", stats.files_processed));
    summary.push_str(&format!("  Files failed:    {}\n", stats.files_failed));
    summary.push_str(&format!("  Pages processed: {}\n", stats.pages_processed));
    summary.push_str(&format!("  Pages skipped:   {}\n", stats.pages_skipped));
    summary.push_str(&format!("  Matches found:   {}\n", stats.matches_found));

    if !stats.errors.is_empty() {
        summary.push_str(&format!("\nErrors ({}):\n", stats.errors.len()));
        for error in &stats.errors {
            summary.push_str(&format!(
                "  - {} [{}]: {}\n",
                error.file.display(),
                error.stage,
                error.message
            ));
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollscan::{ProcessingStage, VoterInfo};
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn sample_result() -> SearchResult {
        SearchResult {
            query_name: "রহিম আলী".to_string(),
            matched_record: VoterInfo {
                name: "রহিম আলি".to_string(),
                guardian_name: Some("করিম মিয়া".to_string()),
                page_number: 3,
                source_file: PathBuf::from("rolls/ward7.pdf"),
            },
            score: 86,
            source_file: PathBuf::from("rolls/ward7.pdf"),
            page_number: 3,
        }
    }

    #[test]
    fn test_resolve_format_explicit_wins() {
        let format = resolve_format(Some(ExportFormat::Csv), Path::new("out.json")).unwrap();
        assert_eq!(format, ExportFormat::Csv);
    }

    #[test]
    fn test_resolve_format_from_extension() {
        assert_eq!(resolve_format(None, Path::new("out.json")).unwrap(), ExportFormat::Json);
        assert_eq!(resolve_format(None, Path::new("out.CSV")).unwrap(), ExportFormat::Csv);
    }

    #[test]
    fn test_resolve_format_unknown_extension() {
        assert!(resolve_format(None, Path::new("out.xlsx")).is_err());
        assert!(resolve_format(None, Path::new("out")).is_err());
    }

    #[test]
    fn test_export_json_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.json");

        export_results(&[sample_result()], &path, ExportFormat::Json).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let parsed: Vec<SearchResult> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].score, 86);
        assert_eq!(parsed[0].matched_record.name, "রহিম আলি");
    }

    #[test]
    fn test_export_csv_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.csv");

        export_results(&[sample_result()], &path, ExportFormat::Csv).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("file,page,name,guardian,query,score"));
        let row = lines.next().unwrap();
        assert!(row.contains("ward7.pdf"));
        assert!(row.contains("রহিম আলি"));
        assert!(row.ends_with(",86"));
    }

    #[test]
    fn test_export_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deep/results.json");

        export_results(&[], &path, ExportFormat::Json).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_csv_field_escaping() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_render_table_contains_fields() {
        let table = render_table(&[sample_result()]);
        assert!(table.contains("1 found"));
        assert!(table.contains("ward7.pdf"));
        assert!(table.contains("রহিম আলি"));
        assert!(table.contains("করিম মিয়া"));
        assert!(table.contains("86"));
    }

    #[test]
    fn test_render_stats_includes_errors() {
        let mut stats = ProcessingStats::new();
        stats.record_file_processed();
        stats.record_file_failed();
        stats.record_error("bad.pdf", ProcessingStage::Validation, "missing %PDF- signature");

        let summary = render_stats(&stats);
        assert!(summary.contains("Files processed: 1"));
        assert!(summary.contains("Files failed:    1"));
        assert!(summary.contains("bad.pdf"));
        assert!(summary.contains("validation"));
    }
}
