//! rollscan CLI
//!
//! Searches a directory of scanned Bengali electoral-roll PDFs for a list of
//! names using OCR and fuzzy matching. Configuration comes from defaults, an
//! optional TOML file, `ROLLSCAN_*` environment variables, and flags, in
//! that order of precedence.

mod output;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use output::ExportFormat;
use rollscan::{BatchRunner, SearchConfig, load_search_queries, require_dir, require_file};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    /// Detect from the output file extension
    Auto,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "rollscan")]
#[command(about = "Search scanned Bengali electoral-roll PDFs for names using OCR", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory containing electoral-roll PDFs (searched recursively)
    directory: PathBuf,

    /// UTF-8 file with one target name per line
    #[arg(short = 'n', long)]
    names_file: PathBuf,

    /// Fuzzy match threshold (0-100)
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Tesseract language model
    #[arg(short, long)]
    language: Option<String>,

    /// Rasterization resolution in DPI
    #[arg(long)]
    dpi: Option<u32>,

    /// Per-page OCR timeout in seconds
    #[arg(long)]
    page_timeout: Option<u64>,

    /// Maximum document size in MB
    #[arg(long)]
    max_size: Option<u64>,

    /// Maximum pages per document
    #[arg(long)]
    max_pages: Option<usize>,

    /// Load configuration from a TOML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save results to a file (.json or .csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export format
    #[arg(short = 'f', long, value_enum, default_value = "auto")]
    format: CliFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn env_override<T: FromStr>(config_value: &mut T, name: &str) -> Result<()>
where
    T::Err: std::fmt::Display,
{
    if let Ok(raw) = std::env::var(name) {
        match raw.parse() {
            Ok(value) => *config_value = value,
            Err(e) => bail!("invalid value for {name}: {e}"),
        }
    }
    Ok(())
}

/// Defaults <- config file <- environment <- flags.
fn build_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::from_toml_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => SearchConfig::default(),
    };

    env_override(&mut config.dpi, "ROLLSCAN_DPI")?;
    env_override(&mut config.language, "ROLLSCAN_LANG")?;
    env_override(&mut config.page_timeout_secs, "ROLLSCAN_PAGE_TIMEOUT")?;
    env_override(&mut config.max_document_size_mb, "ROLLSCAN_MAX_PDF_MB")?;
    env_override(&mut config.max_document_pages, "ROLLSCAN_MAX_PAGES")?;
    env_override(&mut config.max_names_file_size_mb, "ROLLSCAN_MAX_NAMES_MB")?;
    env_override(&mut config.max_query_names, "ROLLSCAN_MAX_NAMES")?;
    env_override(&mut config.threshold, "ROLLSCAN_THRESHOLD")?;

    if let Some(dpi) = cli.dpi {
        config.dpi = dpi;
    }
    if let Some(ref language) = cli.language {
        config.language = language.clone();
    }
    if let Some(secs) = cli.page_timeout {
        config.page_timeout_secs = secs;
    }
    if let Some(mb) = cli.max_size {
        config.max_document_size_mb = mb;
    }
    if let Some(pages) = cli.max_pages {
        config.max_document_pages = pages;
    }
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }

    config.validate()?;
    Ok(config)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "rollscan=debug,info" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let directory = require_dir(&cli.directory, None).context("invalid input directory")?;
    let names_path = require_file(&cli.names_file, None).context("invalid names file")?;

    let config = build_config(&cli)?;
    let queries = load_search_queries(&names_path, &config).context("loading names file")?;

    let runner = BatchRunner::new(config)?;
    let report = runner.run(&directory, &queries).await?;

    if report.results.is_empty() {
        println!("No matches found");
    } else {
        println!("{}", output::render_table(&report.results));
    }

    if let Some(ref output_path) = cli.output {
        let format = match cli.format {
            CliFormat::Auto => output::resolve_format(None, output_path)?,
            CliFormat::Json => ExportFormat::Json,
            CliFormat::Csv => ExportFormat::Csv,
        };
        output::export_results(&report.results, output_path, format)?;
        println!("Results saved to {}", output_path.display());
    }

    println!();
    print!("{}", output::render_stats(&report.stats));

    Ok(())
}
