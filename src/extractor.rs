//! Batch extraction: scan a directory of exports, compute each file's
//! response times, assemble the result table and write it out.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::{ExtractConfig, TimingMarkers};
use crate::output::write_table;
use crate::parser::QuestionParser;
use crate::scan::{file_label, list_export_files};
use crate::stats::FileSummary;
use crate::table::ResultTable;
use crate::timing::{ResponseTime, response_times};

/// Result of one batch run.
#[derive(Debug, Default)]
pub struct Extraction {
    pub table: ResultTable,
    pub summaries: Vec<FileSummary>,
}

/// Reads one export and computes its per-question response times.
///
/// # Errors
///
/// Any read, parse or timestamp failure; the error names the file.
#[tracing::instrument(skip_all, fields(file = %path.display()))]
pub fn extract_file(
    path: &Path,
    parser: &QuestionParser,
    markers: &TimingMarkers,
) -> Result<Vec<ResponseTime>> {
    let html = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let blocks = parser
        .parse(&html)
        .with_context(|| format!("parsing questions in {}", path.display()))?;
    debug!(blocks = blocks.len(), "Question blocks parsed");

    let times = response_times(&blocks, markers)
        .with_context(|| format!("computing response times for {}", path.display()))?;

    Ok(times)
}

/// Processes every export under `config.input_dir`, one file at a time in
/// listing order. Nothing is written.
pub fn extract_directory(config: &ExtractConfig) -> Result<Extraction> {
    let parser = QuestionParser::new()?;
    let files = list_export_files(&config.input_dir, &config.extension)?;
    info!(
        dir = %config.input_dir.display(),
        files = files.len(),
        "Export files found"
    );

    let mut extraction = Extraction::default();

    for path in &files {
        let label = file_label(path);
        let times = extract_file(path, &parser, &config.markers)?;

        let summary = FileSummary::from_times(&label, &times);
        info!(
            file = %label,
            questions = summary.questions,
            answered = summary.answered,
            total_seconds = summary.total_seconds,
            "File processed"
        );

        extraction
            .table
            .push_column(label, times.iter().map(ResponseTime::seconds).collect());
        extraction.summaries.push(summary);
    }

    Ok(extraction)
}

/// Full run: extract, then replace `config.output_path` with the new table.
///
/// The previous output is only removed once every input has been processed,
/// so a failing run leaves it in place.
pub fn run(config: &ExtractConfig) -> Result<Extraction> {
    let extraction = extract_directory(config)?;

    write_table(&config.output_path, &extraction.table, config.format)
        .with_context(|| format!("writing {}", config.output_path.display()))?;

    Ok(extraction)
}
