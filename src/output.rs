//! Output formatting and persistence for response-time tables.
//!
//! Supports XLSX and CSV table output, plus pretty and JSON logging of
//! per-file summaries.

use anyhow::Result;
use clap::ValueEnum;
use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, info};

use crate::stats::FileSummary;
use crate::table::ResultTable;
use csv::WriterBuilder;
use std::fs;
use std::path::Path;

pub const SHEET_NAME: &str = "Time Difference in Seconds";
pub const ROW_LABEL: &str = "Question Number";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

impl OutputFormat {
    /// `.csv` paths get CSV; anything else is written as a workbook.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => OutputFormat::Csv,
            _ => OutputFormat::Xlsx,
        }
    }
}

/// Logs a [`FileSummary`] using Rust's debug pretty-print format.
pub fn print_pretty(summary: &FileSummary) {
    debug!("{:#?}", summary);
}

/// Logs a [`FileSummary`] as pretty-printed JSON.
pub fn print_json(summary: &FileSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Writes `table` to `path`, replacing whatever file is already there.
///
/// The parent directory is created if needed.
pub fn write_table(path: &Path, table: &ResultTable, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    if path.exists() {
        fs::remove_file(path)?;
        debug!(path = %path.display(), "Removed previous output");
    }

    match format {
        OutputFormat::Xlsx => write_xlsx(path, table)?,
        OutputFormat::Csv => write_csv(path, table)?,
    }

    info!(
        path = %path.display(),
        ?format,
        columns = table.column_count(),
        rows = table.row_count(),
        "Response times written"
    );

    Ok(())
}

/// Single-sheet workbook: header row of file names, question numbers in
/// column A, blank cells where a file has no entry.
pub fn write_xlsx(path: &Path, table: &ResultTable) -> Result<()> {
    let header = Format::new().set_bold();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    worksheet.write_string_with_format(0, 0, ROW_LABEL, &header)?;
    for (index, label) in table.column_labels().enumerate() {
        worksheet.write_string_with_format(0, u16::try_from(index + 1)?, label, &header)?;
    }

    for (question, cells) in table.rows() {
        let row = u32::try_from(question)?;
        worksheet.write_number_with_format(row, 0, question as f64, &header)?;

        for (index, cell) in cells.iter().enumerate() {
            if let Some(seconds) = cell {
                worksheet.write_number(row, u16::try_from(index + 1)?, *seconds)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Same layout as [`write_xlsx`]; absent cells are empty fields.
pub fn write_csv(path: &Path, table: &ResultTable) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;

    let mut header = vec![ROW_LABEL.to_string()];
    header.extend(table.column_labels().map(str::to_string));
    writer.write_record(&header)?;

    for (question, cells) in table.rows() {
        let mut record = vec![question.to_string()];
        record.extend(
            cells
                .iter()
                .map(|cell| cell.map(|s| s.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
