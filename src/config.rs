//! Run parameters for an extraction.

use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

pub const DEFAULT_OUTPUT_FILE: &str = "all_response_times.xlsx";
pub const DEFAULT_EXTENSION: &str = "html";
pub const DEFAULT_STARTED_MARKER: &str = "Iniciado/a";
pub const DEFAULT_SAVED_MARKER: &str = "Guardada:";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%y, %H:%M:%S";

/// Labels and timestamp format used to read a question's timing table.
#[derive(Debug, Clone)]
pub struct TimingMarkers {
    pub started: String,
    pub saved: String,
    /// chrono strftime format of the timestamp cell.
    pub timestamp_format: String,
}

impl Default for TimingMarkers {
    fn default() -> Self {
        Self {
            started: DEFAULT_STARTED_MARKER.to_string(),
            saved: DEFAULT_SAVED_MARKER.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

/// Everything one batch run needs.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    /// Extension, without the dot, an input file must carry.
    pub extension: String,
    pub markers: TimingMarkers,
    pub format: OutputFormat,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            extension: DEFAULT_EXTENSION.to_string(),
            markers: TimingMarkers::default(),
            format: OutputFormat::Xlsx,
        }
    }
}

impl ExtractConfig {
    pub fn new(input_dir: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Self {
        let output_path = output_path.as_ref().to_path_buf();
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            format: OutputFormat::from_path(&output_path),
            output_path,
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_markers(mut self, markers: TimingMarkers) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }
}
