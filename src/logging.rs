//! Subscriber setup: human-readable stderr plus a daily JSON log file.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub const DEFAULT_LOG_FILE: &str = "logs/quiz_response_times.log";

/// Splits a log file path into the directory the appender rolls in and the
/// file name prefix. Bare names land in `logs/`.
pub fn log_location(path: &Path) -> (PathBuf, PathBuf) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("quiz_response_times.log"));
    (dir.to_path_buf(), name)
}

/// Installs the global subscriber. `RUST_LOG` filters stderr (`info` added),
/// `RUST_LOG_JSON` filters the file (`debug` added). Keep the guard alive
/// for the whole run or buffered file lines are lost.
pub fn init(log_file: &Path) -> Result<WorkerGuard> {
    let (dir, name) = log_location(log_file);
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));

    let console = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_file = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(console)
        .with(json_file)
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_location_splits_path() {
        let (dir, name) = log_location(Path::new("/var/log/quiz/run.log"));
        assert_eq!(dir, PathBuf::from("/var/log/quiz"));
        assert_eq!(name, PathBuf::from("run.log"));
    }

    #[test]
    fn test_bare_file_name_goes_to_logs_dir() {
        let (dir, name) = log_location(Path::new("run.log"));
        assert_eq!(dir, PathBuf::from("logs"));
        assert_eq!(name, PathBuf::from("run.log"));
    }
}
