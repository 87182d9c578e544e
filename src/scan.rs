//! Directory scanning for exam export files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Lists files in `dir` whose name ends in `.{extension}`, in the order the
/// filesystem returns them. Nothing is sorted. Symlinks are followed, and a
/// file named just `.html` counts.
///
/// A missing directory is not an error: it is logged and yields no files.
pub fn list_export_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if dir.is_dir() {
        info!(dir = %dir.display(), "Input directory exists");
    } else {
        warn!(dir = %dir.display(), "Input directory does not exist");
        return Ok(Vec::new());
    }

    let suffix = format!(".{extension}");
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();

        let is_export = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&suffix));
        if !is_export {
            debug!(file = %path.display(), "Skipping non-export file");
            continue;
        }

        // metadata through the link, so symlinked exports are kept
        if !path.is_file() {
            debug!(file = %path.display(), "Skipping non-file entry");
            continue;
        }

        files.push(path);
    }

    Ok(files)
}

/// Column label for an export: its file name, as listed.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
