//! File selector: CSV files in a directory last modified on a given day.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};

use crate::error::{ImportError, ImportResult};

/// Glob pattern applied within the source directory.
pub const CSV_GLOB: &str = "*.csv";

/// List files under `dir` matching [`CSV_GLOB`] whose last-modified time falls
/// on `reference` (calendar-day granularity, local time zone).
///
/// The result preserves filesystem enumeration order and is not sorted. An
/// empty result is not an error; a missing directory is
/// [`ImportError::DirectoryNotFound`].
pub fn select_files(dir: &Path, reference: NaiveDate) -> ImportResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ImportError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let pattern = dir.join(CSV_GLOB);
    let mut selected = Vec::new();
    for entry in glob::glob(&pattern.to_string_lossy())? {
        let path = entry.map_err(|e| ImportError::Io(e.into_error()))?;
        let modified = std::fs::metadata(&path)?.modified()?;
        let modified_day = DateTime::<Local>::from(modified).date_naive();
        if modified_day == reference {
            tracing::debug!(file = %path.display(), "candidate csv modified on reference day");
            selected.push(path);
        }
    }
    Ok(selected)
}
