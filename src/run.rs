//! Run orchestration: select files, then ingest → infer → load, one file at
//! a time over a shared connection.

use std::path::Path;

use rusqlite::Connection;

use crate::config::ImportConfig;
use crate::error::{ImportError, ImportResult};
use crate::ingestion::read_csv_from_path;
use crate::load::{self, ImportJob};
use crate::select::select_files;

/// Aggregate outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Files selected for import.
    pub files: usize,
    /// Files fully committed.
    pub succeeded: usize,
    /// Files rolled back and skipped.
    pub failed: usize,
}

/// Open the target database for a run.
///
/// A failure here is fatal: the run aborts before any file is touched.
pub fn connect(config: &ImportConfig) -> ImportResult<Connection> {
    Connection::open(&config.database).map_err(|source| ImportError::Connection { source })
}

/// Import every matching file sequentially over the shared connection.
///
/// Per-file failures are logged with context, counted, and do not stop the
/// run; a missing source directory is fatal and returns before any file is
/// processed.
pub fn run_import(config: &ImportConfig, conn: &mut Connection) -> ImportResult<ImportSummary> {
    let files = select_files(&config.source_dir, config.reference_date)?;
    if files.is_empty() {
        tracing::warn!(
            dir = %config.source_dir.display(),
            date = %config.reference_date,
            "no csv files modified on the reference day"
        );
    } else {
        tracing::info!(count = files.len(), "csv files selected for import");
    }

    let mut summary = ImportSummary {
        files: files.len(),
        ..Default::default()
    };
    for path in &files {
        match import_file(conn, path, config.batch_size) {
            Ok(rows) => {
                summary.succeeded += 1;
                tracing::info!(file = %path.display(), rows, "file imported");
            }
            Err(error) => {
                summary.failed += 1;
                tracing::error!(file = %path.display(), %error, "import failed, continuing with remaining files");
            }
        }
    }

    tracing::info!(
        files = summary.files,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "import run complete"
    );
    Ok(summary)
}

/// Process one file end to end: read, infer, create, load, commit.
fn import_file(conn: &mut Connection, path: &Path, batch_size: usize) -> ImportResult<usize> {
    let dataset = read_csv_from_path(path)?;
    tracing::info!(
        file = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "file read"
    );
    let job = ImportJob::from_dataset(path.to_path_buf(), dataset);
    load::load_job(conn, &job, batch_size)?;
    Ok(job.dataset.row_count())
}
