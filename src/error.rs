use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Error type returned across the import pipeline.
///
/// Variants split into two tiers: fatal errors (see [`ImportError::is_fatal`])
/// abort the whole run before or instead of touching any file, while the rest
/// are confined to a single file and leave the run free to continue.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The configured source directory does not exist.
    #[error("source directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// The target database could not be opened.
    #[error("failed to open database: {source}")]
    Connection {
        #[source]
        source: rusqlite::Error,
    },

    /// No supported text encoding could decode the source file.
    #[error("no supported encoding could decode {path}")]
    UnreadableDataset { path: PathBuf },

    /// Underlying I/O error (e.g. file vanished mid-run, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Database statement error outside the batch-insert path.
    #[error("sql error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// A batch insert failed; the whole file was rolled back.
    #[error("insert batch failed for {file}: {source}")]
    InsertBatch {
        file: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The selector's glob pattern was invalid.
    #[error("glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl ImportError {
    /// Fatal errors stop the entire run; everything else is caught at the
    /// per-file boundary.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ImportError::DirectoryNotFound { .. } | ImportError::Connection { .. }
        )
    }
}
