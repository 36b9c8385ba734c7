//! Run-level configuration.
//!
//! Everything the entry point needs is passed in explicitly; there are no
//! module-level globals.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};

/// Default number of rows per insert batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Configuration for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Database file tables are loaded into.
    pub database: PathBuf,
    /// Directory scanned for `*.csv` files.
    pub source_dir: PathBuf,
    /// Rows per insert batch.
    pub batch_size: usize,
    /// Only files last modified on this calendar day (local time) are imported.
    pub reference_date: NaiveDate,
}

impl ImportConfig {
    /// Create a config with the default batch size and today as the
    /// reference date.
    pub fn new(database: impl Into<PathBuf>, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            source_dir: source_dir.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            reference_date: Local::now().date_naive(),
        }
    }
}
