//! `csv-sql-import` loads CSV files from a local directory into a relational
//! database, one table per file, inferring each table's schema from the data.
//!
//! The pipeline runs three stages strictly in sequence for every file:
//!
//! 1. **Selection** ([`select`]): list `*.csv` files in a directory whose
//!    last-modified time falls on a reference day (local time).
//! 2. **Ingestion + inference** ([`ingestion`], [`infer`]): decode the file
//!    (UTF-8 first, then single-byte fallbacks), read it into an in-memory
//!    [`types::DataSet`], and derive one [`types::ColumnSpec`] per column —
//!    including date-column detection by name and value probing.
//! 3. **Loading** ([`load`]): drop and recreate the destination table, then
//!    insert rows in fixed-size batches under a single transaction per file.
//!
//! Failures are isolated per file: a file that cannot be read or loaded is
//! rolled back and logged, and the run continues with the remaining files.
//! Only a missing source directory or an unopenable database aborts the run
//! (see [`error::ImportError::is_fatal`]).
//!
//! ## Quick example
//!
//! ```no_run
//! use csv_sql_import::{ImportConfig, connect, run_import};
//!
//! # fn main() -> Result<(), csv_sql_import::ImportError> {
//! let config = ImportConfig::new("warehouse.db", "/data/incoming");
//! let mut conn = connect(&config)?;
//! let summary = run_import(&config, &mut conn)?;
//! println!("imported {}/{} files", summary.succeeded, summary.files);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: run configuration, passed explicitly into the entry point
//! - [`select`]: file selection by glob and modification day
//! - [`ingestion`]: encoding fallback + CSV reading into a [`types::DataSet`]
//! - [`infer`]: native column typing, date detection, SQL type inference
//! - [`load`]: table creation and batched, transactional inserts
//! - [`run`]: per-run orchestration and the per-file error boundary
//! - [`error`]: the error taxonomy shared across the pipeline

pub mod config;
pub mod error;
pub mod infer;
pub mod ingestion;
pub mod load;
pub mod run;
pub mod select;
pub mod types;

pub use config::{DEFAULT_BATCH_SIZE, ImportConfig};
pub use error::{ImportError, ImportResult};
pub use run::{ImportSummary, connect, run_import};
