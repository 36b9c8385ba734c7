use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use csv_sql_import::{DEFAULT_BATCH_SIZE, ImportConfig, connect, run_import};

/// Import CSV files modified on a given day into a SQL database.
///
/// Each selected file becomes one table named after its sanitized file stem;
/// existing same-named tables are dropped and recreated.
#[derive(Debug, Parser)]
#[command(name = "csv-sql-import", version, about)]
struct Cli {
    /// Database file tables are loaded into.
    #[arg(long)]
    database: PathBuf,

    /// Directory scanned for *.csv files.
    #[arg(long)]
    source_dir: PathBuf,

    /// Rows per insert batch.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Only import files last modified on this day (YYYY-MM-DD); defaults to
    /// today in local time.
    #[arg(long)]
    date: Option<NaiveDate>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ImportConfig::new(cli.database, cli.source_dir);
    config.batch_size = cli.batch_size;
    if let Some(date) = cli.date {
        config.reference_date = date;
    }

    let mut conn = match connect(&config) {
        Ok(conn) => conn,
        Err(error) => {
            tracing::error!(%error, "cannot open database, aborting");
            return ExitCode::FAILURE;
        }
    };

    match run_import(&config, &mut conn) {
        Ok(summary) => {
            if summary.failed > 0 {
                tracing::warn!(failed = summary.failed, "some files were not imported");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "run aborted");
            ExitCode::FAILURE
        }
    }
}
