//! Table creation and batched, transactional row loading.

use std::collections::HashSet;
use std::path::PathBuf;

use rusqlite::limits::Limit;
use rusqlite::types::ToSqlOutput;
use rusqlite::{Connection, ToSql, params_from_iter};

use crate::error::{ImportError, ImportResult};
use crate::infer::{self, parse_bool, parse_datetime};
use crate::types::{ColumnSpec, DataSet, SqlType, Value, sanitize_identifier};

/// One file's worth of work: source, destination table, data, and inferred
/// column specs.
///
/// Jobs are created per input file and discarded after commit or rollback;
/// nothing persists across runs.
#[derive(Debug)]
pub struct ImportJob {
    /// File the dataset was read from.
    pub source_path: PathBuf,
    /// Destination table, derived from the sanitized file stem.
    pub table_name: String,
    /// Ingested rows.
    pub dataset: DataSet,
    /// One spec per dataset column, in original order.
    pub column_specs: Vec<ColumnSpec>,
    /// Sanitized names of columns flagged as dates by name.
    pub date_columns: HashSet<String>,
}

impl ImportJob {
    /// Build a job from an ingested dataset: detect date columns, infer the
    /// column specs, and derive the table name from the file stem.
    pub fn from_dataset(source_path: PathBuf, dataset: DataSet) -> Self {
        let stem = source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let table_name = sanitize_identifier(&stem);
        let date_columns = infer::detect_date_columns(&dataset);
        let column_specs = infer::column_specs(&dataset, &date_columns);
        Self {
            source_path,
            table_name,
            dataset,
            column_specs,
            date_columns,
        }
    }
}

/// Run one job end to end: table create plus all batch inserts under a single
/// transaction.
///
/// Any failure rolls the whole file back; on success the transaction commits
/// and the table holds exactly the source rows.
pub fn load_job(conn: &mut Connection, job: &ImportJob, batch_size: usize) -> ImportResult<()> {
    // Dropping the transaction without commit rolls everything back.
    let tx = conn.transaction()?;
    create_table(&tx, &job.table_name, &job.column_specs)?;
    insert_rows(&tx, job, batch_size)?;
    tx.commit()?;
    tracing::info!(
        table = %job.table_name,
        rows = job.dataset.row_count(),
        "import committed"
    );
    Ok(())
}

/// Drop any existing table with the target name, then create it fresh from
/// the specs, columns in original order.
///
/// Destructive: prior data and schema for a same-named table are discarded
/// unconditionally.
pub fn create_table(
    conn: &Connection,
    table_name: &str,
    specs: &[ColumnSpec],
) -> ImportResult<()> {
    let table = quote_identifier(table_name);
    conn.execute(&format!("DROP TABLE IF EXISTS {table}"), [])?;

    let columns: Vec<String> = specs
        .iter()
        .map(|spec| format!("{} {}", quote_identifier(&spec.name), spec.sql_type))
        .collect();
    conn.execute(
        &format!("CREATE TABLE {table} ({})", columns.join(", ")),
        [],
    )?;
    tracing::info!(table = table_name, columns = specs.len(), "table created");
    Ok(())
}

/// Insert all of a job's rows in fixed-size batches inside the caller's
/// transaction.
///
/// Each batch is one parameterized multi-row `INSERT`; source row order is
/// preserved within and across batches. Progress is reported after every
/// batch as rows-inserted-so-far out of the total.
pub fn insert_rows(conn: &Connection, job: &ImportJob, batch_size: usize) -> ImportResult<()> {
    let total = job.dataset.row_count();
    if total == 0 {
        tracing::info!(table = %job.table_name, "no rows to insert");
        return Ok(());
    }

    let batch_size = effective_batch_size(conn, batch_size, job.column_specs.len());
    let table = quote_identifier(&job.table_name);
    let column_list = job
        .column_specs
        .iter()
        .map(|spec| quote_identifier(&spec.name))
        .collect::<Vec<_>>()
        .join(", ");
    let row_placeholder = format!(
        "({})",
        vec!["?"; job.column_specs.len()].join(", ")
    );

    let mut inserted = 0usize;
    for batch in job.dataset.rows.chunks(batch_size) {
        let placeholders = vec![row_placeholder.as_str(); batch.len()].join(", ");
        let sql = format!("INSERT INTO {table} ({column_list}) VALUES {placeholders}");

        let mut params: Vec<Value> = Vec::with_capacity(batch.len() * job.column_specs.len());
        for row in batch {
            for (idx, spec) in job.column_specs.iter().enumerate() {
                params.push(match row.get(idx) {
                    Some(cell) => convert_value(cell, spec.sql_type),
                    None => Value::Null,
                });
            }
        }

        conn.execute(&sql, params_from_iter(params.iter()))
            .map_err(|source| ImportError::InsertBatch {
                file: job.source_path.display().to_string(),
                source,
            })?;
        inserted += batch.len();
        tracing::info!(table = %job.table_name, inserted, total, "batch inserted");
    }
    Ok(())
}

/// Clamp the configured batch size so one multi-row `INSERT` never binds more
/// parameters than the connection allows (`SQLITE_LIMIT_VARIABLE_NUMBER`).
///
/// The configured size is a ceiling; wide datasets get smaller batches. The
/// floor of one row means a single row wider than the limit still surfaces
/// the database's own error instead of looping forever.
fn effective_batch_size(conn: &Connection, batch_size: usize, columns: usize) -> usize {
    let max_params = conn.limit(Limit::SQLITE_LIMIT_VARIABLE_NUMBER).max(1) as usize;
    let rows_within_limit = (max_params / columns.max(1)).max(1);
    batch_size.max(1).min(rows_within_limit)
}

/// Convert one cell to the value bound for its column's destination type.
///
/// Missing stays NULL, numerics pass through, booleans become 1/0, and date
/// values that fail to parse become NULL rather than failing the row.
fn convert_value(value: &Value, sql_type: SqlType) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Utf8(raw) => convert_text(raw, sql_type),
        other => other.clone(),
    }
}

fn convert_text(raw: &str, sql_type: SqlType) -> Value {
    let trimmed = raw.trim();
    match sql_type {
        SqlType::BigInt => match trimmed.parse::<i64>() {
            Ok(v) => Value::Int64(v),
            Err(_) => Value::Utf8(raw.to_owned()),
        },
        SqlType::Float => match trimmed.parse::<f64>() {
            Ok(v) => Value::Float64(v),
            Err(_) => Value::Utf8(raw.to_owned()),
        },
        SqlType::Bit => match parse_bool(trimmed) {
            Some(b) => Value::Int64(i64::from(b)),
            None => Value::Utf8(raw.to_owned()),
        },
        // Deliberate leniency: unparseable dates load as NULL.
        SqlType::DateTime => parse_datetime(trimmed)
            .map(Value::Timestamp)
            .unwrap_or(Value::Null),
        SqlType::Text(_) | SqlType::TextMax => Value::Utf8(raw.to_owned()),
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Null => Ok(ToSqlOutput::Owned(rusqlite::types::Value::Null)),
            Value::Int64(v) => v.to_sql(),
            Value::Float64(v) => v.to_sql(),
            Value::Bool(b) => Ok(ToSqlOutput::Owned(i64::from(*b).into())),
            Value::Timestamp(ts) => ts.to_sql(),
            Value::Utf8(s) => s.to_sql(),
        }
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{name}\"")
}
