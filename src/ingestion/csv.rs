//! CSV ingestion implementation.

use std::path::Path;

use crate::error::{ImportError, ImportResult};
use crate::types::{DataSet, Value};

use super::encoding::decode_with_fallback;

/// Read a CSV file into an in-memory [`DataSet`] of raw text cells.
///
/// Rules:
///
/// - The CSV must have a header row; header names become dataset column names
///   as-is (sanitization happens later, during inference).
/// - Empty or whitespace-only cells become [`Value::Null`].
/// - Rows shorter than the header are padded with nulls; longer rows are
///   truncated to the header width.
///
/// Fails with [`ImportError::UnreadableDataset`] when no supported encoding
/// can decode the file.
pub fn read_csv_from_path(path: impl AsRef<Path>) -> ImportResult<DataSet> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let (text, label) =
        decode_with_fallback(&bytes).ok_or_else(|| ImportError::UnreadableDataset {
            path: path.to_path_buf(),
        })?;
    if label != "utf-8" {
        tracing::debug!(file = %path.display(), encoding = label, "decoded with fallback encoding");
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    read_csv_from_reader(&mut rdr)
}

/// Read CSV data from an existing CSV reader.
pub fn read_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> ImportResult<DataSet> {
    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();
    let width = columns.len();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row = Vec::with_capacity(width);
        for idx in 0..width {
            row.push(cell_value(record.get(idx)));
        }
        rows.push(row);
    }

    Ok(DataSet::new(columns, rows))
}

fn cell_value(raw: Option<&str>) -> Value {
    match raw {
        None => Value::Null,
        Some(s) if s.trim().is_empty() => Value::Null,
        Some(s) => Value::Utf8(s.to_owned()),
    }
}
