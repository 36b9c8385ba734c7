//! Schema inference: native column typing, date-column detection, and
//! destination SQL types.
//!
//! All probing here is best-effort and ordered: each fallible parse returns
//! success or failure without raising, and the first success wins. Columns are
//! typed from bounded samples, so values outside the sample window that fail
//! to parse later coerce to NULL at load time rather than failing the file.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::{ColumnSpec, ColumnType, DataSet, SqlType, Value, sanitize_identifier};

/// Substrings (checked against the lowercased, sanitized name) that mark a
/// column name as date-like.
const DATE_NAME_HINTS: [&str; 5] = ["date", "timestamp", "time", "_at", "_on"];

/// Non-missing values sampled when testing a name-flagged date column.
const DATE_NAME_SAMPLE: usize = 20;

/// Non-missing values validated after the first during value-based date
/// probing of a text column.
const DATE_VALUE_CONFIRMATIONS: usize = 5;

/// Declared length of a text column with no sample data.
const TEXT_LENGTH_DEFAULT: u32 = 255;

/// Bounded text columns are capped at this declared length; columns whose max
/// observed length reaches it become unbounded text.
const TEXT_LENGTH_CAP: u32 = 4000;

/// Growth factor applied to the max observed string length of a text column.
const TEXT_LENGTH_MARGIN: f64 = 1.5;

/// Datetime formats probed in order (first success wins).
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

/// Date-only formats probed after [`DATETIME_FORMATS`]; matches are widened
/// to midnight.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Try to parse `raw` as a date/time using the ordered format probes.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Lenient boolean literal parse.
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" => Some(true),
        "false" | "f" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Iterate a column's non-missing cells as text, top to bottom.
fn non_missing<'a>(dataset: &'a DataSet, idx: usize) -> impl Iterator<Item = &'a str> {
    dataset.column(idx).filter_map(Value::as_str)
}

/// Compute the unified native type of one column by scanning every
/// non-missing value.
///
/// A column is integral only if every value parses as `i64`, and so on down
/// the priority order; anything mixed falls out as [`ColumnType::Utf8`]. An
/// all-missing column is also `Utf8`.
pub fn native_column_type(dataset: &DataSet, idx: usize) -> ColumnType {
    let mut any = false;
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;
    let mut all_timestamp = true;

    for raw in non_missing(dataset, idx) {
        any = true;
        let trimmed = raw.trim();
        if all_int && trimmed.parse::<i64>().is_err() {
            all_int = false;
        }
        if all_float && trimmed.parse::<f64>().is_err() {
            all_float = false;
        }
        if all_bool && parse_bool(trimmed).is_none() {
            all_bool = false;
        }
        if all_timestamp && parse_datetime(trimmed).is_none() {
            all_timestamp = false;
        }
        if !(all_int || all_float || all_bool || all_timestamp) {
            break;
        }
    }

    if !any {
        ColumnType::Utf8
    } else if all_int {
        ColumnType::Int64
    } else if all_float {
        ColumnType::Float64
    } else if all_bool {
        ColumnType::Bool
    } else if all_timestamp {
        ColumnType::Timestamp
    } else {
        ColumnType::Utf8
    }
}

/// Detect columns that look like dates by name.
///
/// A column is flagged when its sanitized name contains one of
/// [`DATE_NAME_HINTS`] and the first of its leading non-missing values parses
/// as a date/time (the sample is capped at [`DATE_NAME_SAMPLE`] values; an
/// empty sample leaves the column unflagged). The returned set holds
/// sanitized names.
pub fn detect_date_columns(dataset: &DataSet) -> HashSet<String> {
    let mut date_columns = HashSet::new();
    for (idx, name) in dataset.columns.iter().enumerate() {
        let clean = sanitize_identifier(name);
        let lower = clean.to_ascii_lowercase();
        if !DATE_NAME_HINTS.iter().any(|hint| lower.contains(hint)) {
            continue;
        }
        let mut sample = non_missing(dataset, idx).take(DATE_NAME_SAMPLE);
        let Some(first) = sample.next() else {
            continue;
        };
        if parse_datetime(first).is_some() {
            tracing::debug!(column = %clean, "name-flagged date column");
            date_columns.insert(clean);
        }
    }
    date_columns
}

/// Infer the destination SQL type for one column from its native type.
pub fn infer_sql_type(dataset: &DataSet, idx: usize) -> SqlType {
    match native_column_type(dataset, idx) {
        ColumnType::Int64 => SqlType::BigInt,
        ColumnType::Float64 => SqlType::Float,
        ColumnType::Bool => SqlType::Bit,
        ColumnType::Timestamp => SqlType::DateTime,
        ColumnType::Utf8 => infer_text_type(dataset, idx),
    }
}

/// Classify a textual column: date-likeness probe first, then size by the
/// maximum observed string length.
fn infer_text_type(dataset: &DataSet, idx: usize) -> SqlType {
    let mut probe = non_missing(dataset, idx);
    if let Some(first) = probe.next() {
        if parse_datetime(first).is_some()
            && probe
                .take(DATE_VALUE_CONFIRMATIONS)
                .all(|v| parse_datetime(v).is_some())
        {
            return SqlType::DateTime;
        }
    }

    let max_len = non_missing(dataset, idx)
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0);
    if max_len == 0 {
        SqlType::Text(TEXT_LENGTH_DEFAULT)
    } else if max_len >= TEXT_LENGTH_CAP as usize {
        SqlType::TextMax
    } else {
        let sized = (max_len as f64 * TEXT_LENGTH_MARGIN).ceil() as u32;
        SqlType::Text(sized.min(TEXT_LENGTH_CAP))
    }
}

/// Build one [`ColumnSpec`] per dataset column, in original column order.
///
/// Name-flagged date columns (see [`detect_date_columns`]) override the
/// value-based inference to [`SqlType::DateTime`].
pub fn column_specs(dataset: &DataSet, date_columns: &HashSet<String>) -> Vec<ColumnSpec> {
    dataset
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let clean = sanitize_identifier(name);
            let sql_type = if date_columns.contains(&clean) {
                SqlType::DateTime
            } else {
                infer_sql_type(dataset, idx)
            };
            ColumnSpec::new(clean, sql_type)
        })
        .collect()
}
