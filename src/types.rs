//! Core data model types for the importer.
//!
//! A CSV file is read into an in-memory [`DataSet`] of raw text cells; schema
//! inference then derives one [`ColumnSpec`] per column, and the loader coerces
//! cells into typed [`Value`]s on the way into the database.

use std::fmt;

use chrono::NaiveDateTime;

/// Unified native representation of a column's non-missing values.
///
/// Computed by scanning a whole column, the same way a dataframe assigns a
/// single dtype per column even when individual cells arrive as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every value parses as a 64-bit signed integer.
    Int64,
    /// Every value parses as a 64-bit float.
    Float64,
    /// Every value parses as a boolean.
    Bool,
    /// Every value parses as a date/time.
    Timestamp,
    /// Anything else (the default/object case).
    Utf8,
}

/// A single cell value.
///
/// Ingestion only produces [`Value::Null`] and [`Value::Utf8`]; the typed
/// variants appear when the loader coerces cells per their destination type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// Parsed date/time (no time zone).
    Timestamp(NaiveDateTime),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the string contents of a [`Value::Utf8`] cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// In-memory tabular dataset: ordered column names plus row-major storage.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Column names as read from the source header, in order.
    pub columns: Vec<String>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from column names and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Iterate the values of one column, top to bottom.
    ///
    /// Rows shorter than the header contribute nothing for trailing columns.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }
}

/// Destination SQL type for one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    /// Variable-length text with a declared maximum length.
    Text(u32),
    /// Unbounded text.
    TextMax,
    /// 64-bit integer.
    BigInt,
    /// Double-precision float.
    Float,
    /// Boolean stored as 1/0.
    Bit,
    /// Date/time.
    DateTime,
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Text(n) => write!(f, "VARCHAR({n})"),
            SqlType::TextMax => f.write_str("TEXT"),
            SqlType::BigInt => f.write_str("BIGINT"),
            SqlType::Float => f.write_str("FLOAT"),
            SqlType::Bit => f.write_str("BIT"),
            SqlType::DateTime => f.write_str("DATETIME"),
        }
    }
}

/// Sanitized name and destination type for one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name with spaces/hyphens replaced by underscores.
    pub name: String,
    /// Inferred destination type.
    pub sql_type: SqlType,
}

impl ColumnSpec {
    /// Create a spec from an already-sanitized name and a type.
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
        }
    }
}

/// Replace spaces and hyphens with underscores.
///
/// This is the only sanitization applied to table and column names; reserved
/// words and other collisions are left to identifier quoting.
pub fn sanitize_identifier(name: &str) -> String {
    name.replace([' ', '-'], "_")
}
