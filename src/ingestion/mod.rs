//! Ingestion entrypoints.
//!
//! [`csv::read_csv_from_path`] decodes a source file (UTF-8 first, then
//! single-byte fallbacks, see [`encoding`]) and reads it into an in-memory
//! [`crate::types::DataSet`] of raw text cells. Typing is deferred to
//! [`crate::infer`].

pub mod csv;
pub mod encoding;

pub use csv::{read_csv_from_path, read_csv_from_reader};
pub use encoding::decode_with_fallback;
