//! Fixed-order text-encoding fallback for source files.
//!
//! There is no content-based detection: the labels in [`ENCODING_LABELS`] are
//! tried in order and the first lossless decode wins.

use std::borrow::Cow;

use encoding_rs::Encoding;

/// Encoding labels tried in priority order.
///
/// Labels are resolved through the WHATWG encoding registry, where `latin-1`
/// and `iso-8859-1` map onto windows-1252.
pub const ENCODING_LABELS: [&str; 4] = ["utf-8", "latin-1", "windows-1252", "iso-8859-1"];

/// Decode `bytes` with the first label that decodes without replacement.
///
/// Returns the decoded text and the winning label, or `None` when every label
/// fails. The per-label failures are expected exploratory probes, not errors.
pub fn decode_with_fallback(bytes: &[u8]) -> Option<(Cow<'_, str>, &'static str)> {
    for label in ENCODING_LABELS {
        let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
            continue;
        };
        let (text, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Some((text, label));
        }
    }
    None
}
