//! Permissive field extraction from raw export records.
//!
//! Export rows are decoded as loose [`serde_json::Value`] objects; fields are
//! accessed by name with absent or unparseable values degrading to a default
//! rather than aborting the report.

use serde_json::Value;

/// Extract an integer field from a record.
///
/// Accepts JSON integers, floats (truncated) and numeric strings. Absent,
/// null or unparseable values yield `0`.
pub fn int_field(record: &Value, key: &str) -> i64 {
    match record.get(key) {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(f) = n.as_f64() {
                f.trunc() as i64
            } else {
                0
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    }
}

/// Extract a text field from a record.
///
/// Accepts JSON strings and numbers (rendered decimally). Anything else,
/// including an absent field, yields an empty string.
pub fn text_field(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
