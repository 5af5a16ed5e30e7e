use super::Value;
use chrono::{DateTime, Utc};

/// Prefix of the sentinel that stands in for a date in full-mode SQL.
pub const DATE_PLACEHOLDER_PREFIX: &str = "__DATE_PLACEHOLDER_";

/// Sentinel text for a date: `__DATE_PLACEHOLDER_<epoch millis>__`.
///
/// Two dates only share a sentinel when they share a timestamp.
pub fn date_placeholder(date: &DateTime<Utc>) -> String {
    format!("{DATE_PLACEHOLDER_PREFIX}{}__", date.timestamp_millis())
}

/// Append the full-mode SQL literal for `value` to `out`.
///
/// - arrays: `(v1,v2,...)`, elements in their native form (not escaped)
/// - regexps: the pattern text
/// - dates: the [`date_placeholder`] sentinel
/// - strings: double-quoted with `"` doubled
/// - everything else: native form
///
/// The quote doubling is not an injection boundary; full-mode output is
/// meant to be parameterized before it reaches a driver.
pub fn write_literal(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&item.to_string());
            }
            out.push(')');
        }
        Value::Regex(pattern) => out.push_str(pattern),
        Value::Date(date) => out.push_str(&date_placeholder(date)),
        Value::Text(s) => {
            out.push('"');
            for ch in s.chars() {
                if ch == '"' {
                    out.push('"');
                }
                out.push(ch);
            }
            out.push('"');
        }
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) => {
            out.push_str(&value.to_string());
        }
    }
}

/// Full-mode SQL literal for `value` as an owned string.
pub fn literal(value: &Value) -> String {
    let mut out = String::new();
    write_literal(value, &mut out);
    out
}
