//! Runtime values carried by filters, update payloads and insert records.
//!
//! [`Value`] is a closed sum type: every leaf a filter can hold is one of its
//! variants, so the compilers dispatch on it exhaustively instead of probing
//! shapes at runtime.
//!
//! Two renderings exist:
//!
//! - [`Display`](std::fmt::Display) is the *native* coercion (`true`, `42`,
//!   raw text, ...). Array elements in full mode are joined with it.
//! - [`write_literal`] is the full-mode SQL literal used when values are
//!   inlined into the query text.

mod format;
mod to_sql;

pub use format::{DATE_PLACEHOLDER_PREFIX, date_placeholder, literal, write_literal};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;

/// A single filter/record value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Timestamp, bound as a first-class parameter in template mode.
    Date(DateTime<Utc>),
    /// Regular expression source (pattern text only; flags are not kept).
    Regex(String),
    Array(Vec<Value>),
}

impl Value {
    /// Create a regular expression value from its source text.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Value::Regex(pattern.into())
    }

    /// Create a date value from epoch milliseconds.
    ///
    /// Returns `None` when the timestamp is out of range.
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(Value::Date)
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "string",
            Value::Date(_) => "date",
            Value::Regex(_) => "regexp",
            Value::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) if x.is_nan() => f.write_str("NaN"),
            Value::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) | Value::Regex(s) => f.write_str(s),
            Value::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Date(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
