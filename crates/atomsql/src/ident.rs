//! Identifier validation and quoting.
//!
//! Identifiers cannot be bound as parameters, so they are either validated
//! against `[A-Za-z_][A-Za-z0-9_]*` (ORDER BY columns, projection entries) or
//! emitted quoted with the dialect's quote character doubled inside.
//!
//! # Example
//! ```ignore
//! use atomsql::ident;
//!
//! assert!(ident::is_simple("created_at"));
//! assert!(!ident::is_simple("name; DROP TABLE x"));
//!
//! let mut out = String::new();
//! ident::write_quoted("a-table", '`', &mut out);
//! assert_eq!(out, "`a-table`");
//! ```

use crate::error::{SqlError, SqlResult};

/// Returns `true` if `name` matches `^[a-zA-Z_][a-zA-Z0-9_]*$`.
pub fn is_simple(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Validate a projection entry: `*` or a simple identifier.
pub fn check_projection(entry: &str) -> SqlResult<()> {
    if entry == "*" || is_simple(entry) {
        Ok(())
    } else {
        Err(SqlError::InvalidIdentifier(entry.to_string()))
    }
}

/// Append `name` wrapped in `quote`, doubling any embedded quote characters.
pub fn write_quoted(name: &str, quote: char, out: &mut String) {
    out.reserve(name.len() + 2);
    out.push(quote);
    for ch in name.chars() {
        if ch == quote {
            out.push(quote);
        }
        out.push(ch);
    }
    out.push(quote);
}
