//! `ORDER BY` and `LIMIT` assemblers.
//!
//! Neither clause can be parameterized consistently across dialects, so both
//! are validated strictly and emitted as text:
//!
//! - ORDER BY columns must match `^[a-zA-Z_][a-zA-Z0-9_]*$` and directions
//!   must be `asc`/`desc` (any case).
//! - LIMIT must be `n`, `n, m` (MySQL offset form) or `n OFFSET m`.
//!
//! Both return an empty string for absent/empty input so callers never emit a
//! dangling keyword.

use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::filter::OrderBy;
use crate::ident;
use regex::Regex;
use std::sync::OnceLock;

/// Sort direction after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Parse `asc` / `desc`, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Append ` ORDER BY col DIR, ...` to `out`; nothing for an empty order.
pub fn write_order_by(order: &OrderBy, dialect: &dyn Dialect, out: &mut String) -> SqlResult<()> {
    if order.is_empty() {
        return Ok(());
    }

    let mut clause = String::from(" ORDER BY ");
    for (i, (column, direction)) in order.iter().enumerate() {
        if !ident::is_simple(column) {
            return Err(SqlError::InvalidOrderColumn(column.to_string()));
        }
        let dir = Direction::parse(direction).ok_or_else(|| SqlError::InvalidOrderDirection {
            column: column.to_string(),
            direction: direction.to_string(),
        })?;
        if i > 0 {
            clause.push_str(", ");
        }
        dialect.quote_identifier(column, &mut clause);
        clause.push(' ');
        clause.push_str(dir.as_sql());
    }
    out.push_str(&clause);
    Ok(())
}

/// ` ORDER BY ...` as an owned string (empty for an empty order).
pub fn order_by_clause(order: &OrderBy, dialect: &dyn Dialect) -> SqlResult<String> {
    let mut out = String::new();
    write_order_by(order, dialect, &mut out)?;
    Ok(out)
}

fn limit_regex() -> &'static Regex {
    static LIMIT_RE: OnceLock<Regex> = OnceLock::new();
    LIMIT_RE.get_or_init(|| {
        Regex::new(r"^[0-9]+(?:\s*,\s*[0-9]+|\s+(?i:OFFSET)\s+[0-9]+)?$")
            .expect("invalid built-in LIMIT regex")
    })
}

/// Check `limit` against the accepted LIMIT shapes.
pub fn validate_limit(limit: &str) -> SqlResult<()> {
    if limit_regex().is_match(limit) {
        Ok(())
    } else {
        Err(SqlError::InvalidLimit(limit.to_string()))
    }
}

/// Append ` LIMIT <limit>` verbatim after validation; nothing for `None`/`""`.
pub fn write_limit(limit: Option<&str>, out: &mut String) -> SqlResult<()> {
    match limit {
        None | Some("") => Ok(()),
        Some(limit) => {
            validate_limit(limit)?;
            out.push_str(" LIMIT ");
            out.push_str(limit);
            Ok(())
        }
    }
}

/// ` LIMIT ...` as an owned string (empty when absent).
pub fn limit_clause(limit: Option<&str>) -> SqlResult<String> {
    let mut out = String::new();
    write_limit(limit, &mut out)?;
    Ok(out)
}
