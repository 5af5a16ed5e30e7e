use crate::dialect::{Dialect, MySql, Postgres};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use tokio_postgres::types::ToSql;

/// Literal fragments interleaved with bound values.
///
/// Invariant: `strings.len() == values.len() + 1`. Value `i` sits between
/// `strings[i]` and `strings[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct SqlStatement {
    strings: Vec<String>,
    values: Vec<Value>,
}

/// A statement rendered for one dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuery {
    pub sql: String,
    pub values: Vec<Value>,
}

impl RenderedQuery {
    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }
}

impl Default for SqlStatement {
    fn default() -> Self {
        Self::empty()
    }
}

impl SqlStatement {
    /// Create a statement from an initial literal fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            strings: vec![initial_sql.into()],
            values: Vec::new(),
        }
    }

    /// Create an empty statement.
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// A statement holding exactly one placeholder slot.
    pub fn bound(value: impl Into<Value>) -> Self {
        Self {
            strings: vec![String::new(), String::new()],
            values: vec![value.into()],
        }
    }

    /// Build from raw parts, checking the fragment/value invariant.
    pub fn from_parts(strings: Vec<String>, values: Vec<Value>) -> SqlResult<Self> {
        if strings.len() != values.len() + 1 {
            let (s, v) = (strings.len(), values.len());
            return Err(SqlError::invalid_statement(format!(
                "fragments({s}) must be values({v}) + 1"
            )));
        }
        Ok(Self { strings, values })
    }

    /// Append raw SQL to the last fragment. Adds no value.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if let Some(last) = self.strings.last_mut() {
            last.push_str(sql);
        }
        self
    }

    /// Append a placeholder slot bound to `value`.
    pub fn push_bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.values.push(value.into());
        self.strings.push(String::new());
        self
    }

    /// Append another statement, consuming it.
    ///
    /// The first fragment of `other` is merged into the last fragment of
    /// `self`; the remaining fragments and all values are appended.
    pub fn append(&mut self, other: SqlStatement) -> &mut Self {
        let mut strings = other.strings.into_iter();
        if let Some(first) = strings.next() {
            self.push(&first);
        }
        self.strings.extend(strings);
        self.values.extend(other.values);
        self
    }

    /// Append a dialect-quoted identifier.
    pub fn push_ident(&mut self, dialect: &dyn Dialect, ident: &str) -> &mut Self {
        if let Some(last) = self.strings.last_mut() {
            dialect.quote_identifier(ident, last);
        }
        self
    }

    /// `true` if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.strings.iter().all(String::is_empty)
    }

    /// Literal fragments.
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    /// Bound values, in placeholder order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of placeholders.
    pub fn param_count(&self) -> usize {
        self.values.len()
    }

    /// Render the SQL text with `dialect`'s placeholders.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        let cap = self.strings.iter().map(String::len).sum::<usize>() + self.values.len() * 3;
        let mut out = String::with_capacity(cap);
        for (i, fragment) in self.strings.iter().enumerate() {
            if i > 0 {
                dialect.write_placeholder(i, &mut out);
            }
            out.push_str(fragment);
        }
        out
    }

    /// Render SQL text and clone the values.
    pub fn render(&self, dialect: &dyn Dialect) -> RenderedQuery {
        RenderedQuery {
            sql: self.to_sql(dialect),
            values: self.values.clone(),
        }
    }

    /// Render, moving the values out.
    pub fn into_rendered(self, dialect: &dyn Dialect) -> RenderedQuery {
        let sql = self.to_sql(dialect);
        RenderedQuery {
            sql,
            values: self.values,
        }
    }

    /// MySQL/MariaDB form with `?` placeholders.
    ///
    /// Only placeholders change. Identifiers keep the quoting of the dialect
    /// the statement was composed with.
    pub fn mysql(&self) -> RenderedQuery {
        self.render(&MySql)
    }

    /// PostgreSQL form with `$1, $2, ...` placeholders.
    ///
    /// Only placeholders change. Identifiers keep the quoting of the dialect
    /// the statement was composed with.
    pub fn postgres(&self) -> RenderedQuery {
        self.render(&Postgres)
    }
}
