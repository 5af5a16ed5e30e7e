//! Statement inputs and the template-mode composers.
//!
//! The four inputs mirror what a CRUD wrapper hands over: a table plus the
//! optional pieces of each statement.
//!
//! ```ignore
//! use atomsql::{FilterSet, OrderBy, Where, compose, select};
//!
//! let q = select("users")
//!     .filter(Where::new().filter("age", FilterSet::new().gte(18)))
//!     .order(OrderBy::new().desc("created_at"))
//!     .limit("10");
//!
//! let stmt = compose::compose_select(&q, &atomsql::Postgres)?;
//! assert_eq!(
//!     stmt.postgres().sql,
//!     r#"SELECT * FROM "users" WHERE "age" >= $1 ORDER BY "created_at" DESC LIMIT 10"#
//! );
//! ```
//!
//! Every value becomes its own placeholder slot of a [`SqlStatement`]; see
//! [`crate::full`] for the literal rendering and [`crate::param`] for the
//! legacy `{query, map}` form.

mod write;

#[cfg(test)]
mod tests;

pub(crate) use write::{write_delete, write_insert, write_select, write_update};

use crate::compile::{StatementSink, WhereCompiler};
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::filter::{OrderBy, Row, Where};
use crate::sql::SqlStatement;

/// `SELECT` input.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    /// Column list; `["*"]` unless set.
    pub projection: Vec<String>,
    pub filter: Where,
    pub order: OrderBy,
    pub limit: Option<String>,
}

impl Select {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            projection: vec!["*".to_string()],
            filter: Where::new(),
            order: OrderBy::new(),
            limit: None,
        }
    }

    /// Replace the projection.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, filter: Where) -> Self {
        self.filter = filter;
        self
    }

    pub fn order(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }

    /// Raw LIMIT text (`"10"`, `"10,20"`, `"10 OFFSET 20"`).
    pub fn limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }
}

/// `UPDATE` input.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    pub set: Row,
    pub filter: Where,
}

impl Update {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            set: Row::new(),
            filter: Where::new(),
        }
    }

    /// Replace the whole SET payload.
    pub fn values(mut self, row: Row) -> Self {
        self.set = row;
        self
    }

    /// Set a single column.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<crate::Value>) -> Self {
        self.set = self.set.set(column, value);
        self
    }

    pub fn filter(mut self, filter: Where) -> Self {
        self.filter = filter;
        self
    }
}

/// `DELETE` input.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,
    pub filter: Where,
}

impl Delete {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filter: Where::new(),
        }
    }

    pub fn filter(mut self, filter: Where) -> Self {
        self.filter = filter;
        self
    }
}

/// `INSERT` input.
///
/// When `columns` is empty the keys of the first record are used. Records
/// missing a column insert `NULL` for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    pub records: Vec<Row>,
}

impl Insert {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn record(mut self, row: Row) -> Self {
        self.records.push(row);
        self
    }

    pub fn records(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.records.extend(rows);
        self
    }

    /// Explicit columns, or the first record's keys.
    pub(crate) fn resolved_columns(&self) -> SqlResult<Vec<&str>> {
        if self.records.is_empty() {
            return Err(SqlError::invalid_statement("INSERT requires at least one record"));
        }
        let columns: Vec<&str> = if self.columns.is_empty() {
            self.records[0].columns().collect()
        } else {
            self.columns.iter().map(String::as_str).collect()
        };
        if columns.is_empty() {
            return Err(SqlError::invalid_statement("INSERT requires at least one column"));
        }
        Ok(columns)
    }
}

/// Start a `SELECT` on `table`.
pub fn select(table: impl Into<String>) -> Select {
    Select::new(table)
}

/// Start an `UPDATE` on `table`.
pub fn update(table: impl Into<String>) -> Update {
    Update::new(table)
}

/// Start a `DELETE` on `table`.
pub fn delete(table: impl Into<String>) -> Delete {
    Delete::new(table)
}

/// Start an `INSERT` into `table`.
pub fn insert(table: impl Into<String>) -> Insert {
    Insert::new(table)
}

fn template<F>(dialect: &dyn Dialect, write: F) -> SqlResult<SqlStatement>
where
    F: FnOnce(&mut StatementSink<'_>) -> SqlResult<()>,
{
    let mut sink = StatementSink::new("", dialect);
    write(&mut sink)?;
    Ok(sink.stmt)
}

/// Compose a `SELECT` with every value bound to its own slot.
pub fn compose_select(q: &Select, dialect: &dyn Dialect) -> SqlResult<SqlStatement> {
    template(dialect, |sink| {
        write_select(q, &WhereCompiler::default(), dialect, sink)
    })
}

/// Compose an `UPDATE` with every value bound to its own slot.
pub fn compose_update(q: &Update, dialect: &dyn Dialect) -> SqlResult<SqlStatement> {
    template(dialect, |sink| write_update(q, &WhereCompiler::default(), sink))
}

/// Compose a `DELETE` with every value bound to its own slot.
pub fn compose_delete(q: &Delete, dialect: &dyn Dialect) -> SqlResult<SqlStatement> {
    template(dialect, |sink| write_delete(q, &WhereCompiler::default(), sink))
}

/// Compose an `INSERT` with every value bound to its own slot.
pub fn compose_insert(q: &Insert, dialect: &dyn Dialect) -> SqlResult<SqlStatement> {
    template(dialect, |sink| write_insert(q, sink))
}
