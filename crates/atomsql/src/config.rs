//! Compiler configuration and the configured [`Compiler`] facade.
//!
//! The free `compose_*` functions in [`crate::compose`], [`crate::full`] and
//! [`crate::param`] run with the defaults. A [`Compiler`] applies a
//! [`ComposeConfig`] (dialect, nesting limit, unfiltered-mutation policy) and
//! logs every composed statement on the `atomsql.sql` target:
//!
//! ```ignore
//! use atomsql::{Compiler, ComposeConfig, DangerousDmlPolicy, DialectKind, delete};
//!
//! let compiler = Compiler::new(
//!     ComposeConfig::new()
//!         .dialect(DialectKind::Postgres)
//!         .delete_without_where(DangerousDmlPolicy::Error),
//! );
//! assert!(compiler.delete(&delete("users")).is_err());
//! ```

use crate::compile::{DEFAULT_MAX_DEPTH, StatementSink, WhereCompiler};
use crate::compose::{self, Delete, Insert, Select, Update};
use crate::dialect::{Dialect, DialectKind};
use crate::error::{SqlError, SqlResult};
use crate::full;
use crate::param::{self, NamedInsert, NamedQuery};
use crate::sql::SqlStatement;

/// What to do with an UPDATE/DELETE that has no filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DangerousDmlPolicy {
    #[default]
    Allow,
    Warn,
    Error,
}

/// Configuration for [`Compiler`].
#[derive(Debug, Clone)]
pub struct ComposeConfig {
    /// Target dialect for template-mode statements.
    pub dialect: DialectKind,
    /// Maximum nesting of `Where` objects and operator sets.
    pub max_where_depth: usize,
    pub update_without_where: DangerousDmlPolicy,
    pub delete_without_where: DangerousDmlPolicy,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_logged_sql_length: Option<usize>,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            dialect: DialectKind::MySql,
            max_where_depth: DEFAULT_MAX_DEPTH,
            update_without_where: DangerousDmlPolicy::Allow,
            delete_without_where: DangerousDmlPolicy::Allow,
            max_logged_sql_length: Some(200),
        }
    }
}

impl ComposeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialect(mut self, dialect: DialectKind) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn max_where_depth(mut self, depth: usize) -> Self {
        self.max_where_depth = depth;
        self
    }

    /// Configure how UPDATE without a filter is handled.
    pub fn update_without_where(mut self, policy: DangerousDmlPolicy) -> Self {
        self.update_without_where = policy;
        self
    }

    /// Configure how DELETE without a filter is handled.
    pub fn delete_without_where(mut self, policy: DangerousDmlPolicy) -> Self {
        self.delete_without_where = policy;
        self
    }

    pub fn max_logged_sql_length(mut self, len: usize) -> Self {
        self.max_logged_sql_length = Some(len);
        self
    }

    /// Log SQL in full.
    pub fn no_truncate(mut self) -> Self {
        self.max_logged_sql_length = None;
        self
    }
}

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

fn handle_dangerous_dml(policy: DangerousDmlPolicy, rule: &str, table: &str) -> SqlResult<()> {
    match policy {
        DangerousDmlPolicy::Allow => Ok(()),
        DangerousDmlPolicy::Warn => {
            tracing::warn!(target: "atomsql.sql", rule, table, "SQL policy");
            Ok(())
        }
        DangerousDmlPolicy::Error => Err(SqlError::PolicyViolation(format!(
            "{rule}: {table}"
        ))),
    }
}

/// Statement composer bound to a [`ComposeConfig`].
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: ComposeConfig,
    wheres: WhereCompiler,
}

impl Compiler {
    pub fn new(config: ComposeConfig) -> Self {
        let wheres = WhereCompiler::new(config.max_where_depth);
        Self { config, wheres }
    }

    pub fn config(&self) -> &ComposeConfig {
        &self.config
    }

    fn dialect(&self) -> &'static dyn Dialect {
        self.config.dialect.dialect()
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.config.max_logged_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    fn log(&self, statement: &'static str, mode: &'static str, param_count: usize, sql: &str) {
        tracing::debug!(
            target: "atomsql.sql",
            statement,
            mode,
            param_count,
            sql = %self.truncate_sql(sql),
            "composed statement"
        );
    }

    fn template<F>(&self, statement: &'static str, write: F) -> SqlResult<SqlStatement>
    where
        F: FnOnce(&mut StatementSink<'_>) -> SqlResult<()>,
    {
        let dialect = self.dialect();
        let mut sink = StatementSink::new("", dialect);
        write(&mut sink)?;
        let stmt = sink.stmt;
        if tracing::enabled!(target: "atomsql.sql", tracing::Level::DEBUG) {
            self.log(statement, "template", stmt.param_count(), &stmt.to_sql(dialect));
        }
        Ok(stmt)
    }

    fn check_update(&self, q: &Update) -> SqlResult<()> {
        if q.filter.is_empty() {
            handle_dangerous_dml(self.config.update_without_where, "UPDATE without WHERE", &q.table)?;
        }
        Ok(())
    }

    fn check_delete(&self, q: &Delete) -> SqlResult<()> {
        if q.filter.is_empty() {
            handle_dangerous_dml(self.config.delete_without_where, "DELETE without WHERE", &q.table)?;
        }
        Ok(())
    }

    // ==================== Template mode ====================

    pub fn select(&self, q: &Select) -> SqlResult<SqlStatement> {
        let dialect = self.dialect();
        self.template("select", |sink| {
            compose::write_select(q, &self.wheres, dialect, sink)
        })
    }

    pub fn update(&self, q: &Update) -> SqlResult<SqlStatement> {
        self.check_update(q)?;
        self.template("update", |sink| compose::write_update(q, &self.wheres, sink))
    }

    pub fn delete(&self, q: &Delete) -> SqlResult<SqlStatement> {
        self.check_delete(q)?;
        self.template("delete", |sink| compose::write_delete(q, &self.wheres, sink))
    }

    pub fn insert(&self, q: &Insert) -> SqlResult<SqlStatement> {
        self.template("insert", |sink| compose::write_insert(q, sink))
    }

    // ==================== Full mode ====================

    pub fn full_select(&self, q: &Select) -> SqlResult<String> {
        let sql = full::select_with(q, &self.wheres)?;
        self.log("select", "full", 0, &sql);
        Ok(sql)
    }

    pub fn full_update(&self, q: &Update) -> SqlResult<String> {
        self.check_update(q)?;
        let sql = full::update_with(q, &self.wheres)?;
        self.log("update", "full", 0, &sql);
        Ok(sql)
    }

    pub fn full_delete(&self, q: &Delete) -> SqlResult<String> {
        self.check_delete(q)?;
        let sql = full::delete_with(q, &self.wheres)?;
        self.log("delete", "full", 0, &sql);
        Ok(sql)
    }

    pub fn full_insert(&self, q: &Insert) -> SqlResult<String> {
        let sql = full::insert_literal(q)?;
        self.log("insert", "full", 0, &sql);
        Ok(sql)
    }

    // ==================== Named mode ====================

    pub fn named_select(&self, q: &Select) -> SqlResult<NamedQuery> {
        let named = param::select_with(q, &self.wheres)?;
        self.log("select", "named", named.map.len(), &named.query);
        Ok(named)
    }

    pub fn named_update(&self, q: &Update) -> SqlResult<NamedQuery> {
        self.check_update(q)?;
        let named = param::update_with(q, &self.wheres)?;
        self.log("update", "named", named.map.len(), &named.query);
        Ok(named)
    }

    pub fn named_delete(&self, q: &Delete) -> SqlResult<NamedQuery> {
        self.check_delete(q)?;
        let named = param::delete_with(q, &self.wheres)?;
        self.log("delete", "named", named.map.len(), &named.query);
        Ok(named)
    }

    pub fn named_insert(&self, q: &Insert) -> SqlResult<NamedInsert> {
        let named = param::compose_insert(q)?;
        self.log("insert", "named", named.query_records.len(), &named.query);
        Ok(named)
    }
}
