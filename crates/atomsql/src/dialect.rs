//! Target database conventions.
//!
//! A [`Dialect`] knows how to quote an identifier and how to spell the n-th
//! placeholder. The compilers only talk to this trait, so MySQL and PostgreSQL
//! share one implementation of everything else.

use crate::ident;

/// Quoting and placeholder conventions of a target database.
pub trait Dialect: Send + Sync {
    /// Human-readable dialect name.
    fn name(&self) -> &'static str;

    /// Append `ident` quoted for this dialect.
    fn quote_identifier(&self, ident: &str, out: &mut String);

    /// Append the placeholder for the 1-based parameter `index`.
    fn write_placeholder(&self, index: usize, out: &mut String);

    /// Operator used for `{col: /pattern/}` filters.
    fn regex_operator(&self) -> &'static str {
        "REGEXP"
    }

    /// Quote `ident` into a new string.
    fn quoted(&self, ident: &str) -> String {
        let mut out = String::with_capacity(ident.len() + 2);
        self.quote_identifier(ident, &mut out);
        out
    }
}

/// MySQL / MariaDB: backtick identifiers, `?` placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

/// PostgreSQL: double-quoted identifiers, `$1, $2, ...` placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str, out: &mut String) {
        ident::write_quoted(ident, '`', out);
    }

    fn write_placeholder(&self, _index: usize, out: &mut String) {
        out.push('?');
    }
}

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str, out: &mut String) {
        ident::write_quoted(ident, '"', out);
    }

    fn write_placeholder(&self, index: usize, out: &mut String) {
        out.push('$');
        out.push_str(&index.to_string());
    }

    fn regex_operator(&self) -> &'static str {
        "~"
    }
}

/// Dialect selector used in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialectKind {
    #[default]
    MySql,
    Postgres,
}

impl DialectKind {
    /// The dialect implementation for this selector.
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            DialectKind::MySql => &MySql,
            DialectKind::Postgres => &Postgres,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mysql_conventions() {
        let mut out = String::new();
        MySql.quote_identifier("users", &mut out);
        MySql.write_placeholder(3, &mut out);
        assert_eq!(out, "`users`?");
    }

    #[test]
    fn postgres_conventions() {
        let mut out = String::new();
        Postgres.quote_identifier("users", &mut out);
        Postgres.write_placeholder(12, &mut out);
        assert_eq!(out, "\"users\"$12");
    }

    #[test]
    fn kind_selects_dialect() {
        assert_eq!(DialectKind::default().dialect().name(), "mysql");
        assert_eq!(DialectKind::Postgres.dialect().name(), "postgres");
        assert_eq!(DialectKind::Postgres.dialect().quoted("a"), "\"a\"");
    }

    #[test]
    fn regex_operator_per_dialect() {
        assert_eq!(MySql.regex_operator(), "REGEXP");
        assert_eq!(Postgres.regex_operator(), "~");
    }
}
