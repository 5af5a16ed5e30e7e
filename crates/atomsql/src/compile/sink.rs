use crate::dialect::Dialect;
use crate::sql::SqlStatement;
use crate::value::{Value, write_literal};

/// Output target of the Where/Filter compiler.
///
/// The compiler decides *where* text and values go; the sink decides how a
/// value is represented (inlined literal, bound slot, or collected binding).
pub(crate) trait Sink {
    fn push_str(&mut self, sql: &str);

    fn push_ident(&mut self, ident: &str);

    fn push_value(&mut self, value: &Value);

    /// A parenthesized value list for `IN` / `NOT IN`.
    fn push_list(&mut self, values: &[Value]);

    fn regex_operator(&self) -> &'static str;
}

/// Regex values bind as their pattern text.
fn bind_form(value: &Value) -> Value {
    match value {
        Value::Regex(pattern) => Value::Text(pattern.clone()),
        other => other.clone(),
    }
}

/// Full mode: values are inlined as SQL literals.
pub(crate) struct LiteralSink<'a> {
    pub(crate) out: String,
    dialect: &'a dyn Dialect,
}

impl<'a> LiteralSink<'a> {
    pub(crate) fn new(initial: impl Into<String>, dialect: &'a dyn Dialect) -> Self {
        Self {
            out: initial.into(),
            dialect,
        }
    }
}

impl Sink for LiteralSink<'_> {
    fn push_str(&mut self, sql: &str) {
        self.out.push_str(sql);
    }

    fn push_ident(&mut self, ident: &str) {
        self.dialect.quote_identifier(ident, &mut self.out);
    }

    fn push_value(&mut self, value: &Value) {
        write_literal(value, &mut self.out);
    }

    fn push_list(&mut self, values: &[Value]) {
        self.out.push('(');
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.out.push_str(&value.to_string());
        }
        self.out.push(')');
    }

    fn regex_operator(&self) -> &'static str {
        self.dialect.regex_operator()
    }
}

/// Template mode: every value gets its own placeholder slot.
pub(crate) struct StatementSink<'a> {
    pub(crate) stmt: SqlStatement,
    dialect: &'a dyn Dialect,
}

impl<'a> StatementSink<'a> {
    pub(crate) fn new(initial: impl Into<String>, dialect: &'a dyn Dialect) -> Self {
        Self {
            stmt: SqlStatement::new(initial),
            dialect,
        }
    }
}

impl Sink for StatementSink<'_> {
    fn push_str(&mut self, sql: &str) {
        self.stmt.push(sql);
    }

    fn push_ident(&mut self, ident: &str) {
        self.stmt.push_ident(self.dialect, ident);
    }

    fn push_value(&mut self, value: &Value) {
        self.stmt.push_bind(bind_form(value));
    }

    fn push_list(&mut self, values: &[Value]) {
        self.stmt.push("(");
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.stmt.push(", ");
            }
            self.stmt.push_bind(bind_form(value));
        }
        self.stmt.push(")");
    }

    fn regex_operator(&self) -> &'static str {
        self.dialect.regex_operator()
    }
}

/// A value recorded for post-hoc parameterization, in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Binding {
    Scalar(Value),
    List(Vec<Value>),
}

/// Records values only; text and identifiers are discarded.
#[derive(Debug, Default)]
pub(crate) struct CollectSink {
    pub(crate) bindings: Vec<Binding>,
}

impl Sink for CollectSink {
    fn push_str(&mut self, _sql: &str) {}

    fn push_ident(&mut self, _ident: &str) {}

    fn push_value(&mut self, value: &Value) {
        self.bindings.push(Binding::Scalar(value.clone()));
    }

    fn push_list(&mut self, values: &[Value]) {
        self.bindings.push(Binding::List(values.to_vec()));
    }

    fn regex_operator(&self) -> &'static str {
        "REGEXP"
    }
}
