//! Where and filter compilers.
//!
//! One recursion serves every output mode: it walks the [`Where`] tree and
//! writes text, identifiers and values into a [`Sink`]. The sink decides
//! whether a value is inlined, bound to a slot or only recorded.
//!
//! Rules, per `Where` object, in insertion order:
//!
//! - `$and`/`$or`/`$nor`: nested objects joined with ` AND `/` OR `/` NOR `
//!   inside one parenthesis group. This closes the object; later sibling
//!   keys are dropped with a warning.
//! - regex value: `col REGEXP <pattern>`
//! - operator set: one fragment per operator, joined with ` AND `
//! - anything else: `col = <value>`
//!
//! Top-level fragments are joined with ` AND `.

mod sink;


pub(crate) use sink::{Binding, CollectSink, LiteralSink, Sink, StatementSink};

use crate::error::{SqlError, SqlResult};
use crate::filter::{Condition, Entry, FilterOp, FilterSet, RootOp, Where};
use crate::value::Value;

/// Default nesting limit for `Where` trees.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Where/filter compiler with a nesting guard.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WhereCompiler {
    max_depth: usize,
}

impl Default for WhereCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl WhereCompiler {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Write the boolean expression for `filter`. Writes nothing when empty.
    pub(crate) fn write_where<S: Sink>(&self, filter: &Where, sink: &mut S) -> SqlResult<()> {
        self.write_object(filter, sink, 0)
    }

    fn enter(&self, depth: usize) -> SqlResult<usize> {
        if depth >= self.max_depth {
            return Err(SqlError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(depth + 1)
    }

    fn write_object<S: Sink>(&self, filter: &Where, sink: &mut S, depth: usize) -> SqlResult<()> {
        let depth = self.enter(depth)?;
        let entries = filter.entries();

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                sink.push_str(" AND ");
            }
            match entry {
                Entry::Root { op, clauses } => {
                    self.write_root(*op, clauses, sink, depth)?;
                    let dropped = entries.len() - i - 1;
                    if dropped > 0 {
                        tracing::warn!(
                            target: "atomsql.sql",
                            operator = op.key(),
                            dropped,
                            "keys after a root operator are ignored"
                        );
                    }
                    return Ok(());
                }
                Entry::Column { name, condition } => {
                    self.write_column(name, condition, sink, depth)?;
                }
            }
        }
        Ok(())
    }

    fn write_root<S: Sink>(
        &self,
        op: RootOp,
        clauses: &[Where],
        sink: &mut S,
        depth: usize,
    ) -> SqlResult<()> {
        let mut clauses = clauses.iter().filter(|c| !c.is_empty()).peekable();
        if clauses.peek().is_none() {
            return Err(SqlError::empty_filter(op.key()));
        }

        sink.push_str("(");
        let mut first = true;
        for clause in clauses {
            if !first {
                sink.push_str(op.joiner());
            }
            first = false;
            self.write_object(clause, sink, depth)?;
        }
        sink.push_str(")");
        Ok(())
    }

    fn write_column<S: Sink>(
        &self,
        column: &str,
        condition: &Condition,
        sink: &mut S,
        depth: usize,
    ) -> SqlResult<()> {
        match condition {
            Condition::Value(value @ Value::Regex(_)) => {
                sink.push_ident(column);
                let op = sink.regex_operator();
                sink.push_str(" ");
                sink.push_str(op);
                sink.push_str(" ");
                sink.push_value(value);
            }
            Condition::Value(value) => {
                sink.push_ident(column);
                sink.push_str(" = ");
                sink.push_value(value);
            }
            Condition::Filter(set) => self.write_filter(column, set, sink, depth)?,
        }
        Ok(())
    }

    /// Compile an operator set for one column. The set must not be empty.
    fn write_filter<S: Sink>(
        &self,
        column: &str,
        set: &FilterSet,
        sink: &mut S,
        depth: usize,
    ) -> SqlResult<()> {
        if set.is_empty() {
            return Err(SqlError::empty_filter(column));
        }
        let depth = self.enter(depth)?;

        for (i, op) in set.iter().enumerate() {
            if i > 0 {
                sink.push_str(" AND ");
            }
            sink.push_ident(column);
            match op {
                FilterOp::Eq(v) => compare(sink, " = ", v),
                FilterOp::Gt(v) => compare(sink, " > ", v),
                FilterOp::Gte(v) => compare(sink, " >= ", v),
                FilterOp::Lt(v) => compare(sink, " < ", v),
                FilterOp::Lte(v) => compare(sink, " <= ", v),
                FilterOp::Ne(v) => compare(sink, " <> ", v),
                FilterOp::In(vs) => {
                    sink.push_str(" IN ");
                    sink.push_list(vs);
                }
                FilterOp::Nin(vs) => {
                    sink.push_str(" NOT IN ");
                    sink.push_list(vs);
                }
                FilterOp::Exists(true) => sink.push_str(" IS NOT NULL"),
                FilterOp::Exists(false) => sink.push_str(" IS NULL"),
                FilterOp::Not(inner) => {
                    sink.push_str(" NOT (");
                    self.write_filter(column, inner, sink, depth)?;
                    sink.push_str(")");
                }
            }
        }
        Ok(())
    }
}

fn compare<S: Sink>(sink: &mut S, op: &str, value: &Value) {
    sink.push_str(op);
    sink.push_value(value);
}
