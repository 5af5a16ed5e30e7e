use super::{Delete, Insert, Select, Update};
use crate::clause;
use crate::compile::{Sink, WhereCompiler};
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::filter::Where;
use crate::ident;
use crate::value::Value;

fn write_where_clause<S: Sink>(
    filter: &Where,
    compiler: &WhereCompiler,
    sink: &mut S,
) -> SqlResult<()> {
    if filter.is_empty() {
        return Ok(());
    }
    sink.push_str(" WHERE ");
    compiler.write_where(filter, sink)
}

pub(crate) fn write_select<S: Sink>(
    q: &Select,
    compiler: &WhereCompiler,
    dialect: &dyn Dialect,
    sink: &mut S,
) -> SqlResult<()> {
    // Validate the clauses up front so nothing is written for a bad input.
    let order = clause::order_by_clause(&q.order, dialect)?;
    let limit = clause::limit_clause(q.limit.as_deref())?;

    sink.push_str("SELECT ");
    if q.projection.is_empty() {
        sink.push_str("*");
    }
    for (i, column) in q.projection.iter().enumerate() {
        ident::check_projection(column)?;
        if i > 0 {
            sink.push_str(", ");
        }
        if column == "*" {
            sink.push_str("*");
        } else {
            sink.push_ident(column);
        }
    }
    sink.push_str(" FROM ");
    sink.push_ident(&q.table);

    write_where_clause(&q.filter, compiler, sink)?;
    sink.push_str(&order);
    sink.push_str(&limit);
    Ok(())
}

pub(crate) fn write_update<S: Sink>(
    q: &Update,
    compiler: &WhereCompiler,
    sink: &mut S,
) -> SqlResult<()> {
    if q.set.is_empty() {
        return Err(SqlError::invalid_statement("UPDATE requires at least one SET column"));
    }

    sink.push_str("UPDATE ");
    sink.push_ident(&q.table);
    sink.push_str(" SET ");
    for (i, (column, value)) in q.set.iter().enumerate() {
        if i > 0 {
            sink.push_str(", ");
        }
        sink.push_ident(column);
        sink.push_str(" = ");
        sink.push_value(value);
    }

    write_where_clause(&q.filter, compiler, sink)
}

pub(crate) fn write_delete<S: Sink>(
    q: &Delete,
    compiler: &WhereCompiler,
    sink: &mut S,
) -> SqlResult<()> {
    sink.push_str("DELETE FROM ");
    sink.push_ident(&q.table);
    write_where_clause(&q.filter, compiler, sink)
}

pub(crate) fn write_insert<S: Sink>(q: &Insert, sink: &mut S) -> SqlResult<()> {
    let columns = q.resolved_columns()?;

    sink.push_str("INSERT INTO ");
    sink.push_ident(&q.table);
    sink.push_str(" (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            sink.push_str(", ");
        }
        sink.push_ident(column);
    }
    sink.push_str(") VALUES ");

    for (r, record) in q.records.iter().enumerate() {
        if r > 0 {
            sink.push_str(", ");
        }
        sink.push_str("(");
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                sink.push_str(", ");
            }
            sink.push_value(record.get(column).unwrap_or(&Value::Null));
        }
        sink.push_str(")");
    }
    Ok(())
}
