//! Legacy parameterization by post-hoc substitution.
//!
//! The statement is first composed in [full mode](crate::full). The same
//! input is then walked again to collect its values in text order, each value
//! gets an id (`x0000`, `x0001`, ...) and its literal text is replaced with
//! `:id` in the query.
//!
//! Replacement is textual and replace-all. Two values whose literals coincide
//! (`{a: 1, b: 1}`), or a literal that also occurs elsewhere in the query,
//! end up sharing the first id while the later id stays unused in the text.
//! New code should use [`crate::compose`], which cannot collide.
//!
//! Ids are allocated per call, starting from `x0000`.

mod substitute;

use substitute::Layout;


use crate::compile::{CollectSink, WhereCompiler};
use crate::compose::{Delete, Insert, Select, Update};
use crate::compose::{write_delete, write_insert, write_select, write_update};
use crate::dialect::MySql;
use crate::error::SqlResult;
use crate::full;
use crate::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholder query with its id → value map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedQuery {
    pub query: String,
    pub map: BTreeMap<String, Value>,
}

/// Placeholder `INSERT` with its id → value map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedInsert {
    pub query: String,
    pub query_records: BTreeMap<String, Value>,
}

impl From<NamedInsert> for NamedQuery {
    fn from(insert: NamedInsert) -> Self {
        Self {
            query: insert.query,
            map: insert.query_records,
        }
    }
}

pub(crate) fn select_with(q: &Select, compiler: &WhereCompiler) -> SqlResult<NamedQuery> {
    let text = full::select_with(q, compiler)?;
    let mut values = CollectSink::default();
    write_select(q, compiler, &MySql, &mut values)?;
    Ok(substitute::parameterize(text, values.bindings, Layout::Clauses))
}

pub(crate) fn update_with(q: &Update, compiler: &WhereCompiler) -> SqlResult<NamedQuery> {
    let text = full::update_with(q, compiler)?;
    let mut values = CollectSink::default();
    write_update(q, compiler, &mut values)?;
    Ok(substitute::parameterize(text, values.bindings, Layout::Clauses))
}

pub(crate) fn delete_with(q: &Delete, compiler: &WhereCompiler) -> SqlResult<NamedQuery> {
    let text = full::delete_with(q, compiler)?;
    let mut values = CollectSink::default();
    write_delete(q, compiler, &mut values)?;
    Ok(substitute::parameterize(text, values.bindings, Layout::Clauses))
}

/// Compose a `SELECT` as `{query, map}`.
pub fn compose_select(q: &Select) -> SqlResult<NamedQuery> {
    select_with(q, &WhereCompiler::default())
}

/// Compose an `UPDATE` as `{query, map}`. SET values come before filter values.
pub fn compose_update(q: &Update) -> SqlResult<NamedQuery> {
    update_with(q, &WhereCompiler::default())
}

/// Compose a `DELETE` as `{query, map}`.
pub fn compose_delete(q: &Delete) -> SqlResult<NamedQuery> {
    delete_with(q, &WhereCompiler::default())
}

/// Compose an `INSERT` as `{query, query_records}`.
pub fn compose_insert(q: &Insert) -> SqlResult<NamedInsert> {
    let text = full::insert_literal(q)?;
    let mut values = CollectSink::default();
    write_insert(q, &mut values)?;
    let NamedQuery { query, map } =
        substitute::parameterize(text, values.bindings, Layout::InsertTuples);
    Ok(NamedInsert {
        query,
        query_records: map,
    })
}
