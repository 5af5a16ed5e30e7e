use super::NamedQuery;
use crate::compile::Binding;
use crate::value::{Value, literal};
use std::collections::BTreeMap;

/// Per-call id source: `x0000`, `x0001`, ...
#[derive(Debug, Default)]
struct IdAllocator {
    next: usize,
}

impl IdAllocator {
    fn next_id(&mut self) -> String {
        let id = format!("x{:04}", self.next);
        self.next += 1;
        id
    }
}

/// Where a scalar literal may start in the composed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Layout {
    /// After a space only (`col = v`, `SET col = v`).
    Clauses,
    /// Also right after `(`, as the first value of a `VALUES` tuple.
    InsertTuples,
}

/// Replace every literal in `query` with its `:id`, in binding order.
pub(super) fn parameterize(
    query: String,
    bindings: Vec<Binding>,
    layout: Layout,
) -> NamedQuery {
    let mut ids = IdAllocator::default();
    let mut query = query;
    let mut map = BTreeMap::new();

    for binding in bindings {
        match binding {
            Binding::Scalar(Value::Array(items)) | Binding::List(items) => {
                substitute_list(&mut query, &mut map, &mut ids, items);
            }
            Binding::Scalar(value) => {
                let id = ids.next_id();
                substitute_scalar(&mut query, &value, &id, layout);
                map.insert(id, bound_form(value));
            }
        }
    }

    NamedQuery { query, map }
}

fn substitute_scalar(query: &mut String, value: &Value, id: &str, layout: Layout) {
    match value {
        Value::Text(_) => replace_all(query, &literal(value), &format!(":{id}"), id),
        Value::Regex(pattern) => replace_all(query, &format!(" {pattern}"), &format!(" :{id}"), id),
        _ => {
            let text = literal(value);
            replace_all(query, &format!(" {text}"), &format!(" :{id}"), id);
            if layout == Layout::InsertTuples {
                replace_all(query, &format!("({text}"), &format!("(:{id}"), id);
            }
        }
    }
}

/// `(a,b,c)` becomes `(:id1, :id2, :id3)`; one id per element.
fn substitute_list(
    query: &mut String,
    map: &mut BTreeMap<String, Value>,
    ids: &mut IdAllocator,
    items: Vec<Value>,
) {
    if items.is_empty() {
        return;
    }
    let text = literal(&Value::Array(items.clone()));

    let mut replacement = String::from("(");
    for (i, item) in items.into_iter().enumerate() {
        let id = ids.next_id();
        if i > 0 {
            replacement.push_str(", ");
        }
        replacement.push(':');
        replacement.push_str(&id);
        map.insert(id, bound_form(item));
    }
    replacement.push(')');

    replace_all(query, &text, &replacement, "list");
}

fn replace_all(query: &mut String, from: &str, to: &str, id: &str) {
    let hits = query.matches(from).count();
    if hits == 0 {
        return;
    }
    tracing::trace!(target: "atomsql.sql", id, hits, pattern = from, "substituted value");
    *query = query.replace(from, to);
}

fn bound_form(value: Value) -> Value {
    match value {
        Value::Regex(pattern) => Value::Text(pattern),
        other => other,
    }
}
