use super::*;
use crate::dialect::{MySql, Postgres};
use crate::value::Value;

fn assert_invariant(q: &SqlStatement) {
    assert_eq!(q.strings().len(), q.values().len() + 1);
}

#[test]
fn builds_placeholders_in_order() {
    let mut q = SqlStatement::new("SELECT * FROM users WHERE a = ");
    q.push_bind(1).push(" AND b = ").push_bind("x");

    assert_eq!(q.to_sql(&Postgres), "SELECT * FROM users WHERE a = $1 AND b = $2");
    assert_eq!(q.to_sql(&MySql), "SELECT * FROM users WHERE a = ? AND b = ?");
    assert_eq!(q.values(), [Value::Int(1), Value::from("x")]);
    assert_invariant(&q);
}

#[test]
fn append_merges_boundary_fragment() {
    let mut q = SqlStatement::new("x = ");
    let mut w = SqlStatement::new(" WHERE id = ");
    w.push_bind(42).push(" LIMIT 1");
    q.push_bind(7).append(w);

    assert_eq!(q.strings(), ["x = ", " WHERE id = ", " LIMIT 1"]);
    assert_eq!(q.to_sql(&Postgres), "x = $1 WHERE id = $2 LIMIT 1");
    assert_invariant(&q);
}

#[test]
fn append_plain_string_adds_no_value() {
    let mut q = SqlStatement::bound(1);
    q.push(")");
    assert_eq!(q.strings(), ["", ")"]);
    assert_eq!(q.param_count(), 1);
    assert_invariant(&q);
}

#[test]
fn append_empty_statement_is_noop() {
    let mut q = SqlStatement::new("SELECT 1");
    q.append(SqlStatement::empty());
    assert_eq!(q.strings(), ["SELECT 1"]);
    assert!(q.values().is_empty());
}

#[test]
fn bound_values_are_never_merged() {
    let mut q = SqlStatement::new("`a` = ");
    q.push_bind(1).push(" AND `b` = ").push_bind(1);

    assert_eq!(q.to_sql(&Postgres), "`a` = $1 AND `b` = $2");
    assert_eq!(q.values(), [Value::Int(1), Value::Int(1)]);
}

#[test]
fn renderers_agree_on_values() {
    let mut q = SqlStatement::new("a IN (");
    q.push_bind(1).push(", ").push_bind(2).push(", ").push_bind(3).push(")");

    let my = q.mysql();
    let pg = q.postgres();
    assert_eq!(my.sql.matches('?').count(), 3);
    assert_eq!(pg.sql, "a IN ($1, $2, $3)");
    assert_eq!(my.values, pg.values);
    assert_eq!(pg.params_ref().len(), 3);
}

#[test]
fn from_parts_checks_invariant() {
    assert!(SqlStatement::from_parts(vec!["a".into()], vec![Value::Null]).is_err());
    let q = SqlStatement::from_parts(vec!["a = ".into(), String::new()], vec![Value::Null])
        .unwrap();
    assert_eq!(q.mysql().sql, "a = ?");
}

#[test]
fn push_ident_quotes_per_dialect() {
    let mut q = SqlStatement::new("SELECT * FROM ");
    q.push_ident(&Postgres, "my table");
    assert_eq!(q.to_sql(&Postgres), r#"SELECT * FROM "my table""#);
}

#[test]
fn empty_detection() {
    assert!(SqlStatement::empty().is_empty());
    assert!(!SqlStatement::bound(Value::Null).is_empty());
    assert!(!SqlStatement::new("x").is_empty());
}

#[test]
fn into_rendered_moves_values() {
    let mut q = SqlStatement::new("v = ");
    q.push_bind("a");
    let r = q.into_rendered(&MySql);
    assert_eq!(r.sql, "v = ?");
    assert_eq!(r.values, [Value::from("a")]);
}
