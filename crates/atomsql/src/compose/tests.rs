use super::*;
use crate::dialect::{MySql, Postgres};
use crate::filter::FilterSet;
use crate::value::Value;

#[test]
fn select_defaults_to_star_without_clauses() {
    let stmt = compose_select(&select("t"), &MySql).unwrap();
    assert_eq!(stmt.mysql().sql, "SELECT * FROM `t`");
    assert_eq!(stmt.param_count(), 0);
}

#[test]
fn select_with_every_clause() {
    let q = select("users")
        .columns(["id", "name"])
        .filter(Where::new().field("name", "John"))
        .order(OrderBy::new().desc("created_at"))
        .limit("10 OFFSET 20");
    let stmt = compose_select(&q, &Postgres).unwrap();
    assert_eq!(
        stmt.postgres().sql,
        r#"SELECT "id", "name" FROM "users" WHERE "name" = $1 ORDER BY "created_at" DESC LIMIT 10 OFFSET 20"#
    );
    assert_eq!(stmt.values(), [Value::from("John")]);
}

#[test]
fn select_rejects_bad_projection() {
    let q = select("t").columns(["id", "name FROM x; --"]);
    let err = compose_select(&q, &MySql).unwrap_err();
    assert!(matches!(err, SqlError::InvalidIdentifier(_)));
}

#[test]
fn select_rejects_bad_order_and_limit() {
    let q = select("t").order(OrderBy::new().asc("name; DROP TABLE x"));
    assert!(compose_select(&q, &MySql).unwrap_err().is_order_error());

    let q = select("t").order(OrderBy::new().by("name", "sideways"));
    assert!(matches!(
        compose_select(&q, &MySql).unwrap_err(),
        SqlError::InvalidOrderDirection { .. }
    ));

    let q = select("t").limit("10; DROP TABLE x");
    assert!(compose_select(&q, &MySql).unwrap_err().is_limit_error());
}

#[test]
fn select_limit_shapes_pass_through() {
    for limit in ["10,20", "10 OFFSET 20"] {
        let stmt = compose_select(&select("t").limit(limit), &MySql).unwrap();
        assert_eq!(stmt.mysql().sql, format!("SELECT * FROM `t` LIMIT {limit}"));
    }
}

#[test]
fn equal_values_keep_distinct_placeholders() {
    let q = select("t").filter(Where::new().field("a", 1).field("b", 1));
    let stmt = compose_select(&q, &MySql).unwrap();

    let my = stmt.mysql();
    let pg = stmt.postgres();
    assert_eq!(my.sql, "SELECT * FROM `t` WHERE `a` = ? AND `b` = ?");
    assert_eq!(pg.sql, r#"SELECT * FROM `t` WHERE `a` = $1 AND `b` = $2"#);
    assert_eq!(my.values, [Value::Int(1), Value::Int(1)]);
    assert_eq!(my.values, pg.values);
}

#[test]
fn identifier_quoting_follows_compose_dialect() {
    let q = select("t").filter(Where::new().field("a", 1));

    let from_mysql = compose_select(&q, &MySql).unwrap().postgres();
    assert_eq!(from_mysql.sql, "SELECT * FROM `t` WHERE `a` = $1");

    let pg = compose_select(&q, &Postgres).unwrap().postgres();
    assert_eq!(pg.sql, r#"SELECT * FROM "t" WHERE "a" = $1"#);
    assert_eq!(pg.values, from_mysql.values);
}

#[test]
fn update_sets_then_filters() {
    let q = update("users")
        .set("status", "inactive")
        .set("score", 0)
        .filter(Where::new().filter("id", FilterSet::new().in_list([1, 2])));
    let stmt = compose_update(&q, &Postgres).unwrap();
    assert_eq!(
        stmt.postgres().sql,
        r#"UPDATE "users" SET "status" = $1, "score" = $2 WHERE "id" IN ($3, $4)"#
    );
    assert_eq!(
        stmt.values(),
        [
            Value::from("inactive"),
            Value::Int(0),
            Value::Int(1),
            Value::Int(2)
        ]
    );
}

#[test]
fn update_without_filter_omits_where() {
    let stmt = compose_update(&update("t").set("a", true), &MySql).unwrap();
    assert_eq!(stmt.mysql().sql, "UPDATE `t` SET `a` = ?");
}

#[test]
fn update_requires_set() {
    let err = compose_update(&update("t"), &MySql).unwrap_err();
    assert!(matches!(err, SqlError::InvalidStatement(_)));
}

#[test]
fn delete_with_and_without_filter() {
    let stmt = compose_delete(&delete("t"), &MySql).unwrap();
    assert_eq!(stmt.mysql().sql, "DELETE FROM `t`");

    let q = delete("t").filter(Where::new().filter("age", FilterSet::new().lt(18)));
    let stmt = compose_delete(&q, &Postgres).unwrap();
    assert_eq!(stmt.postgres().sql, r#"DELETE FROM "t" WHERE "age" < $1"#);
}

#[test]
fn insert_aligns_columns_and_records() {
    let q = insert("t")
        .columns(["a", "b"])
        .record(Row::new().set("a", 1).set("b", "x"))
        .record(Row::new().set("b", "y").set("a", 2));
    let stmt = compose_insert(&q, &MySql).unwrap();
    assert_eq!(
        stmt.mysql().sql,
        "INSERT INTO `t` (`a`, `b`) VALUES (?, ?), (?, ?)"
    );
    assert_eq!(
        stmt.values(),
        [
            Value::Int(1),
            Value::from("x"),
            Value::Int(2),
            Value::from("y")
        ]
    );
}

#[test]
fn insert_derives_columns_and_fills_missing_with_null() {
    let q = insert("t")
        .record(Row::new().set("a", 1).set("b", 2))
        .record(Row::new().set("a", 3));
    let stmt = compose_insert(&q, &Postgres).unwrap();
    assert_eq!(
        stmt.postgres().sql,
        r#"INSERT INTO "t" ("a", "b") VALUES ($1, $2), ($3, $4)"#
    );
    assert_eq!(stmt.values()[3], Value::Null);
}

#[test]
fn insert_requires_columns_and_records() {
    let err = compose_insert(&insert("t").columns(["a"]), &MySql).unwrap_err();
    assert!(matches!(err, SqlError::InvalidStatement(_)));

    let err = compose_insert(&insert("t").record(Row::new()), &MySql).unwrap_err();
    assert!(matches!(err, SqlError::InvalidStatement(_)));
}

#[test]
fn table_names_are_escaped() {
    let stmt = compose_delete(&delete("we`ird"), &MySql).unwrap();
    assert_eq!(stmt.mysql().sql, "DELETE FROM `we``ird`");
}
