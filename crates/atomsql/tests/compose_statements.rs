use atomsql::{
    Compiler, ComposeConfig, DialectKind, FilterSet, MySql, OrderBy, Postgres, Row, SqlError,
    Value, Where, compose, delete, full, insert, param, select, update,
};

fn people_filter() -> Where {
    Where::new().or(vec![
        Where::new().field("name", "John"),
        Where::new().and(vec![
            Where::new().filter("age", FilterSet::new().gt(18)),
            Where::new().field("active", true),
        ]),
    ])
}

#[test]
fn empty_select_in_every_mode() {
    let q = select("t");
    assert_eq!(full::compose_select(&q).unwrap(), "SELECT * FROM `t`");
    assert_eq!(
        compose::compose_select(&q, &MySql).unwrap().mysql().sql,
        "SELECT * FROM `t`"
    );
    let named = param::compose_select(&q).unwrap();
    assert_eq!(named.query, "SELECT * FROM `t`");
    assert!(named.map.is_empty());
}

#[test]
fn nested_root_operators_in_every_mode() {
    let q = select("people").filter(people_filter());

    assert_eq!(
        full::compose_select(&q).unwrap(),
        r#"SELECT * FROM `people` WHERE (`name` = "John" OR (`age` > 18 AND `active` = true))"#
    );

    let stmt = compose::compose_select(&q, &Postgres).unwrap();
    assert_eq!(
        stmt.postgres().sql,
        r#"SELECT * FROM "people" WHERE ("name" = $1 OR ("age" > $2 AND "active" = $3))"#
    );

    let named = param::compose_select(&q).unwrap();
    assert_eq!(
        named.query,
        "SELECT * FROM `people` WHERE (`name` = :x0000 OR (`age` > :x0001 AND `active` = :x0002))"
    );
    assert_eq!(
        named.to_positional().values,
        stmt.values(),
        "both strategies bind the same values in the same order"
    );
}

#[test]
fn renderers_are_equivalent() {
    let q = select("t")
        .filter(
            Where::new()
                .filter("id", FilterSet::new().in_list([1, 2, 3]))
                .field("name", "x"),
        )
        .order(OrderBy::new().asc("id"))
        .limit("5");
    let stmt = compose::compose_select(&q, &MySql).unwrap();
    let my = stmt.mysql();
    let pg = stmt.postgres();

    let dollar_count = (1..=stmt.param_count())
        .filter(|n| pg.sql.contains(&format!("${n}")))
        .count();
    assert_eq!(my.sql.matches('?').count(), dollar_count);
    assert_eq!(my.values, pg.values);
}

#[test]
fn insert_tuples_follow_column_order() {
    let q = insert("t")
        .columns(["a", "b"])
        .records([
            Row::new().set("a", 1).set("b", "x"),
            Row::new().set("b", "y").set("a", 2),
        ]);

    assert_eq!(
        full::compose_insert(&q).unwrap(),
        r#"INSERT INTO `t` (`a`, `b`) VALUES (1, "x"), (2, "y")"#
    );

    let stmt = compose::compose_insert(&q, &Postgres).unwrap();
    assert_eq!(stmt.param_count(), 4);
    assert_eq!(
        stmt.values(),
        [Value::Int(1), Value::from("x"), Value::Int(2), Value::from("y")]
    );
}

#[test]
fn injection_positions_are_rejected() {
    let bad_order = select("t").order(OrderBy::new().asc("name; DROP TABLE x"));
    let bad_limit = select("t").limit("10; DROP TABLE x");

    for q in [&bad_order, &bad_limit] {
        assert!(full::compose_select(q).is_err());
        assert!(compose::compose_select(q, &MySql).is_err());
        assert!(param::compose_select(q).is_err());
    }
    assert!(matches!(
        full::compose_select(&bad_order).unwrap_err(),
        SqlError::InvalidOrderColumn(_)
    ));
    assert!(matches!(
        full::compose_select(&bad_limit).unwrap_err(),
        SqlError::InvalidLimit(_)
    ));
}

#[test]
fn string_values_never_reach_template_text() {
    let hostile = r#"x"; DROP TABLE users; --"#;
    let q = update("users")
        .set("bio", hostile)
        .filter(Where::new().field("name", hostile));
    let stmt = compose::compose_update(&q, &Postgres).unwrap();

    assert!(!stmt.postgres().sql.contains("DROP"));
    assert_eq!(stmt.values(), [Value::from(hostile), Value::from(hostile)]);
}

#[test]
fn configured_compiler_round_trip() {
    let compiler = Compiler::new(ComposeConfig::new().dialect(DialectKind::Postgres));
    let q = delete("sessions").filter(Where::new().filter("expires_at", FilterSet::new().lt(0)));

    let stmt = compiler.delete(&q).unwrap();
    assert_eq!(
        stmt.postgres().sql,
        r#"DELETE FROM "sessions" WHERE "expires_at" < $1"#
    );
    assert_eq!(
        compiler.full_delete(&q).unwrap(),
        "DELETE FROM `sessions` WHERE `expires_at` < 0"
    );
}
