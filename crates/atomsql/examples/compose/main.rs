//! Composing the same statements in all three output modes.
//!
//! Run with: cargo run --example compose -p atomsql

use atomsql::{
    Compiler, ComposeConfig, DangerousDmlPolicy, DialectKind, FilterSet, MySql, OrderBy, Row,
    SqlResult, Where, compose, delete, insert, select, update,
};

fn main() -> SqlResult<()> {
    let filter = Where::new().or(vec![
        Where::new().field("name", "John"),
        Where::new().and(vec![
            Where::new().filter("age", FilterSet::new().gt(18)),
            Where::new().field("active", true),
        ]),
    ]);
    let q = select("users")
        .columns(["id", "name"])
        .filter(filter)
        .order(OrderBy::new().desc("created_at"))
        .limit("10");

    let compiler = Compiler::new(
        ComposeConfig::new()
            .dialect(DialectKind::Postgres)
            .delete_without_where(DangerousDmlPolicy::Error),
    );

    println!("=== SELECT ===");
    let stmt = compiler.select(&q)?;
    let pg = stmt.postgres();
    println!("postgres: {}", pg.sql);
    println!("mysql:    {}", compose::compose_select(&q, &MySql)?.mysql().sql);
    println!("values:   {:?}", pg.values);
    println!("full:     {}", compiler.full_select(&q)?);
    let named = compiler.named_select(&q)?;
    println!("named:    {}", named.query);
    println!("map:      {}", serde_json::to_string(&named.map).unwrap_or_default());
    println!("rewrite:  {}", named.to_positional().sql);

    println!("\n=== UPDATE ===");
    let q = update("users")
        .set("active", false)
        .filter(Where::new().filter("last_login", FilterSet::new().exists(false)));
    println!("{}", compiler.update(&q)?.postgres().sql);

    println!("\n=== INSERT ===");
    let q = insert("users").records([
        Row::new().set("name", "Ann").set("age", 31),
        Row::new().set("name", "Bob"),
    ]);
    let stmt = compiler.insert(&q)?;
    println!("{}", stmt.postgres().sql);
    println!("values: {:?}", stmt.values());

    println!("\n=== DELETE without WHERE ===");
    match compiler.delete(&delete("users")) {
        Ok(_) => println!("unexpectedly allowed"),
        Err(e) => println!("rejected: {e}"),
    }

    Ok(())
}
