//! Decoding filters from JSON and compiling them.
//!
//! Run with: cargo run --example where_json -p atomsql -- '{"age": {"$gte": 18}}'

use atomsql::{MySql, Postgres, SqlResult, Where, compose, full, select};

const DEFAULT_FILTER: &str = r#"{
    "$or": [
        {"name": {"$regex": "^Jo"}},
        {"age": {"$in": [18, 21, 65]}, "joined": {"$date": "2024-01-01T00:00:00Z"}}
    ]
}"#;

fn main() -> SqlResult<()> {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_FILTER.to_string());

    let filter = Where::from_json_str(&input)?;
    println!("where:    {}", full::compile_where(&filter)?);

    let q = select("people").filter(filter);
    let mysql = compose::compose_select(&q, &MySql)?.mysql();
    let postgres = compose::compose_select(&q, &Postgres)?.postgres();
    println!("mysql:    {}", mysql.sql);
    println!("postgres: {}", postgres.sql);
    for (i, value) in postgres.values.iter().enumerate() {
        println!("  ${} = {value} ({})", i + 1, value.type_name());
    }

    Ok(())
}
