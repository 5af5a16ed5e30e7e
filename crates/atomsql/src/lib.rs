//! # atomsql
//!
//! Compiles MongoDB-style filters into MySQL and PostgreSQL statements.
//!
//! ## Features
//!
//! - **Declarative filters**: `Where` trees with `$eq`/`$gt`/`$in`/`$not`/`$exists`/... per column
//!   and `$and`/`$or`/`$nor` combinators, built in Rust or decoded from JSON
//! - **Bound values**: every value occupies its own placeholder slot (`?` or `$n`)
//! - **Strict non-value positions**: ORDER BY and LIMIT are validated, identifiers are quoted
//! - **Legacy outputs**: literal SQL and the `{query, map}` named-placeholder form
//!
//! ## Template mode
//!
//! ```ignore
//! use atomsql::{FilterSet, Postgres, Where, compose, select};
//!
//! let q = select("users").filter(Where::new().or(vec![
//!     Where::new().field("name", "John"),
//!     Where::new().and(vec![
//!         Where::new().filter("age", FilterSet::new().gt(18)),
//!         Where::new().field("active", true),
//!     ]),
//! ]));
//!
//! let stmt = compose::compose_select(&q, &Postgres)?;
//! let rendered = stmt.postgres();
//! // SELECT * FROM "users" WHERE ("name" = $1 OR ("age" > $2 AND "active" = $3))
//! client.query(&rendered.sql, &rendered.params_ref()).await?;
//! ```
//!
//! ## Configured compiler
//!
//! ```ignore
//! use atomsql::{Compiler, ComposeConfig, DangerousDmlPolicy, DialectKind};
//!
//! let compiler = Compiler::new(
//!     ComposeConfig::new()
//!         .dialect(DialectKind::Postgres)
//!         .delete_without_where(DangerousDmlPolicy::Error),
//! );
//! let stmt = compiler.select(&q)?;       // SqlStatement
//! let sql = compiler.full_select(&q)?;   // literal SQL
//! let named = compiler.named_select(&q)?; // {query, map}
//! ```

pub mod clause;
pub mod compose;
pub mod config;
pub mod dialect;
pub mod error;
pub mod filter;
pub mod full;
pub mod ident;
pub mod param;
pub mod positional;
pub mod sql;
pub mod value;

mod compile;

pub use compile::DEFAULT_MAX_DEPTH;
pub use compose::{Delete, Insert, Select, Update, delete, insert, select, update};
pub use config::{Compiler, ComposeConfig, DangerousDmlPolicy};
pub use dialect::{Dialect, DialectKind, MySql, Postgres};
pub use error::{SqlError, SqlResult};
pub use filter::{Condition, Entry, FilterOp, FilterSet, OrderBy, RootOp, Row, Where};
pub use param::{NamedInsert, NamedQuery};
pub use positional::named_to_positional;
pub use sql::{RenderedQuery, SqlStatement};
pub use value::Value;
