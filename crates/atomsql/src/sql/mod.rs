//! Template accumulator.
//!
//! [`SqlStatement`] keeps literal SQL fragments and bound values side by side,
//! so a value never passes through text and two equal values can never be
//! confused for one another. Placeholders are produced only when the
//! statement is rendered for a [`Dialect`](crate::Dialect):
//!
//! ```ignore
//! use atomsql::{SqlStatement, Value};
//!
//! let mut q = SqlStatement::new("SELECT * FROM `users` WHERE `name` = ");
//! q.push_bind("John").push(" AND `age` > ").push_bind(18);
//!
//! assert_eq!(q.mysql().sql, "SELECT * FROM `users` WHERE `name` = ? AND `age` > ?");
//! assert_eq!(q.postgres().sql, "SELECT * FROM `users` WHERE `name` = $1 AND `age` > $2");
//! ```

mod statement;

#[cfg(test)]
mod tests;

pub use statement::{RenderedQuery, SqlStatement};
