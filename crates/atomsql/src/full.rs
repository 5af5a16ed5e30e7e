//! Full mode: statements with every value inlined as a SQL literal.
//!
//! Output uses MySQL backtick quoting. Strings are double-quoted with a naive
//! quote-doubling step, which is *not* an injection boundary: this text is
//! meant to be handed to [`crate::param`] (or inspected in tests), never
//! executed as-is with untrusted input.

use crate::compile::{LiteralSink, WhereCompiler};
use crate::compose::{Delete, Insert, Select, Update};
use crate::compose::{write_delete, write_insert, write_select, write_update};
use crate::dialect::MySql;
use crate::error::SqlResult;
use crate::filter::Where;

pub(crate) fn select_with(q: &Select, compiler: &WhereCompiler) -> SqlResult<String> {
    let mut sink = LiteralSink::new("", &MySql);
    write_select(q, compiler, &MySql, &mut sink)?;
    Ok(sink.out)
}

pub(crate) fn update_with(q: &Update, compiler: &WhereCompiler) -> SqlResult<String> {
    let mut sink = LiteralSink::new("", &MySql);
    write_update(q, compiler, &mut sink)?;
    Ok(sink.out)
}

pub(crate) fn delete_with(q: &Delete, compiler: &WhereCompiler) -> SqlResult<String> {
    let mut sink = LiteralSink::new("", &MySql);
    write_delete(q, compiler, &mut sink)?;
    Ok(sink.out)
}

pub(crate) fn insert_literal(q: &Insert) -> SqlResult<String> {
    let mut sink = LiteralSink::new("", &MySql);
    write_insert(q, &mut sink)?;
    Ok(sink.out)
}

/// Compile a `Where` tree to a boolean expression (empty for an empty tree).
pub fn compile_where(filter: &Where) -> SqlResult<String> {
    let mut sink = LiteralSink::new("", &MySql);
    WhereCompiler::default().write_where(filter, &mut sink)?;
    Ok(sink.out)
}

pub fn compose_select(q: &Select) -> SqlResult<String> {
    select_with(q, &WhereCompiler::default())
}

pub fn compose_update(q: &Update) -> SqlResult<String> {
    update_with(q, &WhereCompiler::default())
}

pub fn compose_delete(q: &Delete) -> SqlResult<String> {
    delete_with(q, &WhereCompiler::default())
}

pub fn compose_insert(q: &Insert) -> SqlResult<String> {
    insert_literal(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{delete, insert, select, update};
    use crate::filter::{FilterSet, OrderBy, Row};
    use crate::value::Value;

    #[test]
    fn select_without_clauses() {
        assert_eq!(compose_select(&select("t")).unwrap(), "SELECT * FROM `t`");
    }

    #[test]
    fn select_inlines_literals() {
        let q = select("users")
            .filter(Where::new().field("name", "John").filter(
                "age",
                FilterSet::new().gte(18).lte(65),
            ))
            .order(OrderBy::new().asc("name"))
            .limit("10,20");
        assert_eq!(
            compose_select(&q).unwrap(),
            r#"SELECT * FROM `users` WHERE `name` = "John" AND `age` >= 18 AND `age` <= 65 ORDER BY `name` ASC LIMIT 10,20"#
        );
    }

    #[test]
    fn update_and_delete() {
        let q = update("t")
            .set("note", r#"say "hi""#)
            .filter(Where::new().field("id", 7));
        assert_eq!(
            compose_update(&q).unwrap(),
            r#"UPDATE `t` SET `note` = "say ""hi""" WHERE `id` = 7"#
        );

        let q = delete("t").filter(Where::new().filter("gone", FilterSet::new().exists(false)));
        assert_eq!(
            compose_delete(&q).unwrap(),
            "DELETE FROM `t` WHERE `gone` IS NULL"
        );
    }

    #[test]
    fn insert_values_tuples() {
        let date = Value::from_millis(0).unwrap();
        let q = insert("t")
            .columns(["a", "b"])
            .record(Row::new().set("a", 1).set("b", "x"))
            .record(Row::new().set("a", date));
        assert_eq!(
            compose_insert(&q).unwrap(),
            r#"INSERT INTO `t` (`a`, `b`) VALUES (1, "x"), (__DATE_PLACEHOLDER_0__, null)"#
        );
    }

    #[test]
    fn where_only() {
        assert_eq!(compile_where(&Where::new()).unwrap(), "");
        assert_eq!(
            compile_where(&Where::new().regex("name", "^J")).unwrap(),
            "`name` REGEXP ^J"
        );
    }
}
