//! Named → positional placeholder rewriting for PostgreSQL.
//!
//! Names are numbered by sorting the map keys, not by where they first occur
//! in the query. Every `:name` token found in the map is replaced with its
//! `$n`, and backtick-quoted identifiers become double-quoted.
//!
//! The query is scanned span by span. Quoted literals (`'..'`, `".."`) are
//! copied as written. A backtick identifier is unescaped and quoted again with
//! `"`, so embedded double quotes are doubled.

use crate::ident;
use crate::param::{NamedInsert, NamedQuery};
use crate::sql::RenderedQuery;
use crate::value::Value;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

fn named_param_regex() -> &'static Regex {
    static NAMED_RE: OnceLock<Regex> = OnceLock::new();
    NAMED_RE.get_or_init(|| {
        Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("invalid built-in placeholder regex")
    })
}

/// Rewrite `:name` placeholders to `$1..$n`.
///
/// Equal values under different names keep separate positions. Tokens with no
/// entry in `map` are left untouched.
pub fn named_to_positional(query: &str, map: &BTreeMap<String, Value>) -> RenderedQuery {
    let index: HashMap<&str, usize> = map
        .keys()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i + 1))
        .collect();

    let mut sql = String::with_capacity(query.len());
    let mut rest = query;
    while let Some(start) = rest.find(['`', '\'', '"']) {
        push_placeholders(&rest[..start], &index, &mut sql);
        let quote = rest.as_bytes()[start];
        let Some(len) = quoted_len(&rest[start..], quote) else {
            sql.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let span = &rest[start..start + len];
        if quote == b'`' {
            let name = span[1..span.len() - 1].replace("``", "`");
            ident::write_quoted(&name, '"', &mut sql);
        } else {
            sql.push_str(span);
        }
        rest = &rest[start + len..];
    }
    push_placeholders(rest, &index, &mut sql);

    RenderedQuery {
        sql,
        values: map.values().cloned().collect(),
    }
}

fn push_placeholders(text: &str, index: &HashMap<&str, usize>, out: &mut String) {
    let replaced = named_param_regex().replace_all(text, |caps: &Captures<'_>| {
        match index.get(&caps[1]) {
            Some(n) => format!("${n}"),
            None => caps[0].to_string(),
        }
    });
    out.push_str(&replaced);
}

/// Byte length of the quoted span at the start of `text`, closing quote
/// included. A doubled quote is an escape. `None` if unterminated.
fn quoted_len(text: &str, quote: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return Some(i + 1);
        }
        i += 1;
    }
    None
}

impl NamedQuery {
    /// PostgreSQL form of this query.
    pub fn to_positional(&self) -> RenderedQuery {
        named_to_positional(&self.query, &self.map)
    }
}

impl NamedInsert {
    /// PostgreSQL form of this insert.
    pub fn to_positional(&self) -> RenderedQuery {
        named_to_positional(&self.query, &self.query_records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn numbers_by_sorted_key() {
        let m = map(&[("b", Value::Int(2)), ("a", Value::Int(1))]);
        let q = named_to_positional("SELECT * FROM `t` WHERE `x` = :b AND `y` = :a", &m);

        assert_eq!(q.sql, r#"SELECT * FROM "t" WHERE "x" = $2 AND "y" = $1"#);
        assert_eq!(q.values, [Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn duplicate_values_keep_two_positions() {
        let date = Value::from_millis(1_000).unwrap();
        let m = map(&[("x0000", date.clone()), ("x0001", date.clone())]);
        let q = named_to_positional("`a` = :x0000 AND `b` = :x0001", &m);

        assert_eq!(q.sql, r#""a" = $1 AND "b" = $2"#);
        assert_eq!(q.values, [date.clone(), date]);
    }

    #[test]
    fn replaces_every_occurrence_of_a_name() {
        let m = map(&[("id", Value::Int(5))]);
        let q = named_to_positional("a = :id OR b = :id", &m);
        assert_eq!(q.sql, "a = $1 OR b = $1");
        assert_eq!(q.values.len(), 1);
    }

    #[test]
    fn matches_whole_tokens_only() {
        let m = map(&[("a", Value::Int(1)), ("ab", Value::Int(2))]);
        let q = named_to_positional("x = :ab AND y = :a AND z = :abc", &m);
        assert_eq!(q.sql, "x = $2 AND y = $1 AND z = :abc");
    }

    #[test]
    fn backtick_identifiers_are_requoted() {
        let m = map(&[("id", Value::Int(1))]);
        let q = named_to_positional(r#"SELECT * FROM `a``b"c` WHERE `x` = :id"#, &m);
        assert_eq!(q.sql, r#"SELECT * FROM "a`b""c" WHERE "x" = $1"#);
    }

    #[test]
    fn literals_are_copied_as_written() {
        let m = map(&[("id", Value::Int(1))]);
        let q = named_to_positional(
            r#"`a` = "x `y` :id" AND `b` = 'it''s :id' AND `c` = :id"#,
            &m,
        );
        assert_eq!(q.sql, r#""a" = "x `y` :id" AND "b" = 'it''s :id' AND "c" = $1"#);
    }

    #[test]
    fn unterminated_quote_is_kept() {
        let m = map(&[("id", Value::Int(1))]);
        let q = named_to_positional("`a` = :id AND 'open :id", &m);
        assert_eq!(q.sql, r#""a" = $1 AND 'open :id"#);
    }

    #[test]
    fn hostile_table_name_stays_one_identifier() {
        use crate::compose::select;

        let named = crate::param::compose_select(&select(r#"x" ; DROP TABLE y; --"#)).unwrap();
        assert_eq!(named.query, r#"SELECT * FROM `x" ; DROP TABLE y; --`"#);
        assert_eq!(
            named.to_positional().sql,
            r#"SELECT * FROM "x"" ; DROP TABLE y; --""#
        );

        let named = crate::param::compose_select(&select("a`\"b")).unwrap();
        assert_eq!(named.query, "SELECT * FROM `a``\"b`");
        assert_eq!(named.to_positional().sql, r#"SELECT * FROM "a`""b""#);
    }

    #[test]
    fn named_query_round_trip() {
        use crate::compose::select;
        use crate::filter::Where;

        let named = crate::param::compose_select(
            &select("users").filter(Where::new().field("name", "John").field("age", 30)),
        )
        .unwrap();
        let q = named.to_positional();
        assert_eq!(
            q.sql,
            r#"SELECT * FROM "users" WHERE "name" = $1 AND "age" = $2"#
        );
        assert_eq!(q.values, [Value::from("John"), Value::Int(30)]);
    }
}
