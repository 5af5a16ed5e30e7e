//! Decoding filters from JSON.
//!
//! Key order is preserved (`serde_json/preserve_order`), so operators and
//! columns compile in the order they were written. Two extended-JSON leaf
//! forms are understood:
//!
//! - `{"$date": "2025-01-01T00:00:00Z"}` or `{"$date": 1735689600000}`
//! - `{"$regex": "^a", "$options": "i"}` (options are discarded)

use super::{Condition, Entry, FilterOp, FilterSet, OrderBy, RootOp, Row, Where};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value as Json};

type Object = Map<String, Json>;

impl Where {
    /// Parse a JSON document into a `Where`.
    pub fn from_json_str(s: &str) -> SqlResult<Self> {
        let json: Json = serde_json::from_str(s)?;
        Where::try_from(&json)
    }
}

impl TryFrom<&Json> for Where {
    type Error = SqlError;

    fn try_from(json: &Json) -> SqlResult<Self> {
        let obj = json
            .as_object()
            .ok_or_else(|| SqlError::unsupported(format!("where filter must be an object, got {json}")))?;
        where_from_object(obj)
    }
}

impl TryFrom<Json> for Where {
    type Error = SqlError;

    fn try_from(json: Json) -> SqlResult<Self> {
        Where::try_from(&json)
    }
}

impl<'de> serde::Deserialize<'de> for Where {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        Where::try_from(json).map_err(serde::de::Error::custom)
    }
}

fn where_from_object(obj: &Object) -> SqlResult<Where> {
    let mut entries = Vec::with_capacity(obj.len());
    for (key, value) in obj {
        if let Some(op) = RootOp::from_key(key) {
            let items = value.as_array().ok_or_else(|| SqlError::invalid_root(key))?;
            let clauses = items
                .iter()
                .map(Where::try_from)
                .collect::<SqlResult<Vec<_>>>()?;
            entries.push(Entry::Root { op, clauses });
            continue;
        }
        if key.starts_with('$') {
            return Err(SqlError::InvalidFilterOperator(key.clone()));
        }
        entries.push(Entry::Column {
            name: key.clone(),
            condition: condition_from_json(value)?,
        });
    }
    Ok(Where { entries })
}

fn condition_from_json(json: &Json) -> SqlResult<Condition> {
    if let Json::Object(obj) = json {
        if let Some(value) = extended_leaf(obj)? {
            return Ok(Condition::Value(value));
        }
        return filter_set_from_object(obj).map(Condition::Filter);
    }
    leaf_from_json(json).map(Condition::Value)
}

fn filter_set_from_object(obj: &Object) -> SqlResult<FilterSet> {
    let mut set = FilterSet::new();
    for (key, operand) in obj {
        let op = match key.as_str() {
            "$eq" => FilterOp::Eq(leaf_from_json(operand)?),
            "$gt" => FilterOp::Gt(leaf_from_json(operand)?),
            "$gte" => FilterOp::Gte(leaf_from_json(operand)?),
            "$lt" => FilterOp::Lt(leaf_from_json(operand)?),
            "$lte" => FilterOp::Lte(leaf_from_json(operand)?),
            "$ne" => FilterOp::Ne(leaf_from_json(operand)?),
            "$in" => FilterOp::In(list_from_json(key, operand)?),
            "$nin" => FilterOp::Nin(list_from_json(key, operand)?),
            "$exists" => match operand {
                Json::Bool(b) => FilterOp::Exists(*b),
                other => {
                    return Err(SqlError::unsupported(format!(
                        "$exists expects a boolean, got {other}"
                    )));
                }
            },
            "$not" => match operand {
                Json::Object(inner) => FilterOp::Not(filter_set_from_object(inner)?),
                other => {
                    return Err(SqlError::unsupported(format!(
                        "$not expects an operator object, got {other}"
                    )));
                }
            },
            _ => return Err(SqlError::InvalidFilterOperator(key.clone())),
        };
        set = set.push(op);
    }
    Ok(set)
}

fn list_from_json(key: &str, json: &Json) -> SqlResult<Vec<Value>> {
    match json {
        Json::Array(items) => items.iter().map(leaf_from_json).collect(),
        other => Err(SqlError::unsupported(format!(
            "{key} expects an array, got {other}"
        ))),
    }
}

/// `{"$date": ...}` / `{"$regex": ...}`, or `None` for a plain object.
fn extended_leaf(obj: &Object) -> SqlResult<Option<Value>> {
    if let Some(date) = obj.get("$date") {
        if obj.len() != 1 {
            return Err(SqlError::unsupported("$date cannot be combined with other keys"));
        }
        return date_from_json(date).map(Some);
    }
    if let Some(pattern) = obj.get("$regex") {
        if let Some(extra) = obj.keys().find(|k| *k != "$regex" && *k != "$options") {
            return Err(SqlError::InvalidFilterOperator(extra.clone()));
        }
        return match pattern {
            Json::String(p) => Ok(Some(Value::Regex(p.clone()))),
            other => Err(SqlError::unsupported(format!(
                "$regex expects a string, got {other}"
            ))),
        };
    }
    Ok(None)
}

fn date_from_json(json: &Json) -> SqlResult<Value> {
    match json {
        Json::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|d| Value::Date(d.with_timezone(&Utc)))
            .map_err(|e| SqlError::unsupported(format!("invalid $date \"{s}\": {e}"))),
        Json::Number(n) => n
            .as_i64()
            .and_then(Value::from_millis)
            .ok_or_else(|| SqlError::unsupported(format!("invalid $date timestamp {n}"))),
        other => Err(SqlError::unsupported(format!(
            "$date expects a string or number, got {other}"
        ))),
    }
}

fn leaf_from_json(json: &Json) -> SqlResult<Value> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => Ok(match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        }),
        Json::String(s) => Ok(Value::Text(s.clone())),
        Json::Array(items) => items
            .iter()
            .map(leaf_from_json)
            .collect::<SqlResult<Vec<_>>>()
            .map(Value::Array),
        Json::Object(obj) => extended_leaf(obj)?
            .ok_or_else(|| SqlError::unsupported(format!("nested object {json}"))),
    }
}

impl TryFrom<&Json> for OrderBy {
    type Error = SqlError;

    fn try_from(json: &Json) -> SqlResult<Self> {
        let obj = json
            .as_object()
            .ok_or_else(|| SqlError::unsupported(format!("order must be an object, got {json}")))?;
        let mut order = OrderBy::new();
        for (column, direction) in obj {
            let direction = direction.as_str().ok_or_else(|| SqlError::InvalidOrderDirection {
                column: column.clone(),
                direction: direction.to_string(),
            })?;
            order = order.by(column.clone(), direction);
        }
        Ok(order)
    }
}

impl TryFrom<&Json> for Row {
    type Error = SqlError;

    fn try_from(json: &Json) -> SqlResult<Self> {
        let obj = json
            .as_object()
            .ok_or_else(|| SqlError::unsupported(format!("record must be an object, got {json}")))?;
        obj.iter().try_fold(Row::new(), |row, (column, value)| {
            Ok(row.set(column.clone(), leaf_from_json(value)?))
        })
    }
}

impl<'de> serde::Deserialize<'de> for OrderBy {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        OrderBy::try_from(&json).map_err(serde::de::Error::custom)
    }
}

impl<'de> serde::Deserialize<'de> for Row {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        Row::try_from(&json).map_err(serde::de::Error::custom)
    }
}
