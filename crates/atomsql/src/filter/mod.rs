//! Declarative filter model: [`Where`], [`FilterSet`], [`OrderBy`], [`Row`].
//!
//! A [`Where`] is an insertion-ordered list of entries. Each entry is either a
//! column condition (a literal value meaning equality, or a [`FilterSet`] of
//! `$gt`/`$in`/... operators) or a root operator (`$and`/`$or`/`$nor`) over
//! nested `Where` objects.
//!
//! # Example
//! ```ignore
//! use atomsql::{FilterSet, Where};
//!
//! // {$or: [{name: 'John'}, {$and: [{age: {$gt: 18}}, {active: true}]}]}
//! let w = Where::new().or(vec![
//!     Where::new().field("name", "John"),
//!     Where::new().and(vec![
//!         Where::new().filter("age", FilterSet::new().gt(18)),
//!         Where::new().field("active", true),
//!     ]),
//! ]);
//! ```
//!
//! The same trees can be decoded from JSON, see [`Where::from_json_str`].

mod json;

use crate::value::Value;

/// Boolean combinator over nested `Where` objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootOp {
    And,
    Or,
    Nor,
}

impl RootOp {
    /// All root operators, in the order they are recognised.
    pub const ALL: [RootOp; 3] = [RootOp::And, RootOp::Nor, RootOp::Or];

    /// The `$`-prefixed key.
    pub fn key(self) -> &'static str {
        match self {
            RootOp::And => "$and",
            RootOp::Or => "$or",
            RootOp::Nor => "$nor",
        }
    }

    /// Separator placed between compiled clauses.
    pub fn joiner(self) -> &'static str {
        match self {
            RootOp::And => " AND ",
            RootOp::Or => " OR ",
            RootOp::Nor => " NOR ",
        }
    }

    /// Look up a root operator by key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.key() == key)
    }
}

/// A single per-column operator.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// `col = v`
    Eq(Value),
    /// `col > v`
    Gt(Value),
    /// `col >= v`
    Gte(Value),
    /// `col < v`
    Lt(Value),
    /// `col <= v`
    Lte(Value),
    /// `col <> v`
    Ne(Value),
    /// `col IN (v1, ..., vn)`
    In(Vec<Value>),
    /// `col NOT IN (v1, ..., vn)`
    Nin(Vec<Value>),
    /// `col IS NOT NULL` / `col IS NULL`
    Exists(bool),
    /// `col NOT (...)`
    Not(FilterSet),
}

impl FilterOp {
    /// The `$`-prefixed key of this operator.
    pub fn key(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "$eq",
            FilterOp::Gt(_) => "$gt",
            FilterOp::Gte(_) => "$gte",
            FilterOp::Lt(_) => "$lt",
            FilterOp::Lte(_) => "$lte",
            FilterOp::Ne(_) => "$ne",
            FilterOp::In(_) => "$in",
            FilterOp::Nin(_) => "$nin",
            FilterOp::Exists(_) => "$exists",
            FilterOp::Not(_) => "$not",
        }
    }
}

/// A per-column operator set such as `{$gte: 18, $lte: 65}`.
///
/// Operators compile in insertion order and are joined with `AND`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    ops: Vec<FilterOp>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operator.
    pub fn push(mut self, op: FilterOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn eq(self, value: impl Into<Value>) -> Self {
        self.push(FilterOp::Eq(value.into()))
    }

    pub fn ne(self, value: impl Into<Value>) -> Self {
        self.push(FilterOp::Ne(value.into()))
    }

    pub fn gt(self, value: impl Into<Value>) -> Self {
        self.push(FilterOp::Gt(value.into()))
    }

    pub fn gte(self, value: impl Into<Value>) -> Self {
        self.push(FilterOp::Gte(value.into()))
    }

    pub fn lt(self, value: impl Into<Value>) -> Self {
        self.push(FilterOp::Lt(value.into()))
    }

    pub fn lte(self, value: impl Into<Value>) -> Self {
        self.push(FilterOp::Lte(value.into()))
    }

    /// `$in`. An empty list is legal and compiles to `IN ()`.
    pub fn in_list<T: Into<Value>>(self, values: impl IntoIterator<Item = T>) -> Self {
        self.push(FilterOp::In(values.into_iter().map(Into::into).collect()))
    }

    /// `$nin`.
    pub fn not_in<T: Into<Value>>(self, values: impl IntoIterator<Item = T>) -> Self {
        self.push(FilterOp::Nin(values.into_iter().map(Into::into).collect()))
    }

    pub fn exists(self, exists: bool) -> Self {
        self.push(FilterOp::Exists(exists))
    }

    pub fn not(self, inner: FilterSet) -> Self {
        self.push(FilterOp::Not(inner))
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterOp> {
        self.ops.iter()
    }
}

/// What a column is compared against.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Literal value: equality, or `REGEXP` for [`Value::Regex`].
    Value(Value),
    /// Operator set.
    Filter(FilterSet),
}

/// One key of a [`Where`] object.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Column { name: String, condition: Condition },
    Root { op: RootOp, clauses: Vec<Where> },
}

/// Filter tree, see the [module docs](self).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Where {
    entries: Vec<Entry>,
}

impl Where {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    /// `{column: value}`: equality (or `REGEXP` when `value` is a regex).
    pub fn field(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(Entry::Column {
            name: column.into(),
            condition: Condition::Value(value.into()),
        })
    }

    /// `{column: /pattern/}`.
    pub fn regex(self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.field(column, Value::regex(pattern))
    }

    /// `{column: {$op: ..., ...}}`.
    pub fn filter(self, column: impl Into<String>, filter: FilterSet) -> Self {
        self.push(Entry::Column {
            name: column.into(),
            condition: Condition::Filter(filter),
        })
    }

    /// `{$and: [...]}`.
    pub fn and(self, clauses: impl IntoIterator<Item = Where>) -> Self {
        self.root(RootOp::And, clauses)
    }

    /// `{$or: [...]}`.
    pub fn or(self, clauses: impl IntoIterator<Item = Where>) -> Self {
        self.root(RootOp::Or, clauses)
    }

    /// `{$nor: [...]}`.
    pub fn nor(self, clauses: impl IntoIterator<Item = Where>) -> Self {
        self.root(RootOp::Nor, clauses)
    }

    fn root(self, op: RootOp, clauses: impl IntoIterator<Item = Where>) -> Self {
        self.push(Entry::Root {
            op,
            clauses: clauses.into_iter().collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// Sort order: column → direction.
///
/// Directions are kept as given and validated when the clause is compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy {
    entries: Vec<(String, String)>,
}

impl OrderBy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column with a raw direction string (`asc`/`desc`, any case).
    pub fn by(mut self, column: impl Into<String>, direction: impl Into<String>) -> Self {
        self.entries.push((column.into(), direction.into()));
        self
    }

    pub fn asc(self, column: impl Into<String>) -> Self {
        self.by(column, "asc")
    }

    pub fn desc(self, column: impl Into<String>) -> Self {
        self.by(column, "desc")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, d)| (c.as_str(), d.as_str()))
    }
}

/// Column → value payload used for UPDATE and INSERT.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing an earlier value for the same column in place.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((column, value)),
        }
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
