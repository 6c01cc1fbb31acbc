//! Query predicates shared by both store backends.
//!
//! A [`Filter`] is a conjunction of field conditions. It compiles to a MongoDB query
//! document with [`Filter::to_document`] and evaluates against in-memory JSON documents
//! with [`Filter::matches`]. The in-memory semantics follow MongoDB for the supported
//! operators:
//!
//! - a missing field behaves like `null`
//! - equality against an array field matches when any element is equal
//! - ordering operators never match across types (numbers vs strings, null, ...)
//! - `$ne` and `$nin` match documents where the field is missing
//!
//! Two strings that both parse as RFC 3339 timestamps compare by instant. Stored timestamps
//! are fixed width (see [`crate::types::timestamp`]), so this agrees with MongoDB's string
//! order for everything the repositories write.

use chrono::DateTime;
use mongodb::bson::{Bson, Document, doc};
use serde_json::Value;
use std::cmp::Ordering;

/// Comparison applied to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
    Nin(Vec<Value>),
    /// Case-insensitive substring match on string fields
    Like(String),
    /// Array field contains the value
    Has(Value),
    Exists(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Dotted path into the document, e.g. `score.club`
    pub field: String,
    pub comparison: Comparison,
}

/// Conjunction of conditions. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter matching a single document by ID.
    pub fn by_id(id: impl ToString) -> Self {
        Self::new().eq("id", Value::String(id.to_string()))
    }

    pub fn push(&mut self, field: impl Into<String>, comparison: Comparison) {
        self.conditions.push(Condition {
            field: field.into(),
            comparison,
        });
    }

    pub fn with(mut self, field: impl Into<String>, comparison: Comparison) -> Self {
        self.push(field, comparison);
        self
    }

    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, Comparison::Eq(value.into()))
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Compile into a MongoDB query document.
    pub fn to_document(&self) -> Document {
        let mut query = Document::new();
        let mut overflow = Vec::new();

        for condition in &self.conditions {
            let field = mongo_field(&condition.field);
            let expression = condition.comparison.to_bson();
            match query.get_mut(&field) {
                // Merge operator documents on the same field unless an operator repeats
                Some(Bson::Document(existing)) => {
                    let mergeable =
                        matches!(&expression, Bson::Document(ops) if ops.keys().all(|k| !existing.contains_key(k)));
                    match expression {
                        Bson::Document(ops) if mergeable => existing.extend(ops),
                        expression => overflow.push(doc! { field: expression }),
                    }
                }
                Some(_) => overflow.push(doc! { field: expression }),
                None => {
                    query.insert(field, expression);
                }
            }
        }

        if overflow.is_empty() {
            query
        } else {
            let mut clauses = vec![Bson::Document(query)];
            clauses.extend(overflow.into_iter().map(Bson::Document));
            doc! { "$and": clauses }
        }
    }

    /// Evaluate the filter against a JSON document.
    pub fn matches(&self, document: &Value) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.comparison.matches(lookup(document, &condition.field)))
    }
}

/// The document `id` is stored as the MongoDB primary key.
fn mongo_field(field: &str) -> String {
    if field == "id" { "_id".to_string() } else { field.to_string() }
}

impl Comparison {
    fn to_bson(&self) -> Bson {
        match self {
            Comparison::Eq(v) => Bson::Document(doc! { "$eq": to_bson(v) }),
            Comparison::Ne(v) => Bson::Document(doc! { "$ne": to_bson(v) }),
            Comparison::Gt(v) => Bson::Document(doc! { "$gt": to_bson(v) }),
            Comparison::Gte(v) => Bson::Document(doc! { "$gte": to_bson(v) }),
            Comparison::Lt(v) => Bson::Document(doc! { "$lt": to_bson(v) }),
            Comparison::Lte(v) => Bson::Document(doc! { "$lte": to_bson(v) }),
            Comparison::In(vs) => Bson::Document(doc! { "$in": vs.iter().map(to_bson).collect::<Vec<_>>() }),
            Comparison::Nin(vs) => Bson::Document(doc! { "$nin": vs.iter().map(to_bson).collect::<Vec<_>>() }),
            Comparison::Like(s) => Bson::Document(doc! { "$regex": regex::escape(s), "$options": "i" }),
            // Equality against an array field is membership in MongoDB
            Comparison::Has(v) => Bson::Document(doc! { "$elemMatch": { "$eq": to_bson(v) } }),
            Comparison::Exists(b) => Bson::Document(doc! { "$exists": *b }),
        }
    }

    fn matches(&self, actual: Option<&Value>) -> bool {
        let actual_or_null = actual.unwrap_or(&Value::Null);
        match self {
            Comparison::Eq(expected) => equals(actual_or_null, expected),
            Comparison::Ne(expected) => !equals(actual_or_null, expected),
            Comparison::Gt(bound) => ordered(actual_or_null, bound, |o| o == Ordering::Greater),
            Comparison::Gte(bound) => ordered(actual_or_null, bound, |o| o != Ordering::Less),
            Comparison::Lt(bound) => ordered(actual_or_null, bound, |o| o == Ordering::Less),
            Comparison::Lte(bound) => ordered(actual_or_null, bound, |o| o != Ordering::Greater),
            Comparison::In(values) => values.iter().any(|v| equals(actual_or_null, v)),
            Comparison::Nin(values) => !values.iter().any(|v| equals(actual_or_null, v)),
            Comparison::Like(needle) => match actual_or_null {
                Value::String(s) => s.to_lowercase().contains(&needle.to_lowercase()),
                Value::Array(items) => items
                    .iter()
                    .any(|item| item.as_str().is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase()))),
                _ => false,
            },
            Comparison::Has(expected) => match actual_or_null {
                Value::Array(items) => items.iter().any(|item| scalar_equals(item, expected)),
                _ => false,
            },
            Comparison::Exists(should_exist) => actual.is_some() == *should_exist,
        }
    }
}

fn to_bson(value: &Value) -> Bson {
    // serde_json values always convert; fall back to null for the impossible case
    mongodb::bson::to_bson(value).unwrap_or(Bson::Null)
}

/// Resolve a dotted path through nested objects.
fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = document;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

fn equals(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Array(items), expected) if !expected.is_array() => items.iter().any(|item| scalar_equals(item, expected)),
        _ => scalar_equals(actual, expected),
    }
}

fn scalar_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn ordered(actual: &Value, bound: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    match (actual, bound) {
        (Value::Array(items), bound) => items.iter().any(|item| compare_same_type(item, bound).is_some_and(&accept)),
        _ => compare_same_type(actual, bound).is_some_and(accept),
    }
}

fn compare_same_type(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(compare_strings(x, y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn compare_strings(x: &str, y: &str) -> Ordering {
    match (DateTime::parse_from_rfc3339(x), DateTime::parse_from_rfc3339(y)) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => x.cmp(y),
    }
}

/// Total ordering used for in-memory sorting: null < numbers < strings < booleans < other.
pub fn sort_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Number(_)) => 1,
            Some(Value::String(_)) => 2,
            Some(Value::Bool(_)) => 3,
            Some(_) => 4,
        }
    }
    match (a, b) {
        (Some(x), Some(y)) => compare_same_type(x, y).unwrap_or_else(|| rank(a).cmp(&rank(b))),
        _ => rank(a).cmp(&rank(b)),
    }
}

pub fn lookup_field<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    lookup(document, path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Sorting and paging for find operations.
#[derive(Debug, Clone, PartialEq)]
pub struct FindOptions {
    pub skip: u64,
    pub limit: Option<u64>,
    pub sort: Vec<(String, Direction)>,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: None,
            sort: vec![("created_at".to_string(), Direction::Ascending)],
        }
    }
}

impl FindOptions {
    pub fn page(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: Some(limit),
            ..Default::default()
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.sort = vec![(field.into(), direction)];
        self
    }

    /// Sort document for MongoDB, always ending with `_id` so paging is stable.
    pub fn sort_document(&self) -> Document {
        let mut sort = Document::new();
        for (field, direction) in &self.sort {
            let order = match direction {
                Direction::Ascending => 1,
                Direction::Descending => -1,
            };
            sort.insert(mongo_field(field), order);
        }
        if !sort.contains_key("_id") {
            sort.insert("_id", 1);
        }
        sort
    }

    /// Compare two documents according to the sort keys, falling back to `id`.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for (field, direction) in &self.sort {
            let ordering = sort_cmp(lookup(a, field), lookup(b, field));
            let ordering = match direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        sort_cmp(lookup(a, "id"), lookup(b, "id"))
    }
}
