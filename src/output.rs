//! JSON rendering for filter trees.
//!
//! The filter tree is rendered as the nested-object form a store would accept
//! from a caller directly, so compiled and hand-written filters are
//! interchangeable.
//!
//! # Features
//!
//! - **Compact output** via [`to_json()`] - minimal whitespace
//! - **Pretty output** via [`to_json_pretty()`] - 2-space indentation
//! - **Regexes** render as `{"$regex": "<source>"}` with `"$options": "i"`
//!   when case-insensitive
//! - **Type preservation** - integers and floats stay distinct
//!
//! # Examples
//!
//! ```
//! use sprig_query::compile;
//! use sprig_query::output::to_json;
//!
//! let filter = compile("age >= 18").unwrap();
//! assert_eq!(to_json(&filter), r#"{"age":{"$gte":18}}"#);
//! ```

use serde_json::{Map, Number, Value as Json};

use crate::{
    filter::{Condition, Filter},
    value::{Pattern, Value},
};

impl Filter {
    /// Convert the filter tree into a `serde_json::Value`.
    pub fn to_json(&self) -> Json {
        match self {
            Filter::And(children) => single("$and", children_to_json(children)),
            Filter::Or(children) => single("$or", children_to_json(children)),
            Filter::Not(inner) => single("$not", inner.to_json()),
            Filter::Field { name, filter } => single(name, filter.to_json()),
            Filter::Condition(condition) => condition_to_json(condition),
        }
    }
}

fn children_to_json(children: &[Filter]) -> Json {
    Json::Array(children.iter().map(Filter::to_json).collect())
}

fn single(key: &str, value: Json) -> Json {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Json::Object(map)
}

fn condition_to_json(condition: &Condition) -> Json {
    let key = condition.key();
    match condition {
        Condition::Eq(v)
        | Condition::Ne(v)
        | Condition::Lt(v)
        | Condition::Lte(v)
        | Condition::Gt(v)
        | Condition::Gte(v) => single(key, value_to_json(v)),
        Condition::In(items) | Condition::Nin(items) | Condition::All(items) => {
            single(key, Json::Array(items.iter().map(value_to_json).collect()))
        }
        Condition::Regex(pattern) => pattern_to_json(pattern),
        Condition::Exists(exists) => single(key, Json::Bool(*exists)),
    }
}

fn pattern_to_json(pattern: &Pattern) -> Json {
    let mut map = Map::new();
    map.insert("$regex".to_string(), Json::String(pattern.source().to_string()));
    if pattern.is_case_insensitive() {
        map.insert("$options".to_string(), Json::String("i".to_string()));
    }
    Json::Object(map)
}

/// Convert a literal into a `serde_json::Value`
///
/// `translate` rejects infinite and NaN floats. In a hand-built filter they
/// render as their text (`"inf"`, `"NaN"`) rather than as `null`.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Boolean(b) => Json::Bool(*b),
        Value::Integer(n) => Json::Number((*n).into()),
        Value::Float(n) => {
            Number::from_f64(*n).map_or_else(|| Json::String(n.to_string()), Json::Number)
        }
        Value::String(s) => Json::String(s.clone()),
        Value::Regex(pattern) => pattern_to_json(pattern),
        Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
    }
}

/// Renders a filter tree as compact JSON.
///
/// Object keys come out sorted, so the output is deterministic.
pub fn to_json(filter: &Filter) -> String {
    filter.to_json().to_string()
}

/// Renders a filter tree as pretty-printed JSON with 2-space indentation.
///
/// # Examples
///
/// ```
/// use sprig_query::compile;
/// use sprig_query::output::to_json_pretty;
///
/// let filter = compile("a == 1").unwrap();
/// assert_eq!(to_json_pretty(&filter), "{\n  \"a\": {\n    \"$eq\": 1\n  }\n}");
/// ```
pub fn to_json_pretty(filter: &Filter) -> String {
    format!("{:#}", filter.to_json())
}
