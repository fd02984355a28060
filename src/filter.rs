//! Storage-agnostic filter tree.
//!
//! This is the value handed to a query executor. It has the same shape as a
//! filter written by hand as nested objects:
//!
//! ```text
//! { $and: [ { age: { $lt: 35 } }, { $not: { role: { $eq: 'admin' } } } ] }
//! ```

use crate::value::{Pattern, Value};

/// Terminal operator mapping, the innermost level of a field path.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(Value),
    Ne(Value),
    Lt(Value),
    Lte(Value),
    Gt(Value),
    Gte(Value),
    In(Vec<Value>),
    Nin(Vec<Value>),
    All(Vec<Value>),
    Regex(Pattern),
    Exists(bool),
}

impl Condition {
    pub fn key(&self) -> &'static str {
        match self {
            Condition::Eq(_) => "$eq",
            Condition::Ne(_) => "$ne",
            Condition::Lt(_) => "$lt",
            Condition::Lte(_) => "$lte",
            Condition::Gt(_) => "$gt",
            Condition::Gte(_) => "$gte",
            Condition::In(_) => "$in",
            Condition::Nin(_) => "$nin",
            Condition::All(_) => "$all",
            Condition::Regex(_) => "$regex",
            Condition::Exists(_) => "$exists",
        }
    }
}

/// A node of the filter tree.
///
/// Logical forms (`And`, `Or`, `Not`) and field forms never share a level.
/// A dotted path `a.b.c` becomes three nested `Field` levels wrapping a
/// single `Condition`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
    Field { name: String, filter: Box<Filter> },
    Condition(Condition),
}

impl Filter {
    /// Nest `condition` under each segment of `path`, outermost first.
    pub fn at_path<'a>(path: impl IntoIterator<Item = &'a str>, condition: Condition) -> Self {
        let segments: Vec<&str> = path.into_iter().collect();
        segments
            .into_iter()
            .rev()
            .fold(Filter::Condition(condition), |inner, name| Filter::Field {
                name: name.to_string(),
                filter: Box::new(inner),
            })
    }

    /// Every dotted field path referenced by the tree, in first-seen order.
    ///
    /// Useful for checking the filter against a known set of model fields
    /// before handing it to a store.
    pub fn fields(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_fields(&mut Vec::new(), &mut out);
        out
    }

    fn collect_fields(&self, prefix: &mut Vec<String>, out: &mut Vec<String>) {
        match self {
            Filter::And(children) | Filter::Or(children) => {
                for child in children {
                    child.collect_fields(prefix, out);
                }
            }
            Filter::Not(inner) => inner.collect_fields(prefix, out),
            Filter::Field { name, filter } => {
                prefix.push(name.clone());
                filter.collect_fields(prefix, out);
                prefix.pop();
            }
            Filter::Condition(_) => {
                let path = prefix.join(".");
                if !path.is_empty() && !out.contains(&path) {
                    out.push(path);
                }
            }
        }
    }
}
