use log::trace;
use thiserror::Error;

use crate::{
    ast::{BoolOp, CompareOp, Node},
    filter::{Condition, Filter},
    value::{Pattern, Value},
};

/// Errors raised when a well-formed syntax tree cannot be expressed as a
/// filter tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslateError {
    #[error("Expected array literal for {op} on field '{field}', found {found}")]
    ExpectedArray {
        op: &'static str,
        field: String,
        found: String,
    },

    #[error("Expected a string or regex literal for $regex on field '{field}', found {found}")]
    ExpectedPattern { field: String, found: String },

    #[error("Invalid field path '{0}': path segments cannot be empty")]
    InvalidPath(String),

    #[error("Number {value} on field '{field}' is not finite")]
    NonFiniteNumber { field: String, value: f64 },

    #[error("Cannot build a regex from '{text}': {message}")]
    InvalidPattern { text: String, message: String },
}

/// Split a dotted field path into its segments.
///
/// # Examples
/// ```
/// use sprig_query::translator::split_path;
///
/// assert_eq!(split_path("name").unwrap(), vec!["name"]);
/// assert_eq!(split_path("user.address.city").unwrap(), vec!["user", "address", "city"]);
/// assert!(split_path("user..city").is_err());
/// ```
pub fn split_path(field: &str) -> Result<Vec<&str>, TranslateError> {
    let segments: Vec<&str> = field.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(TranslateError::InvalidPath(field.to_string()));
    }
    Ok(segments)
}

/// Walk a syntax tree and build the equivalent filter tree.
pub fn translate(node: &Node) -> Result<Filter, TranslateError> {
    match node {
        Node::Clause { field, op, value } => {
            let path = split_path(field)?;
            let condition = translate_condition(field, *op, value)?;
            trace!("{} {} {} -> {}", field, op, value, condition.key());
            Ok(Filter::at_path(path, condition))
        }
        Node::Group { op, children } => {
            let children = children
                .iter()
                .map(translate)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(match op {
                BoolOp::And => Filter::And(children),
                BoolOp::Or => Filter::Or(children),
            })
        }
        Node::Not(inner) => Ok(Filter::Not(Box::new(translate(inner)?))),
    }
}

fn translate_condition(field: &str, op: CompareOp, value: &Value) -> Result<Condition, TranslateError> {
    check_finite(field, value)?;

    // `x == null` / `x != null` are existence checks
    if value.is_null() {
        match op {
            CompareOp::Eq => return Ok(Condition::Exists(false)),
            CompareOp::Ne => return Ok(Condition::Exists(true)),
            _ => {}
        }
    }

    let condition = match op {
        CompareOp::Eq => Condition::Eq(value.clone()),
        CompareOp::Ne => Condition::Ne(value.clone()),
        CompareOp::Lt => Condition::Lt(value.clone()),
        CompareOp::Lte => Condition::Lte(value.clone()),
        CompareOp::Gt => Condition::Gt(value.clone()),
        CompareOp::Gte => Condition::Gte(value.clone()),
        CompareOp::In => Condition::In(expect_array(field, op, value)?),
        CompareOp::Nin => Condition::Nin(expect_array(field, op, value)?),
        CompareOp::All => Condition::All(expect_array(field, op, value)?),
        CompareOp::Regex => Condition::Regex(expect_pattern(field, value)?),
    };
    Ok(condition)
}

/// JSON has no representation for infinity or NaN.
fn check_finite(field: &str, value: &Value) -> Result<(), TranslateError> {
    match value {
        Value::Float(n) if !n.is_finite() => Err(TranslateError::NonFiniteNumber {
            field: field.to_string(),
            value: *n,
        }),
        Value::Array(items) => items.iter().try_for_each(|item| check_finite(field, item)),
        _ => Ok(()),
    }
}

fn expect_array(field: &str, op: CompareOp, value: &Value) -> Result<Vec<Value>, TranslateError> {
    value
        .as_array()
        .map(<[Value]>::to_vec)
        .ok_or_else(|| TranslateError::ExpectedArray {
            op: op.key(),
            field: field.to_string(),
            found: format!("{} {}", value.type_name(), value),
        })
}

/// A `/regex/` passes through; a quoted string becomes a prefix match.
fn expect_pattern(field: &str, value: &Value) -> Result<Pattern, TranslateError> {
    match value {
        Value::Regex(pattern) => Ok(pattern.clone()),
        Value::String(text) => Pattern::prefix(text).map_err(|e| TranslateError::InvalidPattern {
            text: text.clone(),
            message: e.to_string(),
        }),
        other => Err(TranslateError::ExpectedPattern {
            field: field.to_string(),
            found: format!("{} {}", other.type_name(), other),
        }),
    }
}
