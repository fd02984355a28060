use std::fmt;

use regex::{Regex, RegexBuilder};

/// A literal value appearing on the right-hand side of a comparison.
///
/// Literals keep the distinction between integers and floats, and between
/// quoted strings and `/.../` regex literals, so later stages can decide how
/// to treat each one (a quoted string under `~` is anchored, a regex literal
/// passes through untouched).
///
/// # Examples
///
/// ```
/// use sprig_query::Value;
///
/// let null = Value::Null;
/// let flag = Value::Boolean(true);
/// let count = Value::Integer(42);
/// let ratio = Value::Float(0.5);
/// let name = Value::String("admin".to_string());
///
/// let roles = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
/// assert_eq!(roles.type_name(), "array");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`
    Null,

    /// `true` / `false`
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// Quoted string, verbatim
    String(String),

    /// `/pattern/` or `/pattern/i`
    Regex(Pattern),

    /// `[a, b, c]`
    Array(Vec<Value>),
}

impl Value {
    /// Returns a human-readable type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Regex(_) => "regex",
            Value::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as array slice
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "'{}'", s),
            Value::Regex(p) => write!(f, "{}", p),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A compiled regular expression together with the source it came from.
///
/// Two patterns are equal when their source text and case-insensitivity flag
/// match; the compiled automaton is not compared.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    case_insensitive: bool,
    regex: Regex,
}

impl Pattern {
    /// Compile `source` into a pattern.
    pub fn new(source: impl Into<String>, case_insensitive: bool) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = RegexBuilder::new(&source)
            .case_insensitive(case_insensitive)
            .build()?;

        Ok(Pattern {
            source,
            case_insensitive,
            regex,
        })
    }

    /// Build a pattern matching `text` literally at the start of the subject.
    pub fn prefix(text: &str) -> Result<Self, regex::Error> {
        Pattern::new(format!("^{}", regex::escape(text)), false)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.case_insensitive == other.case_insensitive
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({})", self)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source.replace('/', "\\/"))?;
        if self.case_insensitive {
            write!(f, "i")?;
        }
        Ok(())
    }
}
