pub mod ast;
pub mod error;
pub mod filter;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod translator;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{BoolOp, CompareOp, Node, Token, TokenKind};
pub use error::{Error, ErrorKind};
pub use filter::{Condition, Filter};
pub use lexer::{LexError, Lexer, Position, Spanned, tokenize};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser, parse};
pub use translator::{TranslateError, translate};
pub use value::{Pattern, Value};

use log::debug;

/// Compile a filter expression into a filter tree.
///
/// Runs the three stages in order (tokenize, parse, translate) and stops at
/// the first error. No partial tree is ever returned.
///
/// # Examples
///
/// ```
/// use sprig_query::compile;
/// use serde_json::json;
///
/// let filter = compile("age < 35 and not (role == 'admin' or role == 'root')").unwrap();
/// assert_eq!(
///     filter.to_json(),
///     json!({
///         "$and": [
///             { "age": { "$lt": 35 } },
///             { "$not": { "$or": [
///                 { "role": { "$eq": "admin" } },
///                 { "role": { "$eq": "root" } }
///             ] } }
///         ]
///     })
/// );
/// ```
pub fn compile(text: &str) -> Result<Filter, Error> {
    let tokens = tokenize(text)?;
    debug!("tokenized {} tokens", tokens.len());

    let node = parse(tokens)?;
    debug!("parsed {}", node);

    let filter = translate(&node)?;
    debug!("compiled filter {}", filter.to_json());
    Ok(filter)
}

/// Compile a filter expression straight to its JSON form.
pub fn compile_json(text: &str) -> Result<serde_json::Value, Error> {
    compile(text).map(|filter| filter.to_json())
}
