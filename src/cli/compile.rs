//! Compile sprig queries and inspect their intermediate forms

use std::fmt::Write as _;

use super::CliError;
use crate::{compile, parse, tokenize};

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// The filter expression to compile
    pub query: String,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't translate
    pub syntax_only: bool,
}

/// Result of a compile operation
#[derive(Debug)]
pub enum CompileResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query compiled to a filter tree
    Filter(serde_json::Value),
}

impl CompileResult {
    /// Text printed by the binary for this result
    pub fn render(&self, pretty: bool) -> String {
        match self {
            CompileResult::SyntaxValid => "Syntax is valid".to_string(),
            CompileResult::Filter(json) if pretty => format!("{:#}", json),
            CompileResult::Filter(json) => json.to_string(),
        }
    }
}

/// Execute a sprig compile operation
pub fn execute_compile(options: &CompileOptions) -> Result<CompileResult, CliError> {
    let query = options.query.trim();
    if query.is_empty() {
        return Err(CliError::NoQuery);
    }

    if options.syntax_only {
        parse(tokenize(query)?)?;
        return Ok(CompileResult::SyntaxValid);
    }

    let filter = compile(query)?;
    Ok(CompileResult::Filter(filter.to_json()))
}

/// One token per line, prefixed by its `line:column`
pub fn render_tokens(query: &str) -> Result<String, CliError> {
    let mut out = String::new();
    for spanned in tokenize(query)? {
        let _ = writeln!(
            out,
            "{}:{}\t{:?}\t{}",
            spanned.position.line,
            spanned.position.column,
            spanned.token.kind(),
            spanned.token
        );
    }
    Ok(out)
}

/// The syntax tree in prefix notation
pub fn render_ast(query: &str) -> Result<String, CliError> {
    let node = parse(tokenize(query)?)?;
    Ok(node.to_string())
}
