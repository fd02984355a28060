//! CLI support for sprig-query
//!
//! Provides programmatic access to the sprig CLI commands for embedding in
//! other tools.

mod compile;
mod docs;

pub use compile::{CompileOptions, CompileResult, execute_compile, render_ast, render_tokens};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Query failed to compile
    #[error("{kind}: {0}", kind = .0.kind())]
    Compile(#[from] crate::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No query provided
    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoQuery,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'sprig docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Compile(e.into())
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Compile(e.into())
    }
}
