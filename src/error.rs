//! Crate-level error type.

use thiserror::Error;

use crate::{lexer::LexError, parser::ParseError, translator::TranslateError};

/// Broad error category, mirroring what a caller shows the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The text is not a well-formed expression (lexer or parser)
    Syntax,
    /// The expression is well-formed but an operand has the wrong type
    Type,
}

/// Any error produced while compiling a query expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Translate(#[from] TranslateError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Lex(_) | Error::Parse(_) => ErrorKind::Syntax,
            Error::Translate(_) => ErrorKind::Type,
        }
    }

    pub fn is_syntax(&self) -> bool {
        self.kind() == ErrorKind::Syntax
    }

    pub fn is_type(&self) -> bool {
        self.kind() == ErrorKind::Type
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "Syntax error"),
            ErrorKind::Type => write!(f, "Type error"),
        }
    }
}
