//! # Sprig Query Language - Abstract Syntax Tree
//!
//! This module defines the tokens and syntax tree for Sprig filter
//! expressions, the boolean search strings that compile down to filter trees.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Comparison and boolean operators
//! - **[nodes]** - Syntax tree nodes (clauses, groups, negation)
//!
//! ## Quick Start
//!
//! ```text
//! age < 35 and not (role == 'admin' or role == 'root')
//! ```
//!
//! This expression parses to an `and` group holding a clause and a negated
//! `or` group.
//!
//! ## Core Concepts
//!
//! ### Precedence
//!
//! `not` binds tightest, then `and`, then `or`. Parentheses override both:
//!
//! ```text
//! a == 1 and b == 2 or c == 3     // (a and b) or c
//! a == 1 and (b == 2 or c == 3)   // a and (b or c)
//! ```
//!
//! ### Field Paths
//!
//! Field names may contain dots. The path stays a single string in the syntax
//! tree and is only split into nested levels during translation.
//!
//! ```text
//! user.address.city == 'Oslo'
//! ```
//!
//! ### Literals
//!
//! Numbers, quoted strings, `/regex/` literals (optionally `/regex/i`),
//! `true`, `false`, `null`, and arrays of scalars such as `[1, 'two', 3.5]`.
pub mod nodes;
pub mod operators;
pub mod tokens;

pub use nodes::Node;
pub use operators::{BoolOp, CompareOp};
pub use tokens::{Token, TokenKind};
