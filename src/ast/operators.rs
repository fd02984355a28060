use std::fmt;

use crate::ast::Token;

/// Comparison operators, named after their filter-tree keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`==`)
    Eq,
    /// Not equal (`!=`)
    Ne,
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    Lte,
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    Gte,
    /// Member of array (`in`)
    In,
    /// Not a member of array (`not-in`)
    Nin,
    /// Regex match (`~`)
    Regex,
    /// Contains every element of array (`all`)
    All,
}

impl CompareOp {
    /// Operator-translation table from comparison tokens.
    pub fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::EqEq => Some(CompareOp::Eq),
            Token::NotEq => Some(CompareOp::Ne),
            Token::Lt => Some(CompareOp::Lt),
            Token::LtEq => Some(CompareOp::Lte),
            Token::Gt => Some(CompareOp::Gt),
            Token::GtEq => Some(CompareOp::Gte),
            Token::In => Some(CompareOp::In),
            Token::NotIn => Some(CompareOp::Nin),
            Token::Tilde => Some(CompareOp::Regex),
            Token::All => Some(CompareOp::All),
            _ => None,
        }
    }

    /// Filter-tree key, e.g. `$lte`.
    pub fn key(self) -> &'static str {
        match self {
            CompareOp::Eq => "$eq",
            CompareOp::Ne => "$ne",
            CompareOp::Lt => "$lt",
            CompareOp::Lte => "$lte",
            CompareOp::Gt => "$gt",
            CompareOp::Gte => "$gte",
            CompareOp::In => "$in",
            CompareOp::Nin => "$nin",
            CompareOp::Regex => "$regex",
            CompareOp::All => "$all",
        }
    }

    /// Surface syntax, e.g. `<=`.
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::In => "in",
            CompareOp::Nin => "not-in",
            CompareOp::Regex => "~",
            CompareOp::All => "all",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Boolean group operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolOp::And => f.write_str("and"),
            BoolOp::Or => f.write_str("or"),
        }
    }
}
