use std::fmt;

use crate::value::Pattern;

/// Lexical token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Integer
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -10
    /// ```
    Integer(i64),

    /// Floating-point number
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -0.5
    /// ```
    Float(f64),

    /// String literal enclosed in single or double quotes, taken verbatim
    ///
    /// # Examples
    /// ```text
    /// 'admin'
    /// "it's"
    /// ```
    String(String),

    /// Regex literal with an optional `i` flag
    ///
    /// # Examples
    /// ```text
    /// /^admin/
    /// /root$/i
    /// ```
    Regex(Pattern),

    /// Boolean values
    Boolean(bool),

    /// Null value
    Null,

    // Identifiers
    /// Field path, dots included
    ///
    /// # Examples
    /// ```text
    /// age
    /// user.address.city
    /// _id
    /// ```
    Identifier(String),

    // Comparison
    /// Equality operator (`==`)
    EqEq,

    /// Inequality operator (`!=`)
    NotEq,

    /// Less than (`<`)
    Lt,

    /// Less than or equal (`<=`)
    LtEq,

    /// Greater than (`>`)
    Gt,

    /// Greater than or equal (`>=`)
    GtEq,

    /// Regex match (`~`)
    Tilde,

    /// Array membership (`in`)
    In,

    /// Negated array membership (`not-in`)
    NotIn,

    /// Array containment (`all`)
    All,

    // Logical
    /// Logical AND (`and`, `&&`)
    And,

    /// Logical OR (`or`, `||`)
    Or,

    /// Negation (`not`, `!`)
    Not,

    // Delimiters
    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// Left bracket opening an array literal
    LBracket,

    /// Right bracket
    RBracket,

    /// Comma separating array elements
    Comma,

    /// End of input
    Eof,
}

/// Coarse classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Operator,
    Literal,
    Grouping,
    Array,
    Punctuation,
    Unary,
    Boolean,
    Eof,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        use Token::*;
        match self {
            Integer(_) | Float(_) | String(_) | Regex(_) | Boolean(_) | Null => TokenKind::Literal,
            Identifier(_) => TokenKind::Identifier,
            EqEq | NotEq | Lt | LtEq | Gt | GtEq | Tilde | In | NotIn | All => TokenKind::Operator,
            And | Or => TokenKind::Boolean,
            Not => TokenKind::Unary,
            LParen | RParen => TokenKind::Grouping,
            LBracket | RBracket => TokenKind::Array,
            Comma => TokenKind::Punctuation,
            Eof => TokenKind::Eof,
        }
    }

    pub fn is_literal(&self) -> bool {
        self.kind() == TokenKind::Literal
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(n) => write!(f, "{}", n),
            Token::Float(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "'{}'", s),
            Token::Regex(p) => write!(f, "{}", p),
            Token::Boolean(b) => write!(f, "{}", b),
            Token::Null => write!(f, "null"),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::EqEq => write!(f, "'=='"),
            Token::NotEq => write!(f, "'!='"),
            Token::Lt => write!(f, "'<'"),
            Token::LtEq => write!(f, "'<='"),
            Token::Gt => write!(f, "'>'"),
            Token::GtEq => write!(f, "'>='"),
            Token::Tilde => write!(f, "'~'"),
            Token::In => write!(f, "'in'"),
            Token::NotIn => write!(f, "'not-in'"),
            Token::All => write!(f, "'all'"),
            Token::And => write!(f, "'and'"),
            Token::Or => write!(f, "'or'"),
            Token::Not => write!(f, "'not'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::Comma => write!(f, "','"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}
