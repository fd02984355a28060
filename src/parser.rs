//! Frame-stack parser for filter expressions.
//!
//! Precedence is not driven by a grammar table. Instead the parser keeps a
//! stack of frames (one per open parenthesis) and folds them at two moments:
//!
//! - every time a clause completes, pending `not` and `and` operators to its
//!   left are folded immediately;
//! - `or` operators are folded only when a frame closes (`)` or end of input).
//!
//! Because `and` is resolved as soon as its right operand exists, it ends up
//! binding tighter than `or` without any explicit precedence levels.

use log::trace;
use thiserror::Error;

use crate::{
    ast::{BoolOp, CompareOp, Node, Token},
    lexer::{Position, Spanned},
    value::Value,
};

/// Errors raised while building the syntax tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Expected {expected} at {position}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: Position,
    },

    #[error("Unexpected ',' at {0} outside of an array literal")]
    StrayComma(Position),

    #[error("Unmatched '(' at {0}")]
    UnclosedGroup(Position),

    #[error("Unmatched ')' at {0}")]
    UnopenedGroup(Position),

    #[error("Unmatched '[' at {0}")]
    UnclosedArray(Position),

    #[error("Unmatched ']' at {0}")]
    UnopenedArray(Position),

    #[error("Empty parentheses at {0}")]
    EmptyGroup(Position),

    #[error("Empty expression")]
    EmptyExpression,

    #[error("Incomplete comparison at {position}: {message}")]
    IncompleteClause {
        message: String,
        position: Position,
    },

    #[error("Missing 'and' or 'or' before {position}")]
    MissingOperator { position: Position },

    #[error("'{operator}' at {position} is missing the expression on its right")]
    DanglingOperator {
        operator: &'static str,
        position: Position,
    },
}

/// Partially reduced contents of a frame.
#[derive(Debug, Clone)]
enum Entry {
    Field(String, Position),
    Compare(CompareOp, Position),
    Bool(BoolOp, Position),
    Not(Position),
    Node(Node, Position),
}

impl Entry {
    fn position(&self) -> Position {
        match self {
            Entry::Field(_, p)
            | Entry::Compare(_, p)
            | Entry::Bool(_, p)
            | Entry::Not(p)
            | Entry::Node(_, p) => *p,
        }
    }

    fn describe(&self) -> String {
        match self {
            Entry::Field(name, _) => format!("field '{}'", name),
            Entry::Compare(op, _) => format!("operator '{}'", op),
            Entry::Bool(op, _) => format!("'{}'", op),
            Entry::Not(_) => "'not'".to_string(),
            Entry::Node(_, _) => "expression".to_string(),
        }
    }
}

/// Open parenthesis (or the implicit root) and everything pushed since.
#[derive(Debug)]
struct Frame {
    opened_at: Position,
    entries: Vec<Entry>,
}

impl Frame {
    fn new(opened_at: Position) -> Self {
        Frame {
            opened_at,
            entries: Vec::new(),
        }
    }

    fn second_from_top(&self) -> Option<&Entry> {
        self.entries.len().checked_sub(2).map(|i| &self.entries[i])
    }
}

/// Array literal being accumulated between `[` and `]`.
#[derive(Debug)]
struct ArrayLiteral {
    opened_at: Position,
    items: Vec<Value>,
    needs_separator: bool,
}

pub struct Parser {
    tokens: std::vec::IntoIter<Spanned>,
    stack: Vec<Frame>,
    array: Option<ArrayLiteral>,
}

impl Parser {
    pub fn new(tokens: Vec<Spanned>) -> Self {
        Parser {
            tokens: tokens.into_iter(),
            stack: vec![Frame::new(Position::start())],
            array: None,
        }
    }

    fn top(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn push(&mut self, entry: Entry) {
        self.top().entries.push(entry);
    }

    /// Consume the token list and return the root node.
    pub fn parse(mut self) -> Result<Node, ParseError> {
        while let Some(Spanned { token, position }) = self.tokens.next() {
            match token {
                Token::Eof => break,
                Token::LParen => self.open_group(position)?,
                Token::RParen => self.close_group(position)?,
                Token::LBracket => self.open_array(position)?,
                Token::RBracket => self.close_array(position)?,
                Token::Comma => self.separator(position)?,
                token if token.is_literal() => self.literal(token, position)?,
                token => self.operator(token, position)?,
            }
        }

        if let Some(array) = &self.array {
            return Err(ParseError::UnclosedArray(array.opened_at));
        }
        if self.stack.len() > 1 {
            return Err(ParseError::UnclosedGroup(self.top().opened_at));
        }

        let root = self.stack.pop().ok_or(ParseError::EmptyExpression)?;
        match condense_or(root.entries)? {
            Some(node) => Ok(node),
            None => Err(ParseError::EmptyExpression),
        }
    }

    fn reject_inside_array(&self, token: &Token, position: Position) -> Result<(), ParseError> {
        if self.array.is_some() {
            return Err(ParseError::UnexpectedToken {
                expected: "a literal, ',' or ']' inside array",
                found: token.to_string(),
                position,
            });
        }
        Ok(())
    }

    fn open_group(&mut self, position: Position) -> Result<(), ParseError> {
        self.reject_inside_array(&Token::LParen, position)?;
        if let Some(Entry::Compare(..)) = self.top().entries.last() {
            return Err(ParseError::UnexpectedToken {
                expected: "a literal value",
                found: Token::LParen.to_string(),
                position,
            });
        }
        self.stack.push(Frame::new(position));
        Ok(())
    }

    fn close_group(&mut self, position: Position) -> Result<(), ParseError> {
        self.reject_inside_array(&Token::RParen, position)?;
        if self.stack.len() == 1 {
            return Err(ParseError::UnopenedGroup(position));
        }

        let frame = self.stack.pop().ok_or(ParseError::UnopenedGroup(position))?;
        let node = condense_or(frame.entries)?
            .ok_or(ParseError::EmptyGroup(frame.opened_at))?;

        trace!("closed group opened at {}", frame.opened_at);
        self.push(Entry::Node(node, frame.opened_at));
        self.reduce()
    }

    fn open_array(&mut self, position: Position) -> Result<(), ParseError> {
        self.reject_inside_array(&Token::LBracket, position)?;
        self.array = Some(ArrayLiteral {
            opened_at: position,
            items: Vec::new(),
            needs_separator: false,
        });
        Ok(())
    }

    fn close_array(&mut self, position: Position) -> Result<(), ParseError> {
        let array = self.array.take().ok_or(ParseError::UnopenedArray(position))?;
        if !array.needs_separator && !array.items.is_empty() {
            return Err(ParseError::UnexpectedToken {
                expected: "a literal after ','",
                found: Token::RBracket.to_string(),
                position,
            });
        }

        self.complete_clause(Value::Array(array.items), array.opened_at)
    }

    fn separator(&mut self, position: Position) -> Result<(), ParseError> {
        let array = self.array.as_mut().ok_or(ParseError::StrayComma(position))?;
        if !array.needs_separator {
            return Err(ParseError::UnexpectedToken {
                expected: "a literal",
                found: Token::Comma.to_string(),
                position,
            });
        }
        array.needs_separator = false;
        Ok(())
    }

    fn literal(&mut self, token: Token, position: Position) -> Result<(), ParseError> {
        let found = token.to_string();
        let value = match token {
            Token::Integer(n) => Value::Integer(n),
            Token::Float(n) => Value::Float(n),
            Token::String(s) => Value::String(s),
            Token::Regex(p) => Value::Regex(p),
            Token::Boolean(b) => Value::Boolean(b),
            _ => Value::Null,
        };

        if let Some(array) = self.array.as_mut() {
            if array.needs_separator {
                return Err(ParseError::UnexpectedToken {
                    expected: "',' or ']'",
                    found,
                    position,
                });
            }
            if matches!(value, Value::Regex(_)) {
                return Err(ParseError::UnexpectedToken {
                    expected: "a number, string, boolean or null inside array",
                    found,
                    position,
                });
            }
            array.items.push(value);
            array.needs_separator = true;
            return Ok(());
        }

        self.complete_clause(value, position)
    }

    fn operator(&mut self, token: Token, position: Position) -> Result<(), ParseError> {
        self.reject_inside_array(&token, position)?;
        let entry = match token {
            Token::Identifier(name) => Entry::Field(name, position),
            Token::And => Entry::Bool(BoolOp::And, position),
            Token::Or => Entry::Bool(BoolOp::Or, position),
            Token::Not => Entry::Not(position),
            other => match CompareOp::from_token(&other) {
                Some(op) => Entry::Compare(op, position),
                None => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "a field, operator or literal",
                        found: other.to_string(),
                        position,
                    });
                }
            },
        };
        self.push(entry);
        Ok(())
    }

    /// Fold `[field, operator]` on top of the current frame together with
    /// `value` into a clause, then reduce.
    fn complete_clause(&mut self, value: Value, value_at: Position) -> Result<(), ParseError> {
        let frame = self.top();
        let op = match frame.entries.pop() {
            Some(Entry::Compare(op, _)) => op,
            Some(other) => {
                return Err(ParseError::UnexpectedToken {
                    expected: "a comparison operator",
                    found: other.describe(),
                    position: other.position(),
                });
            }
            None => {
                return Err(ParseError::IncompleteClause {
                    message: format!("value {} has no field or operator", value),
                    position: value_at,
                });
            }
        };

        let (field, field_at) = match frame.entries.pop() {
            Some(Entry::Field(name, position)) => (name, position),
            Some(other) => {
                return Err(ParseError::UnexpectedToken {
                    expected: "a field name",
                    found: other.describe(),
                    position: other.position(),
                });
            }
            None => {
                return Err(ParseError::IncompleteClause {
                    message: format!("operator '{}' has no field on its left", op),
                    position: value_at,
                });
            }
        };

        trace!("clause {} {} {}", field, op, value);
        frame
            .entries
            .push(Entry::Node(Node::clause(field, op, value), field_at));
        self.reduce()
    }

    /// Absorb pending `not` operators, then eagerly fold `and`.
    fn reduce(&mut self) -> Result<(), ParseError> {
        let frame = self.top();

        while let Some(Entry::Not(_)) = frame.second_from_top() {
            let node = frame.entries.pop();
            let not = frame.entries.pop();
            if let (Some(Entry::Node(node, _)), Some(Entry::Not(position))) = (node, not) {
                trace!("absorbed 'not' at {}", position);
                frame.entries.push(Entry::Node(Node::negate(node), position));
            }
        }

        while let Some(Entry::Bool(BoolOp::And, _)) = frame.second_from_top() {
            let right = frame.entries.pop();
            let and = frame.entries.pop();
            let left = frame.entries.pop();
            match (left, right) {
                (Some(Entry::Node(left, position)), Some(Entry::Node(right, _))) => {
                    trace!("condensed 'and' at {}", position);
                    frame
                        .entries
                        .push(Entry::Node(Node::merge(BoolOp::And, left, right), position));
                }
                (Some(other), _) => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "an expression before 'and'",
                        found: other.describe(),
                        position: other.position(),
                    });
                }
                (None, _) => {
                    let position = and.map(|e| e.position()).unwrap_or_default();
                    return Err(ParseError::UnexpectedToken {
                        expected: "an expression before 'and'",
                        found: "nothing".to_string(),
                        position,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Fold a closed frame of `node (or node)*` into a single node.
///
/// Returns `Ok(None)` for an empty frame.
fn condense_or(entries: Vec<Entry>) -> Result<Option<Node>, ParseError> {
    let mut result: Option<Node> = None;
    let mut pending_or: Option<Position> = None;

    let mut entries = entries.into_iter().peekable();
    while let Some(entry) = entries.next() {
        let expect_node = result.is_none() || pending_or.is_some();
        match (expect_node, entry) {
            (true, Entry::Node(node, _)) => {
                result = Some(match result.take() {
                    Some(left) => Node::merge(BoolOp::Or, left, node),
                    None => node,
                });
                pending_or = None;
            }
            (false, Entry::Bool(BoolOp::Or, position)) => pending_or = Some(position),
            (false, Entry::Bool(BoolOp::And, position)) => {
                return Err(ParseError::DanglingOperator {
                    operator: "and",
                    position,
                });
            }
            (_, Entry::Not(position)) => {
                return Err(ParseError::DanglingOperator {
                    operator: "not",
                    position,
                });
            }
            (false, Entry::Node(_, position)) | (false, Entry::Field(_, position)) => {
                return Err(ParseError::MissingOperator { position });
            }
            (_, Entry::Field(name, position)) => {
                let message = match entries.peek() {
                    Some(Entry::Compare(op, _)) => {
                        format!("field '{}' with operator '{}' is missing a value", name, op)
                    }
                    _ => format!("field '{}' is missing an operator and value", name),
                };
                return Err(ParseError::IncompleteClause { message, position });
            }
            (_, Entry::Compare(op, position)) => {
                return Err(ParseError::IncompleteClause {
                    message: format!("operator '{}' is missing a value", op),
                    position,
                });
            }
            (true, other @ Entry::Bool(..)) => {
                return Err(ParseError::UnexpectedToken {
                    expected: "an expression",
                    found: other.describe(),
                    position: other.position(),
                });
            }
        }
    }

    if let Some(position) = pending_or {
        return Err(ParseError::DanglingOperator {
            operator: "or",
            position,
        });
    }

    if let Some(node) = &result {
        trace!("condensed frame into {}", node);
    }
    Ok(result)
}

/// Build the syntax tree for a token list produced by [`crate::lexer::tokenize`].
pub fn parse(tokens: Vec<Spanned>) -> Result<Node, ParseError> {
    Parser::new(tokens).parse()
}
