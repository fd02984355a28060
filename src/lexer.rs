use std::fmt;

use thiserror::Error;

use crate::{ast::Token, value::Pattern};

/// Location of a token in the query text.
///
/// `offset` counts characters from the start of the input (0-based); `line`
/// and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A token together with the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: Position,
}

/// Errors raised while scanning query text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unterminated string literal starting at {0}")]
    UnterminatedString(Position),

    #[error("Unterminated regex literal starting at {0}")]
    UnterminatedRegex(Position),

    #[error("Invalid regex /{pattern}/ at {position}: {message}")]
    InvalidRegex {
        pattern: String,
        message: String,
        position: Position,
    },

    #[error("Unsupported regex flag '{flag}' at {position} (only 'i' is supported)")]
    UnsupportedRegexFlag { flag: char, position: Position },

    #[error("Invalid number '{text}' at {position}")]
    InvalidNumber { text: String, position: Position },

    #[error("Unexpected '{found}' at {position} (did you mean '{expected}'?)")]
    IncompleteOperator {
        found: char,
        expected: &'static str,
        position: Position,
    },

    #[error("Unexpected character '{ch}' at {position}")]
    UnexpectedCharacter { ch: char, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedString(position) | LexError::UnterminatedRegex(position) => {
                *position
            }
            LexError::InvalidRegex { position, .. }
            | LexError::UnsupportedRegexFlag { position, .. }
            | LexError::InvalidNumber { position, .. }
            | LexError::IncompleteOperator { position, .. }
            | LexError::UnexpectedCharacter { position, .. } => *position,
        }
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '.'
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if self.current_char() == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.position += 1;
    }

    fn here(&self) -> Position {
        Position {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if is_identifier_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// `-in` directly after `not`, not followed by more identifier characters
    fn at_not_in_suffix(&self) -> bool {
        self.current_char() == Some('-')
            && self.peek_char(1).is_some_and(|c| c.eq_ignore_ascii_case(&'i'))
            && self.peek_char(2).is_some_and(|c| c.eq_ignore_ascii_case(&'n'))
            && !self.peek_char(3).is_some_and(is_identifier_char)
    }

    fn read_word(&mut self) -> Token {
        let word = self.read_identifier();

        match word.to_ascii_lowercase().as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            "not" if self.at_not_in_suffix() => {
                for _ in 0..3 {
                    self.advance();
                }
                Token::NotIn
            }
            "not" => Token::Not,
            "in" => Token::In,
            "all" => Token::All,
            "true" => Token::Boolean(true),
            "false" => Token::Boolean(false),
            "null" => Token::Null,
            _ => Token::Identifier(word),
        }
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.here();
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == quote {
                return Ok(result);
            }
            result.push(ch);
        }

        Err(LexError::UnterminatedString(start))
    }

    fn read_regex(&mut self) -> Result<Pattern, LexError> {
        let start = self.here();
        let mut source = String::new();
        self.advance(); // Consume opening slash

        loop {
            match self.current_char() {
                None => return Err(LexError::UnterminatedRegex(start)),
                Some('/') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.current_char() {
                        Some('/') => source.push('/'),
                        Some(ch) => {
                            source.push('\\');
                            source.push(ch);
                        }
                        None => return Err(LexError::UnterminatedRegex(start)),
                    }
                    self.advance();
                }
                Some(ch) => {
                    source.push(ch);
                    self.advance();
                }
            }
        }

        let mut case_insensitive = false;
        if let Some(flag) = self.current_char().filter(|c| is_identifier_char(*c)) {
            let position = self.here();
            if flag != 'i' || self.peek_char(1).is_some_and(is_identifier_char) {
                return Err(LexError::UnsupportedRegexFlag { flag, position });
            }
            case_insensitive = true;
            self.advance();
        }

        Pattern::new(source.as_str(), case_insensitive).map_err(|e| LexError::InvalidRegex {
            pattern: source,
            message: e.to_string(),
            position: start,
        })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.here();
        let mut number = String::new();
        let mut is_float = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // `12ab`, `1.2.3`, `5.`
        if self.current_char().is_some_and(is_identifier_char) {
            number.push_str(&self.read_identifier());
            return Err(LexError::InvalidNumber {
                text: number,
                position: start,
            });
        }

        let invalid = |text: String| LexError::InvalidNumber {
            text,
            position: start,
        };

        if is_float {
            // `f64` parsing saturates to infinity instead of failing
            match number.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Token::Float(n)),
                _ => Err(invalid(number)),
            }
        } else {
            number
                .parse::<i64>()
                .map(Token::Integer)
                .map_err(|_| invalid(number))
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn double(&mut self, token: Token) -> Token {
        self.advance();
        self.advance();
        token
    }

    /// Scan the next token, returning it with its starting position.
    pub fn next_spanned(&mut self) -> Result<Spanned, LexError> {
        self.skip_whitespace();
        let position = self.here();

        let token = match self.current_char() {
            None => Token::Eof,
            Some('"') => Token::String(self.read_string('"')?),
            Some('\'') => Token::String(self.read_string('\'')?),
            Some('/') => Token::Regex(self.read_regex()?),
            Some('(') => self.single(Token::LParen),
            Some(')') => self.single(Token::RParen),
            Some('[') => self.single(Token::LBracket),
            Some(']') => self.single(Token::RBracket),
            Some(',') => self.single(Token::Comma),
            Some('~') => self.single(Token::Tilde),
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.double(Token::EqEq)
                } else {
                    return Err(LexError::IncompleteOperator {
                        found: '=',
                        expected: "==",
                        position,
                    });
                }
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.double(Token::NotEq)
                } else {
                    self.single(Token::Not)
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.double(Token::LtEq)
                } else {
                    self.single(Token::Lt)
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.double(Token::GtEq)
                } else {
                    self.single(Token::Gt)
                }
            }
            Some('&') => {
                if self.peek_char(1) == Some('&') {
                    self.double(Token::And)
                } else {
                    return Err(LexError::IncompleteOperator {
                        found: '&',
                        expected: "&&",
                        position,
                    });
                }
            }
            Some('|') => {
                if self.peek_char(1) == Some('|') {
                    self.double(Token::Or)
                } else {
                    return Err(LexError::IncompleteOperator {
                        found: '|',
                        expected: "||",
                        position,
                    });
                }
            }
            // a leading `.` is kept so the path check can report it
            Some(ch) if ch.is_alphabetic() || ch == '_' || ch == '.' => self.read_word(),
            Some(ch)
                if ch.is_ascii_digit()
                    || (ch == '-' && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())) =>
            {
                self.read_number()?
            }
            Some(ch) => return Err(LexError::UnexpectedCharacter { ch, position }),
        };

        Ok(Spanned { token, position })
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.next_spanned().map(|spanned| spanned.token)
    }

    /// Scan the whole input. The returned list always ends with `Token::Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_spanned()?;
            let done = spanned.token == Token::Eof;
            tokens.push(spanned);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// Convert query text into a flat token list terminated by `Token::Eof`.
pub fn tokenize(text: &str) -> Result<Vec<Spanned>, LexError> {
    Lexer::new(text).tokenize()
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("and or not in not-in all true false null");
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::Or);
    assert_eq!(lexer.next_token().unwrap(), Token::Not);
    assert_eq!(lexer.next_token().unwrap(), Token::In);
    assert_eq!(lexer.next_token().unwrap(), Token::NotIn);
    assert_eq!(lexer.next_token().unwrap(), Token::All);
    assert_eq!(lexer.next_token().unwrap(), Token::Boolean(true));
    assert_eq!(lexer.next_token().unwrap(), Token::Boolean(false));
    assert_eq!(lexer.next_token().unwrap(), Token::Null);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_clause() {
    let mut lexer = Lexer::new("user.age >= 18");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("user.age".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::GtEq);
    assert_eq!(lexer.next_token().unwrap(), Token::Integer(18));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_positions_track_lines() {
    let tokens = tokenize("a == 1\n  or b == 2").unwrap();
    assert_eq!(tokens[3].token, Token::Or);
    assert_eq!(tokens[3].position.line, 2);
    assert_eq!(tokens[3].position.column, 3);
    assert_eq!(tokens[3].position.offset, 9);
}
