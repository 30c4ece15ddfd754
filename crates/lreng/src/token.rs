//! Positioned lexical units

use std::fmt;

use serde::Serialize;

use crate::grammar::Operator;

/// A (line, column) pair, both 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number in characters (1-indexed)
    pub col: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {} col {}", self.line, self.col)
    }
}

/// The category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// Identifier: `x`, `fact`, `null`
    Identifier,

    /// Numeric literal, stored as raw text: `42`, `3.25`, `0x1A`, `0b101`
    Number,

    /// Character literal, stored without its quotes: `a`, `\n`
    Char,

    /// Operator or bracket
    Operator(Operator),
}

/// A classified lexical unit. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The source text of the token (for synthetic tokens, a canonical spelling)
    pub raw: String,

    /// What kind of token this is
    pub kind: TokenKind,

    /// Where the token starts; `None` for tokens synthesized by the lexer
    pub position: Option<Position>,
}

impl Token {
    /// Create a token at a known position.
    pub fn new(raw: impl Into<String>, kind: TokenKind, position: Position) -> Self {
        Self {
            raw: raw.into(),
            kind,
            position: Some(position),
        }
    }

    /// Create an operator token spelled with the operator's canonical symbol.
    pub fn operator(op: Operator, position: Option<Position>) -> Self {
        Self {
            raw: op.symbol().to_string(),
            kind: TokenKind::Operator(op),
            position,
        }
    }

    /// Create an identifier token with no source position.
    pub fn synthetic_identifier(name: impl Into<String>) -> Self {
        Self {
            raw: name.into(),
            kind: TokenKind::Identifier,
            position: None,
        }
    }

    /// The operator carried by this token, if it is one.
    pub fn as_operator(&self) -> Option<Operator> {
        match self.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// The identifier name, if this is an identifier token.
    pub fn as_identifier(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Identifier => Some(&self.raw),
            _ => None,
        }
    }

    /// Whether the token is an operand (identifier or literal).
    pub fn is_operand(&self) -> bool {
        !matches!(self.kind, TokenKind::Operator(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Char => write!(f, "'{}'", self.raw),
            _ => write!(f, "{}", self.raw),
        }
    }
}
