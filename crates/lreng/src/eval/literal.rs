//! Literal evaluation

use crate::chars::{self, ESCAPE};
use crate::error::{RuntimeError, RuntimeErrorKind};
use crate::token::Token;
use crate::value::{number, Value};

/// Evaluate a number token to its exact value.
pub fn number(token: &Token) -> Result<Value, RuntimeError> {
    number::parse_literal(&token.raw)
        .map(Value::Number)
        .ok_or_else(|| invalid(token))
}

/// Evaluate a character token to the number of its code point.
pub fn character(token: &Token) -> Result<Value, RuntimeError> {
    let mut content = token.raw.chars();
    let resolved = match (content.next(), content.next(), content.next()) {
        (Some(ESCAPE), Some(escaped), None) => chars::escape(escaped),
        (Some(c), None, None) => Some(c),
        _ => None,
    };
    resolved
        .map(|c| Value::int(u32::from(c)))
        .ok_or_else(|| invalid(token))
}

fn invalid(token: &Token) -> RuntimeError {
    RuntimeError::new(
        token.position,
        RuntimeErrorKind::InvalidLiteral {
            raw: token.raw.clone(),
        },
    )
}
