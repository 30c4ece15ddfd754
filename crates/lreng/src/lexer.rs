//! Finite-state lexer turning source text into positioned tokens
//!
//! The lexer reads one character at a time, with end of input represented
//! by a `None` sentinel. A state that sees a character it cannot consume
//! emits its token and pushes the character back, so the default state
//! decides what starts next.
//!
//! Unary signs, call parentheses and empty-call `null` arguments are
//! resolved here from the previously emitted token, so the parser never
//! has to look behind.

use std::str::Chars;

use tracing::debug;

use crate::chars::{self, BIN_PREFIX, COMMENT_MARKER, ESCAPE, HEX_PREFIX, QUOTE};
use crate::error::SyntaxError;
use crate::grammar::Operator;
use crate::token::{Position, Token, TokenKind};

/// Split `source` into tokens.
///
/// # Errors
///
/// Returns a [`SyntaxError`] on the first unrecognized character, malformed
/// number or malformed character literal.
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let tokens = Lexer::new(source).run()?;
    debug!(tokens = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// The lexer states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    Comment,
    Number,
    Char,
    Identifier,
    Operator,
}

/// A character (or the end-of-input sentinel) and where it was read.
type Lookahead = (Option<char>, Position);

struct Lexer<'src> {
    chars: Chars<'src>,
    line: usize,
    col: usize,
    pushback: Option<Lookahead>,
    tokens: Vec<Token>,

    /// Text of the token being accumulated
    buffer: String,

    /// Position of the first character of the token being accumulated
    start: Position,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars(),
            line: 1,
            col: 1,
            pushback: None,
            tokens: Vec::new(),
            buffer: String::new(),
            start: Position::new(1, 1),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut state = State::Default;
        loop {
            let (c, pos) = self.next_char();
            let next = match state {
                State::Default => self.on_default(c, pos)?,
                State::Comment => self.on_comment(c),
                State::Number => self.on_number(c, pos)?,
                State::Char => self.on_char(c)?,
                State::Identifier => self.on_identifier(c, pos),
                State::Operator => self.on_operator(c, pos)?,
            };
            match next {
                Some(next) => state = next,
                None => return Ok(self.tokens),
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Input
    // ═══════════════════════════════════════════════════════════════════

    fn next_char(&mut self) -> Lookahead {
        if let Some(pending) = self.pushback.take() {
            return pending;
        }
        let pos = Position::new(self.line, self.col);
        let c = self.chars.next();
        match c {
            Some('\n') => {
                self.line += 1;
                self.col = 1;
            }
            Some(_) => self.col += 1,
            None => {}
        }
        (c, pos)
    }

    fn push_back(&mut self, c: Option<char>, pos: Position) {
        debug_assert!(self.pushback.is_none());
        self.pushback = Some((c, pos));
    }

    fn begin(&mut self, c: Option<char>, pos: Position, state: State) -> Option<State> {
        self.buffer.clear();
        self.buffer.extend(c);
        self.start = pos;
        Some(state)
    }

    fn take_buffer(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    // ═══════════════════════════════════════════════════════════════════
    // States
    // ═══════════════════════════════════════════════════════════════════

    fn on_default(&mut self, c: Option<char>, pos: Position) -> Result<Option<State>, SyntaxError> {
        let Some(ch) = c else {
            return Ok(None);
        };
        let next = if ch == COMMENT_MARKER {
            Some(State::Comment)
        } else if chars::is_whitespace(ch) {
            Some(State::Default)
        } else if chars::is_number_char(ch) {
            self.begin(c, pos, State::Number)
        } else if ch == QUOTE {
            self.begin(None, pos, State::Char)
        } else if chars::is_identifier_start(ch) {
            self.begin(c, pos, State::Identifier)
        } else if chars::is_operator_char(ch) {
            self.begin(c, pos, State::Operator)
        } else {
            return Err(SyntaxError::new(
                pos,
                format!("Unrecognized character {:?}", ch),
            ));
        };
        Ok(next)
    }

    fn on_comment(&mut self, c: Option<char>) -> Option<State> {
        match c {
            None => None,
            Some('\n') => Some(State::Default),
            Some(_) => Some(State::Comment),
        }
    }

    fn on_number(&mut self, c: Option<char>, pos: Position) -> Result<Option<State>, SyntaxError> {
        match c {
            Some('.') => {
                if self.is_prefixed_number() {
                    return Err(SyntaxError::new(
                        pos,
                        format!("Decimal point in prefixed number {}", self.buffer),
                    ));
                }
                if self.buffer.contains('.') {
                    return Err(SyntaxError::new(
                        pos,
                        format!("Second decimal point in number {}", self.buffer),
                    ));
                }
                self.buffer.push('.');
                Ok(Some(State::Number))
            }
            Some(ch) if chars::is_identifier_char(ch) => {
                if self.accepts_digit(ch) {
                    self.buffer.push(ch);
                    Ok(Some(State::Number))
                } else {
                    Err(SyntaxError::new(
                        pos,
                        format!("Bad number format {}{}", self.buffer, ch),
                    ))
                }
            }
            _ => {
                self.finish_number()?;
                self.push_back(c, pos);
                Ok(Some(State::Default))
            }
        }
    }

    fn on_char(&mut self, c: Option<char>) -> Result<Option<State>, SyntaxError> {
        let start = self.start;
        let fail = |message: String| Err(SyntaxError::new(start, message));

        let Some(ch) = c else {
            return fail("Unterminated character literal".to_string());
        };

        let mut content = self.buffer.chars();
        match (content.next(), content.next()) {
            (None, _) => {
                if ch == QUOTE {
                    return fail("Empty character literal".to_string());
                }
                if !chars::is_printable(ch) {
                    return fail(format!("Unprintable character {:?} in literal", ch));
                }
                self.buffer.push(ch);
                Ok(Some(State::Char))
            }
            (Some(ESCAPE), None) => {
                if chars::escape(ch).is_none() {
                    return fail(format!("Invalid escape sequence '\\{}'", ch));
                }
                self.buffer.push(ch);
                Ok(Some(State::Char))
            }
            _ => {
                if ch != QUOTE {
                    return fail(format!(
                        "Expected closing quote after '{}', got {:?}",
                        self.buffer, ch
                    ));
                }
                let raw = self.take_buffer();
                self.tokens.push(Token::new(raw, TokenKind::Char, start));
                Ok(Some(State::Default))
            }
        }
    }

    fn on_identifier(&mut self, c: Option<char>, pos: Position) -> Option<State> {
        match c {
            Some(ch) if chars::is_identifier_char(ch) => {
                self.buffer.push(ch);
                Some(State::Identifier)
            }
            _ => {
                let raw = self.take_buffer();
                self.tokens
                    .push(Token::new(raw, TokenKind::Identifier, self.start));
                self.push_back(c, pos);
                Some(State::Default)
            }
        }
    }

    fn on_operator(&mut self, c: Option<char>, pos: Position) -> Result<Option<State>, SyntaxError> {
        if let Some(ch) = c {
            if chars::is_operator_char(ch) {
                let mut longer = self.buffer.clone();
                longer.push(ch);
                if Operator::from_symbol(&longer).is_some() {
                    self.buffer = longer;
                    return Ok(Some(State::Operator));
                }
            }
        }
        self.finish_operator()?;
        self.push_back(c, pos);
        Ok(Some(State::Default))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Token Emission
    // ═══════════════════════════════════════════════════════════════════

    fn is_prefixed_number(&self) -> bool {
        self.buffer.starts_with(HEX_PREFIX) || self.buffer.starts_with(BIN_PREFIX)
    }

    fn accepts_digit(&self, ch: char) -> bool {
        if self.buffer == "0" && (ch == 'x' || ch == 'b') {
            true
        } else if self.buffer.starts_with(HEX_PREFIX) {
            chars::is_hex_digit(ch)
        } else if self.buffer.starts_with(BIN_PREFIX) {
            chars::is_bin_digit(ch)
        } else {
            ch.is_ascii_digit()
        }
    }

    fn finish_number(&mut self) -> Result<(), SyntaxError> {
        let has_digits = if self.is_prefixed_number() {
            self.buffer.len() > HEX_PREFIX.len()
        } else {
            self.buffer.chars().any(|ch| ch.is_ascii_digit())
        };
        if !has_digits {
            return Err(SyntaxError::new(
                self.start,
                format!("Number {} has no digits", self.buffer),
            ));
        }
        let raw = self.take_buffer();
        self.tokens.push(Token::new(raw, TokenKind::Number, self.start));
        Ok(())
    }

    fn finish_operator(&mut self) -> Result<(), SyntaxError> {
        let raw = self.take_buffer();
        let op = Operator::from_symbol(&raw).ok_or_else(|| {
            SyntaxError::new(self.start, format!("Unknown operator {}", raw))
        })?;

        let previous = self.tokens.last();
        let follows_operand = previous.is_some_and(|tok| {
            tok.is_operand() || tok.as_operator().is_some_and(Operator::is_closing_bracket)
        });
        let follows_callable = previous.is_some_and(|tok| {
            tok.kind == TokenKind::Identifier
                || tok.as_operator().is_some_and(Operator::is_closing_bracket)
        });
        let follows_call_open =
            previous.is_some_and(|tok| tok.as_operator() == Some(Operator::CallOpen));

        let op = match op {
            Operator::Add if !follows_operand => Operator::Pos,
            Operator::Sub if !follows_operand => Operator::Neg,
            Operator::GroupOpen if follows_callable => Operator::CallOpen,
            Operator::GroupClose if follows_call_open => {
                self.tokens.push(Token::synthetic_identifier("null"));
                Operator::GroupClose
            }
            other => other,
        };
        self.tokens.push(Token::operator(op, Some(self.start)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|tok| tok.kind)
            .collect()
    }

    fn raws(source: &str) -> Vec<String> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|tok| tok.raw)
            .collect()
    }

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  # only a comment").unwrap().is_empty());
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("a = 1;\n  bb").unwrap();
        let positions: Vec<_> = tokens.iter().map(|tok| tok.position).collect();
        assert_eq!(
            positions,
            vec![
                Some(Position::new(1, 1)),
                Some(Position::new(1, 3)),
                Some(Position::new(1, 5)),
                Some(Position::new(1, 6)),
                Some(Position::new(2, 3)),
            ]
        );
    }

    #[test]
    fn test_greedy_operators() {
        assert_eq!(raws("a=>b"), vec!["a", "=>", "b"]);
        assert_eq!(raws("a&&b||c"), vec!["a", "&&", "b", "||", "c"]);
        assert_eq!(raws("a<=b"), vec!["a", "<=", "b"]);
        assert_eq!(raws("!-1"), vec!["!", "-", "1"]);
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(
            kinds("-3 - -4"),
            vec![
                TokenKind::Operator(Operator::Neg),
                TokenKind::Number,
                TokenKind::Operator(Operator::Sub),
                TokenKind::Operator(Operator::Neg),
                TokenKind::Number,
            ]
        );
        assert_eq!(
            kinds("(1)+2")[3],
            TokenKind::Operator(Operator::Add),
            "a closing bracket ends an operand"
        );
    }

    #[test]
    fn test_call_parenthesis() {
        assert_eq!(kinds("f(1)")[1], TokenKind::Operator(Operator::CallOpen));
        assert_eq!(kinds("f (1)")[1], TokenKind::Operator(Operator::CallOpen));
        assert_eq!(kinds("(1)")[0], TokenKind::Operator(Operator::GroupOpen));
        assert_eq!(kinds("f(1)(2)")[4], TokenKind::Operator(Operator::CallOpen));
    }

    #[test]
    fn test_empty_call_inserts_null() {
        let tokens = tokenize("f()").unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[2].as_identifier(), Some("null"));
        assert_eq!(tokens[2].position, None);
    }

    #[test]
    fn test_number_formats() {
        assert_eq!(raws("0x1A 0b101 3.25 .5"), vec!["0x1A", "0b101", "3.25", ".5"]);
        assert!(tokenize("1.2.3").is_err());
        assert!(tokenize("0b102").is_err());
        assert!(tokenize("0x1.5").is_err());
        assert!(tokenize("12ab").is_err());
        assert!(tokenize("0x").is_err());
        assert!(tokenize(".").is_err());
    }

    #[test]
    fn test_char_literals() {
        let tokens = tokenize(r"'a' '\n' '\''").unwrap();
        let raws: Vec<_> = tokens.iter().map(|tok| tok.raw.as_str()).collect();
        assert_eq!(raws, vec!["a", "\\n", "\\'"]);
        assert!(tokens.iter().all(|tok| tok.kind == TokenKind::Char));
    }

    #[test]
    fn test_bad_char_literals_point_at_quote() {
        for source in ["x = ''", "x = '\\q'", "x = 'ab'", "x = 'a"] {
            let err = tokenize(source).unwrap_err();
            assert_eq!(
                err.location,
                Position::new(1, 5).into(),
                "source {source:?}"
            );
        }
    }

    #[test]
    fn test_unrecognized_character() {
        let err = tokenize("1 @ 2").unwrap_err();
        assert_eq!(err.location, Position::new(1, 3).into());
    }
}
