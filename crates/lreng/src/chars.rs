//! Character classes used by the lexer

use crate::grammar::Operator;

/// Starts a comment that runs to the end of the line.
pub const COMMENT_MARKER: char = '#';

/// Opens and closes a character literal.
pub const QUOTE: char = '\'';

/// Introduces an escape sequence inside a character literal.
pub const ESCAPE: char = '\\';

/// Prefix of hexadecimal number literals.
pub const HEX_PREFIX: &str = "0x";

/// Prefix of binary number literals.
pub const BIN_PREFIX: &str = "0b";

/// Space, tab, newline, carriage return, vertical tab and form feed.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Characters that may start an identifier.
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Characters that may continue an identifier.
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Decimal digits and the decimal point.
pub fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Hexadecimal digits, either case.
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Binary digits.
pub fn is_bin_digit(c: char) -> bool {
    c == '0' || c == '1'
}

/// Any character that appears in a source-level operator.
pub fn is_operator_char(c: char) -> bool {
    Operator::SOURCE
        .iter()
        .any(|op| op.symbol().contains(c))
}

/// Characters accepted verbatim between quotes.
pub fn is_printable(c: char) -> bool {
    !c.is_control()
}

/// Resolve the character after a backslash in a character literal.
pub fn escape(c: char) -> Option<char> {
    match c {
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\x0b'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        _ => None,
    }
}
