//! Lexer tests

use lreng::*;
use pretty_assertions::assert_eq;

fn raws(source: &str) -> Vec<String> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|tok| tok.raw)
        .collect()
}

fn operators(source: &str) -> Vec<Operator> {
    tokenize(source)
        .unwrap()
        .iter()
        .filter_map(Token::as_operator)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Token Categories
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_tokenize_assignment_line() {
    let tokens = tokenize("answer = 42;").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|tok| tok.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Operator(Operator::Assign),
            TokenKind::Number,
            TokenKind::Operator(Operator::Seq),
        ]
    );
}

#[test]
fn test_identifiers_may_contain_digits_and_underscores() {
    assert_eq!(raws("_tmp x1 is_pair"), vec!["_tmp", "x1", "is_pair"]);
}

#[test]
fn test_comments_run_to_end_of_line() {
    assert_eq!(raws("1 # one\n+ 2 # two"), vec!["1", "+", "2"]);
}

#[test]
fn test_whitespace_is_insignificant() {
    assert_eq!(raws("a=b;c"), raws("  a =\n\tb ;\r\n c  "));
}

// ═══════════════════════════════════════════════════════════════════════
// Operators
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_every_source_operator_lexes_alone() {
    for op in Operator::SOURCE {
        let source = match op {
            // Prefix and bracket operators need context to be valid input
            Operator::BodyOpen | Operator::GroupOpen => format!("{}1", op.symbol()),
            Operator::BodyClose | Operator::GroupClose => format!("1{}", op.symbol()),
            _ => format!("a {} b", op.symbol()),
        };
        let tokens = tokenize(&source).unwrap();
        assert!(
            tokens.iter().any(|tok| tok.as_operator() == Some(*op)),
            "{op:?} missing from {source:?}"
        );
    }
}

#[test]
fn test_longest_operator_wins() {
    assert_eq!(
        operators("a == b != c <= d >= e"),
        vec![Operator::Eq, Operator::Ne, Operator::Le, Operator::Ge]
    );
    assert_eq!(operators("a & b && c"), vec![Operator::And, Operator::CondAnd]);
}

#[test]
fn test_adjacent_operators_split() {
    assert_eq!(operators("!!a"), vec![Operator::Not, Operator::Not]);
    assert_eq!(operators("a=-b"), vec![Operator::Assign, Operator::Neg]);
}

#[test]
fn test_sign_disambiguation() {
    assert_eq!(operators("-3 + 4"), vec![Operator::Neg, Operator::Add]);
    assert_eq!(operators("3 - -4"), vec![Operator::Sub, Operator::Neg]);
    assert_eq!(
        operators("f(1) - 2"),
        vec![Operator::CallOpen, Operator::GroupClose, Operator::Sub]
    );
    assert_eq!(operators("{1} - 2")[2], Operator::Sub);
    assert_eq!(operators("x = +1"), vec![Operator::Assign, Operator::Pos]);
}

#[test]
fn test_call_after_closing_brackets() {
    assert_eq!(
        operators("{ 1 }()"),
        vec![
            Operator::BodyOpen,
            Operator::BodyClose,
            Operator::CallOpen,
            Operator::GroupClose,
        ]
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Literals
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_number_literals() {
    assert_eq!(
        raws("0 12 0x1a 0xFF 0b0 3.25 10. .5"),
        vec!["0", "12", "0x1a", "0xFF", "0b0", "3.25", "10.", ".5"]
    );
}

#[test]
fn test_malformed_numbers_are_syntax_errors() {
    for source in ["1..2", "0b2", "0xg", "3x", "0X1", "0b1.0"] {
        assert!(tokenize(source).is_err(), "source {source:?}");
    }
    // Errors point at the offending character, or at the number if it is
    // incomplete
    assert_eq!(
        tokenize("1..2").unwrap_err().location,
        Position::new(1, 3).into()
    );
    assert_eq!(
        tokenize("x = 0x").unwrap_err().location,
        Position::new(1, 5).into()
    );
}

#[test]
fn test_char_literal_escapes() {
    let tokens = tokenize(r"'\t' '\\' '\a' ' '").unwrap();
    let raws: Vec<_> = tokens.iter().map(|tok| tok.raw.as_str()).collect();
    assert_eq!(raws, vec!["\\t", "\\\\", "\\a", " "]);
}

#[test]
fn test_char_literal_displays_quoted() {
    let tokens = tokenize("'a'").unwrap();
    assert_eq!(tokens[0].to_string(), "'a'");
}

// ═══════════════════════════════════════════════════════════════════════
// Positions and Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_positions_track_lines_and_columns() {
    let tokens = tokenize("a\n  b\n\n    c").unwrap();
    let positions: Vec<_> = tokens.iter().filter_map(|tok| tok.position).collect();
    assert_eq!(
        positions,
        vec![Position::new(1, 1), Position::new(2, 3), Position::new(4, 5)]
    );
}

#[test]
fn test_illegal_character_reported_with_position() {
    let err = tokenize("x = 1;\ny = @").unwrap_err();
    assert_eq!(err.location, Position::new(2, 5).into());
    assert!(err.to_string().starts_with("Line 2 col 5"));
}

#[test]
fn test_lexer_error_is_syntax_class() {
    let mut input: &[u8] = b"";
    let mut output = Vec::new();
    let mut ctx = EvalContext::new(&mut input, &mut output);
    let err = run("1 @ 2", &mut ctx).unwrap_err();
    assert!(matches!(err, LrengError::Syntax(_)));
    assert_eq!(err.exit_code(), 2);
}
