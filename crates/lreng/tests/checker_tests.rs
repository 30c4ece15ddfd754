//! Scope checker tests

use lreng::*;
use pretty_assertions::assert_eq;

fn check_source(source: &str) -> std::result::Result<(), SemanticErrors> {
    check(&parse(tokenize(source).unwrap()).unwrap())
}

fn errors(source: &str) -> Vec<(Position, SemanticErrorKind)> {
    check_source(source)
        .unwrap_err()
        .errors
        .into_iter()
        .map(|error| (error.location.position().unwrap(), error.kind))
        .collect()
}

fn uninitialized(name: &str) -> SemanticErrorKind {
    SemanticErrorKind::Uninitialized { name: name.into() }
}

// ═══════════════════════════════════════════════════════════════════════
// Well-scoped Programs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_sequential_assignments() {
    assert!(check_source("a = 1; b = a + 1; a * b").is_ok());
}

#[test]
fn test_builtins_and_null_are_predefined() {
    assert!(check_source("is_number(null) & is_callable(output) & is_pair(input)").is_ok());
}

#[test]
fn test_parameters_visible_in_nested_bodies() {
    assert!(check_source("add = a => { b => { a + b } }; add(1)(2)").is_ok());
}

#[test]
fn test_body_may_use_later_outer_binding() {
    assert!(check_source("show = { output(c) }; c = 65; show()").is_ok());
}

#[test]
fn test_mutual_recursion() {
    let source = "
        even = n => { n == 0 ? { 1 }, { odd(n - 1) } };
        odd = n => { n == 0 ? { 0 }, { even(n - 1) } };
        even(10)
    ";
    assert!(check_source(source).is_ok());
}

// ═══════════════════════════════════════════════════════════════════════
// Scope Isolation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_body_binding_invisible_outside() {
    assert_eq!(
        errors("f = { inner = 1 }; f(); inner"),
        vec![(Position::new(1, 25), uninitialized("inner"))]
    );
}

#[test]
fn test_name_reused_after_body_is_fresh() {
    assert!(check_source("f = { x = 1; x }; x = 2; f() + x").is_ok());
}

#[test]
fn test_shadowing_outer_binding() {
    assert!(check_source("x = 1; f = { x = 2; x }; f()").is_ok());
    assert!(check_source("x = 1; f = x => { x }; f(2)").is_ok());
}

#[test]
fn test_sibling_bodies_do_not_share_bindings() {
    assert_eq!(
        errors("f = { a = 1 }; g = { a }"),
        vec![(Position::new(1, 22), uninitialized("a"))]
    );
}

#[test]
fn test_repeated_initialization_in_body() {
    assert_eq!(
        errors("f = {\n  y = 1;\n  y = 2\n}"),
        vec![(
            Position::new(3, 3),
            SemanticErrorKind::RepeatedInitialization { name: "y".into() }
        )]
    );
}

#[test]
fn test_parameter_collides_with_body_assignment() {
    assert_eq!(
        errors("f = n => { n = 1 }"),
        vec![(
            Position::new(1, 12),
            SemanticErrorKind::RepeatedInitialization { name: "n".into() }
        )]
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Violations
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_uninitialized_identifier() {
    assert_eq!(
        errors("x + 1"),
        vec![(Position::new(1, 1), uninitialized("x"))]
    );
}

#[test]
fn test_assignment_target_must_be_identifier() {
    assert_eq!(
        errors("1 = 2"),
        vec![(
            Position::new(1, 1),
            SemanticErrorKind::LeftNotIdentifier { op: "assignment" }
        )]
    );
}

#[test]
fn test_binder_target_must_be_identifier() {
    let found = errors("f = (1 + 1) => { 2 }");
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].1,
        SemanticErrorKind::LeftNotIdentifier {
            op: "argument binder"
        }
    );
}

#[test]
fn test_every_violation_is_reported_in_source_order() {
    let found = errors("a = b;\nc = { d };\na = 1");
    assert_eq!(
        found,
        vec![
            (Position::new(1, 5), uninitialized("b")),
            (Position::new(2, 7), uninitialized("d")),
            (
                Position::new(3, 1),
                SemanticErrorKind::RepeatedInitialization { name: "a".into() }
            ),
        ]
    );
}

#[test]
fn test_errors_render_one_per_line() {
    let err = check_source("p + q").unwrap_err();
    assert_eq!(
        err.to_string(),
        "[SemanticError] Line 1 col 1: Identifier 'p' is used but never initialized\n\
         [SemanticError] Line 1 col 5: Identifier 'q' is used but never initialized"
    );
}

#[test]
fn test_semantic_failure_stops_before_evaluation() {
    let mut input: &[u8] = b"";
    let mut output = Vec::new();
    let mut ctx = EvalContext::new(&mut input, &mut output);
    let err = run("output(65); missing", &mut ctx).unwrap_err();
    drop(ctx);
    assert!(matches!(err, LrengError::Semantic(_)));
    assert_eq!(err.exit_code(), 3);
    assert!(output.is_empty());
}
