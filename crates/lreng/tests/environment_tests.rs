//! Environment tests

use std::rc::Rc;

use lreng::*;
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════
// Basic Operations
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_frame_root_is_empty() {
    let frame = Frame::root();
    assert!(frame.is_empty());
    assert_eq!(frame.len(), 0);
    assert_eq!(frame.depth(), 1);
    assert!(frame.shared().is_none());
}

#[test]
fn test_frame_define_and_get() {
    let frame = Frame::root();
    frame.define("x", Value::int(42)).unwrap();

    assert_eq!(frame.get("x"), Some(Value::int(42)));
    assert_eq!(frame.get("y"), None);
    assert!(frame.contains("x"));
    assert!(!frame.contains("y"));
}

#[test]
fn test_frame_keeps_definition_order() {
    let frame = Frame::root();
    for name in ["c", "a", "b"] {
        frame.define(name, Value::Null).unwrap();
    }
    assert_eq!(frame.local_names(), vec!["c", "a", "b"]);
}

#[test]
fn test_frame_define_twice_fails() {
    let frame = Frame::root();
    frame.define("x", Value::int(1)).unwrap();
    assert_eq!(
        frame.define("x", Value::int(2)),
        Err(EnvironmentError::AlreadyDefined { name: "x".into() })
    );
    assert_eq!(frame.get("x"), Some(Value::int(1)));
}

#[test]
fn test_frame_lookup_undefined() {
    let frame = Frame::root();
    let err = frame.lookup("ghost").unwrap_err();
    assert_eq!(err, EnvironmentError::Undefined { name: "ghost".into() });
}

// ═══════════════════════════════════════════════════════════════════════
// Scoping and Shadowing
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_child_sees_parent_bindings() {
    let parent = Frame::root();
    parent.define("x", Value::int(1)).unwrap();
    let child = Frame::child(&parent);

    assert_eq!(child.depth(), 2);
    assert_eq!(child.get("x"), Some(Value::int(1)));
    assert!(child.contains("x"));
    assert!(!child.contains_local("x"));
}

#[test]
fn test_child_shadows_without_touching_parent() {
    let parent = Frame::root();
    parent.define("x", Value::int(1)).unwrap();
    let child = Frame::child(&parent);
    child.define("x", Value::int(2)).unwrap();

    assert_eq!(child.get("x"), Some(Value::int(2)));
    assert_eq!(parent.get("x"), Some(Value::int(1)));
}

#[test]
fn test_parent_does_not_see_child_bindings() {
    let parent = Frame::root();
    let child = Frame::child(&parent);
    child.define("y", Value::int(3)).unwrap();

    assert!(!parent.contains("y"));
}

#[test]
fn test_later_parent_bindings_visible_to_child() {
    let parent = Frame::root();
    let child = Frame::child(&parent);
    assert_eq!(child.get("late"), None);

    parent.define("late", Value::int(7)).unwrap();
    assert_eq!(child.get("late"), Some(Value::int(7)));
}

#[test]
fn test_siblings_are_isolated() {
    let parent = Frame::root();
    let a = Frame::child(&parent);
    let b = Frame::child(&parent);
    a.define("x", Value::int(1)).unwrap();

    assert!(!b.contains("x"));
    assert!(Rc::ptr_eq(a.shared().unwrap(), b.shared().unwrap()));
}

// ═══════════════════════════════════════════════════════════════════════
// Default Frame
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_default_frame_contents() {
    let frame = default_frame();
    assert_eq!(frame.get("null"), Some(Value::Null));
    for builtin in BUILTINS {
        let value = frame.get(builtin.name).unwrap();
        assert!(value.is_callable(), "{} should be callable", builtin.name);
    }
    let names = frame.local_names();
    assert_eq!(
        names,
        vec!["null", "input", "output", "is_number", "is_callable", "is_pair"]
    );
}

#[test]
fn test_default_frame_is_shared_not_copied() {
    assert!(Rc::ptr_eq(&default_frame(), &default_frame()));
}

#[test]
fn test_programs_do_not_write_the_default_frame() {
    let mut input: &[u8] = b"";
    let mut output = Vec::new();
    let mut ctx = EvalContext::new(&mut input, &mut output);
    run("leaked = 1", &mut ctx).unwrap();

    assert!(!default_frame().contains("leaked"));
}

#[test]
fn test_program_may_shadow_builtin() {
    let mut input: &[u8] = b"";
    let mut output = Vec::new();
    let mut ctx = EvalContext::new(&mut input, &mut output);
    let value = run("output = 5; output + 1", &mut ctx).unwrap();

    assert_eq!(value, Value::int(6));
    assert!(default_frame().get("output").unwrap().is_callable());
}
