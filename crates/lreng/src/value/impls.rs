//! Constructors, predicates and trait implementations for Value

use std::mem;
use std::rc::Rc;

use num_bigint::BigInt;
use num_traits::Zero;

use super::*;
use crate::environment::Frame;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create an integer number.
    pub fn int(n: impl Into<BigInt>) -> Self {
        Value::Number(Number::from_integer(n.into()))
    }

    /// Create the number `numer / denom`.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    pub fn ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Self {
        Value::Number(Number::new(numer.into(), denom.into()))
    }

    /// `1` for true, `0` for false.
    pub fn bool(b: bool) -> Self {
        Value::Number(number::from_bool(b))
    }

    /// Create a pair.
    pub fn pair(left: Value, right: Value) -> Self {
        Value::Pair(Rc::new(Pair { left, right }))
    }

    /// Wrap a closure.
    pub fn function(function: FunctionValue) -> Self {
        Value::Function(Rc::new(function))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Whether the value is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the value is a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Whether the value is a pair.
    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }

    /// Closures and builtins are both callable.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Builtin(_))
    }

    /// Null and zero are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Number(n) => !n.is_zero(),
            Value::Pair(_) | Value::Function(_) | Value::Builtin(_) => true,
        }
    }

    /// Name of the value's kind, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Number(_) => "Number",
            Value::Pair(_) => "Pair",
            Value::Function(_) | Value::Builtin(_) => "Function",
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    /// The number, if the value is one.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The pair, if the value is one.
    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Value::Pair(p) => Some(p),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

/// Structural equality. Functions are equal when they share a body,
/// builtins when they share a name. Nested pairs are compared with an
/// explicit stack.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut pending: Vec<(&Value, &Value)> = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            let same = match (a, b) {
                (Value::Null, Value::Null) => true,
                (Value::Number(x), Value::Number(y)) => x == y,
                (Value::Pair(x), Value::Pair(y)) => {
                    if !Rc::ptr_eq(x, y) {
                        pending.push((&x.right, &y.right));
                        pending.push((&x.left, &y.left));
                    }
                    true
                }
                (Value::Function(x), Value::Function(y)) => x.same_body(y),
                (Value::Builtin(x), Value::Builtin(y)) => x.name == y.name,
                _ => false,
            };
            if !same {
                return false;
            }
        }
        true
    }
}

// ═══════════════════════════════════════════════════════════════════
// Drop
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Whether dropping the value can reach further pairs or frames.
    fn owns_nested(&self) -> bool {
        matches!(self, Value::Pair(_) | Value::Function(_))
    }
}

impl Drop for Pair {
    fn drop(&mut self) {
        if !self.left.owns_nested() && !self.right.owns_nested() {
            return;
        }
        let mut teardown = Teardown::default();
        teardown.value(mem::replace(&mut self.left, Value::Null));
        teardown.value(mem::replace(&mut self.right, Value::Null));
        teardown.run();
    }
}

/// Releases nested pairs, closures and frames with an explicit stack.
///
/// Only the last owner of an `Rc` takes it apart; its contents are detached
/// first so the emptied shell drops shallowly.
#[derive(Default)]
pub(crate) struct Teardown {
    values: Vec<Value>,
    frames: Vec<Rc<Frame>>,
}

impl Teardown {
    pub(crate) fn value(&mut self, value: Value) {
        if value.owns_nested() {
            self.values.push(value);
        }
    }

    pub(crate) fn frame(&mut self, frame: Rc<Frame>) {
        self.frames.push(frame);
    }

    pub(crate) fn run(mut self) {
        loop {
            if let Some(value) = self.values.pop() {
                match value {
                    Value::Pair(rc) => {
                        if let Ok(mut pair) = Rc::try_unwrap(rc) {
                            self.value(mem::replace(&mut pair.left, Value::Null));
                            self.value(mem::replace(&mut pair.right, Value::Null));
                        }
                    }
                    Value::Function(rc) => {
                        if let Ok(function) = Rc::try_unwrap(rc) {
                            self.frame(function.frame);
                        }
                    }
                    _ => {}
                }
            } else if let Some(rc) = self.frames.pop() {
                if let Ok(mut frame) = Rc::try_unwrap(rc) {
                    let (local, shared) = frame.detach();
                    for value in local.into_values() {
                        self.value(value);
                    }
                    if let Some(shared) = shared {
                        self.frame(shared);
                    }
                }
            } else {
                break;
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Trait Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<BuiltinFn> for Value {
    fn from(builtin: BuiltinFn) -> Self {
        Value::Builtin(builtin)
    }
}

impl From<FunctionValue> for Value {
    fn from(function: FunctionValue) -> Self {
        Value::function(function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::int(0).is_truthy());
        assert!(Value::ratio(1, 3).is_truthy());
        assert!(Value::pair(Value::Null, Value::Null).is_truthy());
    }

    #[test]
    fn test_ratio_is_reduced() {
        assert_eq!(Value::ratio(4, 8), Value::ratio(1, 2));
        assert_eq!(Value::ratio(3, -6), Value::ratio(-1, 2));
    }

    #[test]
    fn test_deep_pair_drop_and_compare() {
        let build = || {
            let mut list = Value::Null;
            for i in 0..200_000i64 {
                list = Value::pair(Value::int(i), list);
            }
            list
        };
        let a = build();
        let b = build();
        assert!(a == b);
        drop(a);
        drop(b);
    }
}
