//! Value representation for runtime values

mod callable;
mod display;
mod impls;
pub mod number;

pub use callable::{BuiltinFn, BuiltinFnPtr, FunctionValue};
pub(crate) use impls::Teardown;

use std::rc::Rc;

use num_rational::BigRational;

/// Exact rational number, always in lowest terms with a nonzero denominator.
pub type Number = BigRational;

/// Runtime value of an lreng program.
///
/// There is no boolean variant: comparisons and logic operators produce the
/// numbers `0` and `1`, and every value has a truthiness.
#[derive(Clone)]
pub enum Value {
    /// The unit value, always falsy
    Null,

    /// Arbitrary-precision rational
    Number(Number),

    /// Immutable cons cell
    Pair(Rc<Pair>),

    /// User closure
    Function(Rc<FunctionValue>),

    /// Native routine from the prelude
    Builtin(BuiltinFn),
}

/// The two halves of a pair.
///
/// Dropping a pair releases nested pairs without recursion, so long
/// pair-built lists can be freed safely.
pub struct Pair {
    /// Left element, read by `` ` ``
    pub left: Value,

    /// Right element, read by `~`
    pub right: Value,
}
