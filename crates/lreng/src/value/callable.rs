//! Callable value types: closures and builtins

use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::context::EvalContext;
use crate::environment::Frame;
use crate::tree::{NodeId, SyntaxTree};

/// Signature of a native routine. The error string becomes a runtime error
/// attributed to the builtin's name.
pub type BuiltinFnPtr = fn(&Value, &mut EvalContext<'_>) -> Result<Value, String>;

/// A user-defined function: a body subtree closed over the frame that was
/// current when the body was evaluated.
///
/// Binding a parameter never mutates a function; [`FunctionValue::with_param`]
/// returns a new value sharing body and frame.
#[derive(Clone)]
pub struct FunctionValue {
    /// Tree owning the body
    pub tree: Rc<SyntaxTree>,

    /// Root of the body subtree
    pub body: NodeId,

    /// Captured frame; calls chain their frame to this one
    pub frame: Rc<Frame>,

    /// Name the argument is bound to, if any
    pub param: Option<String>,
}

impl FunctionValue {
    /// Create a closure without a parameter.
    pub fn new(tree: Rc<SyntaxTree>, body: NodeId, frame: Rc<Frame>) -> Self {
        Self {
            tree,
            body,
            frame,
            param: None,
        }
    }

    /// A copy of this function whose argument is bound to `name`.
    pub fn with_param(&self, name: impl Into<String>) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            body: self.body,
            frame: Rc::clone(&self.frame),
            param: Some(name.into()),
        }
    }

    /// Whether two functions share the same body.
    pub fn same_body(&self, other: &FunctionValue) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.body == other.body
    }
}

// Frames can hold the closures that capture them, so the frame is left out.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("body", &self.body)
            .field("param", &self.param)
            .finish()
    }
}

/// A built-in native function.
#[derive(Clone, Copy)]
pub struct BuiltinFn {
    /// Name the builtin is bound to in the prelude
    pub name: &'static str,

    /// The routine
    pub func: BuiltinFnPtr,
}

impl BuiltinFn {
    /// Run the routine.
    pub fn call(&self, argument: &Value, ctx: &mut EvalContext<'_>) -> Result<Value, String> {
        (self.func)(argument, ctx)
    }
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}
