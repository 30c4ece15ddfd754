//! Function creation and parameter binding

use std::rc::Rc;

use super::{binary_operands, unary_operand, Activation, Step};
use crate::error::{RuntimeError, RuntimeErrorKind};
use crate::tree::Node;
use crate::value::{FunctionValue, Value};

/// `{ body }`: a closure over the current frame. The body is not evaluated.
pub(crate) fn make(act: &mut Activation, node: &Node) -> Result<Step, RuntimeError> {
    let body = unary_operand(node)?;
    let function = FunctionValue::new(Rc::clone(&act.tree), body, Rc::clone(&act.frame));
    Ok(Step::Done(Value::function(function)))
}

/// `name => function`: a copy of the function with its parameter named.
/// Builtins take their argument positionally and come back unchanged.
pub(crate) fn bind(act: &mut Activation, node: &Node) -> Result<Step, RuntimeError> {
    let (left, right) = binary_operands(node)?;
    let Some(name) = act.tree.node(left).token.as_identifier().map(str::to_string) else {
        return Err(RuntimeError::new(
            node.token.position,
            RuntimeErrorKind::BadBinderTarget,
        ));
    };
    let value = match act.take_one(right) {
        Ok(value) => value,
        Err(next) => return Ok(Step::Descend(next)),
    };
    match value {
        Value::Function(function) => Ok(Step::Done(Value::function(function.with_param(name)))),
        builtin @ Value::Builtin(_) => Ok(Step::Done(builtin)),
        other => Err(RuntimeError::new(
            node.token.position,
            RuntimeErrorKind::BadBinderValue {
                got: other.type_name(),
            },
        )),
    }
}
