//! Function calls

use super::{binary_operands, Activation, Step};
use crate::context::EvalContext;
use crate::error::{Location, RuntimeError, RuntimeErrorKind};
use crate::tree::Node;
use crate::value::Value;

/// `f(x)` and `f $ x`.
pub(crate) fn call(
    act: &mut Activation,
    node: &Node,
    ctx: &mut EvalContext<'_>,
) -> Result<Step, RuntimeError> {
    let (left, right) = binary_operands(node)?;
    let (callee, argument) = match act.take_two(left, right) {
        Ok(operands) => operands,
        Err(next) => return Ok(Step::Descend(next)),
    };
    invoke(callee, argument, node.token.position.into(), ctx)
}

/// `cond ? (then, else)`: call one of two functions with `null`.
pub(crate) fn conditional_call(
    act: &mut Activation,
    node: &Node,
    ctx: &mut EvalContext<'_>,
) -> Result<Step, RuntimeError> {
    let (left, right) = binary_operands(node)?;
    let (condition, branches) = match act.take_two(left, right) {
        Ok(operands) => operands,
        Err(next) => return Ok(Step::Descend(next)),
    };
    let location = Location::from(node.token.position);

    let Value::Pair(pair) = &branches else {
        return Err(RuntimeError::new(
            location,
            RuntimeErrorKind::BadConditionalPair {
                got: branches.type_name().to_string(),
            },
        ));
    };
    if !pair.left.is_callable() || !pair.right.is_callable() {
        return Err(RuntimeError::new(
            location,
            RuntimeErrorKind::BadConditionalPair {
                got: format!("({}, {})", pair.left.type_name(), pair.right.type_name()),
            },
        ));
    }

    let chosen = if condition.is_truthy() {
        pair.left.clone()
    } else {
        pair.right.clone()
    };
    invoke(chosen, Value::Null, location, ctx)
}

/// Call `callee`. Builtins run immediately; user functions are handed back
/// to the evaluation loop as a new activation.
fn invoke(
    callee: Value,
    argument: Value,
    location: Location,
    ctx: &mut EvalContext<'_>,
) -> Result<Step, RuntimeError> {
    match callee {
        Value::Function(function) => Ok(Step::Invoke { function, argument }),
        Value::Builtin(builtin) => builtin
            .call(&argument, ctx)
            .map(Step::Done)
            .map_err(|message| RuntimeError::builtin(builtin.name, message)),
        other => Err(RuntimeError::new(
            location,
            RuntimeErrorKind::NotCallable {
                got: other.type_name(),
            },
        )),
    }
}
