//! Short-circuit logic

use super::{binary_operands, Activation, Step};
use crate::error::RuntimeError;
use crate::grammar::Operator;
use crate::tree::Node;

/// `&&` and `||`. The right operand is evaluated only when the left one
/// does not decide the result; otherwise the left value is the result.
pub(crate) fn short_circuit(
    act: &mut Activation,
    node: &Node,
    op: Operator,
) -> Result<Step, RuntimeError> {
    let (left, right) = binary_operands(node)?;
    let Some(left_value) = act.peek(left) else {
        return Ok(Step::Descend(left));
    };

    let needs_right = left_value.is_truthy() == (op == Operator::CondAnd);
    let decided_by = if needs_right { right } else { left };
    let result = match act.take_one(decided_by) {
        Ok(value) => value,
        Err(next) => return Ok(Step::Descend(next)),
    };
    act.memo.remove(&left);
    Ok(Step::Done(result))
}
