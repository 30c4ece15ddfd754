//! Assignment evaluation

use super::{binary_operands, Activation, Step};
use crate::error::{RuntimeError, RuntimeErrorKind};
use crate::tree::Node;

/// `name = value`: bind in the current frame and yield the value.
///
/// A name may be bound once per frame; inner frames may shadow it.
pub(crate) fn assign(act: &mut Activation, node: &Node) -> Result<Step, RuntimeError> {
    let (left, right) = binary_operands(node)?;
    let Some(name) = act.tree.node(left).token.as_identifier().map(str::to_string) else {
        return Err(RuntimeError::new(
            node.token.position,
            RuntimeErrorKind::BadAssignTarget,
        ));
    };
    let value = match act.take_one(right) {
        Ok(value) => value,
        Err(next) => return Ok(Step::Descend(next)),
    };
    act.frame
        .define(name, value.clone())
        .map_err(|e| RuntimeError::new(act.tree.node(left).token.position, e.into()))?;
    Ok(Step::Done(value))
}
