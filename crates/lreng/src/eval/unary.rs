//! Unary operation evaluation

use num_traits::Zero;

use super::operands;
use crate::error::RuntimeErrorKind;
use crate::grammar::Operator;
use crate::value::Value;

/// Apply a unary operator to its evaluated operand.
pub fn apply(op: Operator, operand: Value) -> Result<Value, RuntimeErrorKind> {
    operands::check(op, &[&operand])?;
    match (op, &operand) {
        (Operator::Pos, Value::Number(n)) => Ok(Value::Number(n.clone())),
        (Operator::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (Operator::Not, Value::Number(n)) => Ok(Value::bool(n.is_zero())),
        (Operator::PairLeft, Value::Pair(pair)) => Ok(pair.left.clone()),
        (Operator::PairRight, Value::Pair(pair)) => Ok(pair.right.clone()),
        _ => Err(operands::mismatch(op, &[&operand])),
    }
}
