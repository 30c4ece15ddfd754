//! Operand kind table for the plain operators

use crate::error::RuntimeErrorKind;
use crate::grammar::Operator;
use crate::value::Value;

/// The kind of value an operator accepts in one operand slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// Only numbers
    Number,
    /// Only pairs
    Pair,
    /// Anything
    Any,
}

impl OperandKind {
    /// Whether `value` fits this slot.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            OperandKind::Number => value.is_number(),
            OperandKind::Pair => value.is_pair(),
            OperandKind::Any => true,
        }
    }

    /// Name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            OperandKind::Number => "Number",
            OperandKind::Pair => "Pair",
            OperandKind::Any => "Any",
        }
    }
}

use OperandKind::{Any, Number, Pair};

/// Operand kinds of an operator evaluated from fully computed operands.
///
/// Returns `None` for operators the evaluator handles specially.
pub fn signature(op: Operator) -> Option<&'static [OperandKind]> {
    let kinds: &'static [OperandKind] = match op {
        Operator::Pos | Operator::Neg | Operator::Not => &[Number],
        Operator::PairLeft | Operator::PairRight => &[Pair],
        Operator::Pow
        | Operator::Mul
        | Operator::Div
        | Operator::Rem
        | Operator::Add
        | Operator::Sub
        | Operator::Lt
        | Operator::Le
        | Operator::Gt
        | Operator::Ge => &[Number, Number],
        Operator::Eq
        | Operator::Ne
        | Operator::And
        | Operator::Or
        | Operator::MakePair
        | Operator::Seq => &[Any, Any],
        _ => return None,
    };
    Some(kinds)
}

/// Reject operands that do not match the operator's signature.
pub fn check(op: Operator, operands: &[&Value]) -> Result<(), RuntimeErrorKind> {
    let fits = signature(op).is_some_and(|kinds| {
        kinds.len() == operands.len()
            && kinds
                .iter()
                .zip(operands)
                .all(|(kind, value)| kind.accepts(value))
    });
    if fits {
        Ok(())
    } else {
        Err(mismatch(op, operands))
    }
}

/// The error for operands that do not fit `op`.
pub fn mismatch(op: Operator, operands: &[&Value]) -> RuntimeErrorKind {
    let expected = signature(op).unwrap_or(&[]);
    RuntimeErrorKind::BadOperand {
        op: op.symbol(),
        description: op.describe(),
        expected: render(expected.iter().map(|kind| kind.name())),
        got: render(operands.iter().map(|value| value.type_name())),
    }
}

fn render<'a>(names: impl Iterator<Item = &'a str>) -> String {
    format!("({})", names.collect::<Vec<_>>().join(", "))
}
