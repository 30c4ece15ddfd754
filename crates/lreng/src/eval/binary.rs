//! Binary operation evaluation

use super::operands;
use crate::error::RuntimeErrorKind;
use crate::grammar::Operator;
use crate::value::{number, Number, Value};

/// Apply a binary operator to its evaluated operands.
///
/// Comparisons and logic yield the numbers `0` and `1`. `&` and `|` here
/// are the strict forms; `&&` and `||` never reach this function.
pub fn apply(op: Operator, left: Value, right: Value) -> Result<Value, RuntimeErrorKind> {
    operands::check(op, &[&left, &right])?;
    match op {
        Operator::Eq => return Ok(Value::bool(left == right)),
        Operator::Ne => return Ok(Value::bool(left != right)),
        Operator::And => return Ok(Value::bool(left.is_truthy() && right.is_truthy())),
        Operator::Or => return Ok(Value::bool(left.is_truthy() || right.is_truthy())),
        Operator::MakePair => return Ok(Value::pair(left, right)),
        Operator::Seq => return Ok(right),
        _ => {}
    }
    match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => arithmetic(op, a, b),
        _ => Err(operands::mismatch(op, &[&left, &right])),
    }
}

fn arithmetic(op: Operator, a: &Number, b: &Number) -> Result<Value, RuntimeErrorKind> {
    let value = match op {
        Operator::Pow => Value::Number(number::pow(a, b)?),
        Operator::Mul => Value::Number(a * b),
        Operator::Div => Value::Number(number::div(a, b)?),
        Operator::Rem => Value::Number(number::rem(a, b)?),
        Operator::Add => Value::Number(a + b),
        Operator::Sub => Value::Number(a - b),
        Operator::Lt => Value::bool(a < b),
        Operator::Le => Value::bool(a <= b),
        Operator::Gt => Value::bool(a > b),
        Operator::Ge => Value::bool(a >= b),
        _ => {
            let (left, right) = (Value::Number(a.clone()), Value::Number(b.clone()));
            return Err(operands::mismatch(op, &[&left, &right]));
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Value {
        Value::int(n)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(apply(Operator::Add, int(2), int(3)), Ok(int(5)));
        assert_eq!(apply(Operator::Div, int(1), int(3)), Ok(Value::ratio(1, 3)));
        assert_eq!(apply(Operator::Pow, int(2), int(9)), Ok(int(512)));
        assert_eq!(apply(Operator::Rem, int(-1), int(3)), Ok(int(2)));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            apply(Operator::Div, int(1), int(0)),
            Err(RuntimeErrorKind::DividedByZero)
        );
        assert_eq!(
            apply(Operator::Rem, int(1), int(0)),
            Err(RuntimeErrorKind::DividedByZero)
        );
    }

    #[test]
    fn test_comparisons_yield_numbers() {
        assert_eq!(apply(Operator::Lt, int(1), int(2)), Ok(int(1)));
        assert_eq!(apply(Operator::Ge, int(1), int(2)), Ok(int(0)));
    }

    #[test]
    fn test_any_operators() {
        let pair = Value::pair(int(1), int(2));
        assert_eq!(apply(Operator::Eq, pair.clone(), pair.clone()), Ok(int(1)));
        assert_eq!(apply(Operator::Ne, pair.clone(), int(1)), Ok(int(1)));
        assert_eq!(apply(Operator::And, pair, Value::Null), Ok(int(0)));
        assert_eq!(apply(Operator::Seq, int(1), Value::Null), Ok(Value::Null));
    }

    #[test]
    fn test_type_errors() {
        assert!(matches!(
            apply(Operator::Mul, Value::Null, int(1)),
            Err(RuntimeErrorKind::BadOperand { op: "*", .. })
        ));
    }
}
