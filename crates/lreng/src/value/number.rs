//! Exact rational arithmetic helpers

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

use super::Number;
use crate::chars::{BIN_PREFIX, HEX_PREFIX};
use crate::error::RuntimeErrorKind;

/// Convert the text of a number token to its exact value.
///
/// `0x`/`0b` literals are parsed in base 16/2, everything else as a decimal
/// with an optional fractional part (`3.25` is `13/4`, `.5` is `1/2`).
pub fn parse_literal(raw: &str) -> Option<Number> {
    if let Some(digits) = raw.strip_prefix(HEX_PREFIX) {
        return BigInt::parse_bytes(digits.as_bytes(), 16).map(BigRational::from_integer);
    }
    if let Some(digits) = raw.strip_prefix(BIN_PREFIX) {
        return BigInt::parse_bytes(digits.as_bytes(), 2).map(BigRational::from_integer);
    }

    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    let mut digits = String::with_capacity(whole.len() + fraction.len());
    digits.push_str(whole);
    digits.push_str(fraction);
    let numer = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    let denom = num_traits::pow(BigInt::from(10u8), fraction.len());
    Some(BigRational::new(numer, denom))
}

/// `1` for true, `0` for false.
pub fn from_bool(b: bool) -> Number {
    if b {
        Number::one()
    } else {
        Number::zero()
    }
}

/// The number as a byte, if it is an integer in `0..=255`.
pub fn to_byte(n: &Number) -> Option<u8> {
    if !n.is_integer() {
        return None;
    }
    n.to_integer().to_u8()
}

/// Exact quotient.
pub fn div(a: &Number, b: &Number) -> Result<Number, RuntimeErrorKind> {
    if b.is_zero() {
        return Err(RuntimeErrorKind::DividedByZero);
    }
    Ok(a / b)
}

/// Floored remainder: the result has the sign of the divisor.
pub fn rem(a: &Number, b: &Number) -> Result<Number, RuntimeErrorKind> {
    if b.is_zero() {
        return Err(RuntimeErrorKind::DividedByZero);
    }
    let quotient = (a / b).floor();
    Ok(a - b * quotient)
}

/// `base` raised to an integer `exponent`.
pub fn pow(base: &Number, exponent: &Number) -> Result<Number, RuntimeErrorKind> {
    if !exponent.is_integer() {
        return Err(RuntimeErrorKind::NonIntegerExponent);
    }
    let exp = exponent
        .to_integer()
        .to_i32()
        .ok_or(RuntimeErrorKind::ExponentTooLarge)?;
    let magnitude = exp.unsigned_abs();
    let numer = base.numer().pow(magnitude);
    let denom = base.denom().pow(magnitude);
    if exp >= 0 {
        return Ok(BigRational::new(numer, denom));
    }
    if numer.is_zero() {
        return Err(RuntimeErrorKind::DividedByZero);
    }
    Ok(BigRational::new(denom, numer))
}
