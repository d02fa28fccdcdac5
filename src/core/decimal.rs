//! Exact decimal primitives for monetary arithmetic.
//!
//! Every numeric operation in the engine goes through these helpers so
//! that amounts and rates are never represented as binary floating
//! point. Intermediate divisions are carried out at [`WORKING_SCALE`]
//! fractional digits and truncated, so repeated divide/multiply chains
//! do not accumulate representation error before the final rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of fractional digits kept by intermediate divisions.
///
/// High enough that a divide/round/multiply chain over realistic
/// monetary magnitudes loses nothing before the final rounding step.
pub const WORKING_SCALE: u32 = 9;

/// Errors arising from decimal arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecimalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("not a numeric string: {0:?}")]
    Malformed(String),
    #[error("decimal overflow in {operation}")]
    Overflow { operation: &'static str },
}

/// Parse a numeric string into an exact decimal.
///
/// Malformed input is an error, never silently coerced to zero.
///
/// # Examples
///
/// ```
/// use currency_engine::core::decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(decimal::parse("2.20371").unwrap(), dec!(2.20371));
/// assert!(decimal::parse("two-ish").is_err());
/// ```
pub fn parse(s: &str) -> Result<Decimal, DecimalError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| DecimalError::Malformed(s.to_string()))
}

/// Divide `a` by `b`, truncating the exact quotient to `scale`
/// fractional digits.
///
/// Truncation (not rounding) matches arbitrary-precision division
/// semantics: `divide(1, 2.20371, 9)` is `0.453780216`, with the tenth
/// digit dropped rather than rounded.
///
/// # Examples
///
/// ```
/// use currency_engine::core::decimal::{self, WORKING_SCALE};
/// use rust_decimal_macros::dec;
///
/// let rate = decimal::divide(dec!(1), dec!(2.20371), WORKING_SCALE).unwrap();
/// assert_eq!(rate.to_string(), "0.453780216");
/// ```
pub fn divide(a: Decimal, b: Decimal, scale: u32) -> Result<Decimal, DecimalError> {
    if b.is_zero() {
        return Err(DecimalError::DivisionByZero);
    }
    a.checked_div(b)
        .map(|q| q.trunc_with_scale(scale))
        .ok_or(DecimalError::Overflow {
            operation: "divide",
        })
}

/// Multiply `a` by `b`, rounding the exact product to `output_scale`
/// fractional digits, half away from zero.
pub fn multiply(a: Decimal, b: Decimal, output_scale: u32) -> Result<Decimal, DecimalError> {
    a.checked_mul(b)
        .map(|p| p.round_dp_with_strategy(output_scale, RoundingStrategy::MidpointAwayFromZero))
        .ok_or(DecimalError::Overflow {
            operation: "multiply",
        })
}

/// Round to the nearest integer, half away from zero.
///
/// # Examples
///
/// ```
/// use currency_engine::core::decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(decimal::round_to_integer(dec!(12345.6)), dec!(12346));
/// assert_eq!(decimal::round_to_integer(dec!(-2.5)), dec!(-3));
/// ```
pub fn round_to_integer(a: Decimal) -> Decimal {
    a.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse("1").unwrap(), dec!(1));
        assert_eq!(parse("-0.05").unwrap(), dec!(-0.05));
        assert_eq!(parse(" 123.456 ").unwrap(), dec!(123.456));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(parse("abc"), Err(DecimalError::Malformed("abc".to_string())));
        assert!(parse("").is_err());
        assert!(parse("1.2.3").is_err());
    }

    #[test]
    fn test_divide_truncates_to_scale() {
        let q = divide(dec!(1), dec!(3), 4).unwrap();
        assert_eq!(q.to_string(), "0.3333");

        // Tenth fractional digit is dropped, not rounded up.
        let q = divide(dec!(1), dec!(2.20371), WORKING_SCALE).unwrap();
        assert_eq!(q.to_string(), "0.453780216");
    }

    #[test]
    fn test_divide_exact_quotient() {
        let q = divide(dec!(1), dec!(100), WORKING_SCALE).unwrap();
        assert_eq!(q, dec!(0.01));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            divide(dec!(1), Decimal::ZERO, WORKING_SCALE),
            Err(DecimalError::DivisionByZero)
        );
    }

    #[test]
    fn test_multiply_rounds_half_away_from_zero() {
        assert_eq!(multiply(dec!(1.25), dec!(1), 1).unwrap(), dec!(1.3));
        assert_eq!(multiply(dec!(-1.25), dec!(1), 1).unwrap(), dec!(-1.3));
        assert_eq!(multiply(dec!(12346), dec!(0.01), 2).unwrap(), dec!(123.46));
    }

    #[test]
    fn test_round_to_integer() {
        assert_eq!(round_to_integer(dec!(0.5)), dec!(1));
        assert_eq!(round_to_integer(dec!(-0.5)), dec!(-1));
        assert_eq!(round_to_integer(dec!(12345.4)), dec!(12345));
        assert_eq!(round_to_integer(dec!(2)), dec!(2));
    }
}
