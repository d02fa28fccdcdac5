use crate::core::decimal::{self, DecimalError, WORKING_SCALE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// ISO 4217-style currency code.
///
/// Supports standard fiat currencies (USD, EUR, NLG, etc.) as well as
/// arbitrary identifiers for digital currencies or experimental
/// monetary units. Equality is exact string match.
///
/// # Examples
///
/// ```
/// use currency_engine::core::currency::CurrencyCode;
///
/// let eur = CurrencyCode::new("EUR");
/// let usd = CurrencyCode::new("USD");
/// assert_ne!(eur, usd);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors arising from the rounding model.
#[derive(Debug, Error)]
pub enum RoundingError {
    /// The currency defines neither a rounding step nor a subunit
    /// count, so rounding is undefined. Callers must treat this as a
    /// failure, not as "no rounding".
    #[error("rounding is undefined for currency {code}: no rounding step or subunit count")]
    Undefined { code: CurrencyCode },
    #[error(transparent)]
    Decimal(#[from] DecimalError),
}

/// A currency definition with its rounding metadata.
///
/// `subunits` is the number of subunits one main unit divides into
/// (100 for cent-based currencies). `rounding_step` overrides the
/// step derived from `subunits`, for currencies that round cash
/// amounts to a coarser increment than their smallest coin (e.g.
/// rounding to the nearest 0.05).
///
/// # Examples
///
/// ```
/// use currency_engine::core::currency::{Currency, CurrencyCode};
/// use rust_decimal_macros::dec;
///
/// let eur = Currency::new(CurrencyCode::new("EUR")).with_subunits(100);
/// assert_eq!(eur.decimals(), 2);
/// assert_eq!(eur.round_amount(dec!(123.456)).unwrap(), dec!(123.46));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code identifying this currency.
    code: CurrencyCode,
    /// Number of subunits in one main unit, if known.
    #[serde(default)]
    subunits: Option<u32>,
    /// Explicit rounding increment, overriding the subunit-derived one.
    #[serde(default)]
    rounding_step: Option<Decimal>,
    /// Human-readable name, for display only.
    #[serde(default)]
    label: Option<String>,
    /// Official sign, such as '€' or '$'. Display only.
    #[serde(default)]
    sign: Option<String>,
}

impl Currency {
    pub fn new(code: CurrencyCode) -> Self {
        Self {
            code,
            subunits: None,
            rounding_step: None,
            label: None,
            sign: None,
        }
    }

    pub fn with_subunits(mut self, subunits: u32) -> Self {
        self.subunits = Some(subunits);
        self
    }

    pub fn with_rounding_step(mut self, step: Decimal) -> Self {
        self.rounding_step = Some(step);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_sign(mut self, sign: impl Into<String>) -> Self {
        self.sign = Some(sign.into());
        self
    }

    pub fn code(&self) -> &CurrencyCode {
        &self.code
    }

    pub fn subunits(&self) -> Option<u32> {
        self.subunits
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn sign(&self) -> Option<&str> {
        self.sign.as_deref()
    }

    /// Number of decimal places amounts in this currency display with.
    ///
    /// Zero when the subunit count is unknown or zero; otherwise the
    /// smallest `d >= 1` such that `10^d >= subunits`. A currency with
    /// 100 subunits has 2 decimals, one with 1000 subunits has 3.
    pub fn decimals(&self) -> u32 {
        match self.subunits {
            Some(subunits) if subunits > 0 => {
                let mut d = 1;
                while 10u64.pow(d) < u64::from(subunits) {
                    d += 1;
                }
                d
            }
            _ => 0,
        }
    }

    /// The increment amounts in this currency are rounded to.
    ///
    /// An explicit `rounding_step` wins. Otherwise the step is one
    /// subunit: `1 / subunits` at the working scale, or `1` for a
    /// currency with no subdivision. `None` when neither is defined,
    /// in which case rounding is undefined.
    pub fn rounding_step(&self) -> Option<Decimal> {
        if let Some(step) = self.rounding_step {
            return Some(step);
        }
        match self.subunits {
            Some(0) => Some(Decimal::ONE),
            // subunits > 0 here, so the division cannot fail.
            Some(subunits) => {
                decimal::divide(Decimal::ONE, Decimal::from(subunits), WORKING_SCALE).ok()
            }
            None => None,
        }
    }

    /// Round an amount to this currency's rounding step.
    ///
    /// The amount is divided by the step, rounded to the nearest whole
    /// number of steps (half away from zero), and multiplied back at
    /// this currency's decimal count. Rounding in units of the step
    /// rather than a decimal place is what makes non-power-of-ten
    /// steps (0.05, 0.25) come out right.
    pub fn round_amount(&self, amount: Decimal) -> Result<Decimal, RoundingError> {
        let step = self.rounding_step().ok_or_else(|| RoundingError::Undefined {
            code: self.code.clone(),
        })?;
        let quotient = decimal::divide(amount, step, WORKING_SCALE)?;
        let whole_steps = decimal::round_to_integer(quotient);
        Ok(decimal::multiply(whole_steps, step, self.decimals())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_code_equality() {
        let a = CurrencyCode::new("EUR");
        let b = CurrencyCode::new("EUR");
        assert_eq!(a, b);
    }

    #[test]
    fn test_decimals_derivation() {
        let currency = |subunits| Currency::new(CurrencyCode::new("XXX")).with_subunits(subunits);
        assert_eq!(Currency::new(CurrencyCode::new("XXX")).decimals(), 0);
        assert_eq!(currency(0).decimals(), 0);
        assert_eq!(currency(1).decimals(), 1);
        assert_eq!(currency(2).decimals(), 1);
        assert_eq!(currency(10).decimals(), 1);
        assert_eq!(currency(100).decimals(), 2);
        assert_eq!(currency(1000).decimals(), 3);
    }

    #[test]
    fn test_rounding_step_from_subunits() {
        let eur = Currency::new(CurrencyCode::new("EUR")).with_subunits(100);
        assert_eq!(eur.rounding_step(), Some(dec!(0.01)));

        let whole = Currency::new(CurrencyCode::new("XAU")).with_subunits(0);
        assert_eq!(whole.rounding_step(), Some(Decimal::ONE));
    }

    #[test]
    fn test_explicit_rounding_step_wins() {
        let chf = Currency::new(CurrencyCode::new("CHF"))
            .with_subunits(100)
            .with_rounding_step(dec!(0.05));
        assert_eq!(chf.rounding_step(), Some(dec!(0.05)));
    }

    #[test]
    fn test_rounding_step_undefined() {
        let unknown = Currency::new(CurrencyCode::new("XTS"));
        assert!(unknown.rounding_step().is_none());
        assert!(matches!(
            unknown.round_amount(dec!(1)),
            Err(RoundingError::Undefined { .. })
        ));
    }

    #[test]
    fn test_round_amount_to_subunit() {
        let eur = Currency::new(CurrencyCode::new("EUR")).with_subunits(100);
        assert_eq!(eur.round_amount(dec!(123.456)).unwrap(), dec!(123.46));
        assert_eq!(eur.round_amount(dec!(123.454)).unwrap(), dec!(123.45));
        assert_eq!(eur.round_amount(dec!(-123.456)).unwrap(), dec!(-123.46));
    }

    #[test]
    fn test_round_amount_to_coarse_step() {
        // Swiss cash rounding: nearest 0.05, displayed at 2 decimals.
        let chf = Currency::new(CurrencyCode::new("CHF"))
            .with_subunits(100)
            .with_rounding_step(dec!(0.05));
        assert_eq!(chf.round_amount(dec!(1.33)).unwrap(), dec!(1.35));
        assert_eq!(chf.round_amount(dec!(1.32)).unwrap(), dec!(1.30));
        assert_eq!(chf.round_amount(dec!(1.025)).unwrap(), dec!(1.05));
    }

    #[test]
    fn test_round_amount_zero_step_is_division_by_zero() {
        let broken = Currency::new(CurrencyCode::new("XXX"))
            .with_subunits(100)
            .with_rounding_step(Decimal::ZERO);
        assert!(matches!(
            broken.round_amount(dec!(1)),
            Err(RoundingError::Decimal(DecimalError::DivisionByZero))
        ));
    }
}
