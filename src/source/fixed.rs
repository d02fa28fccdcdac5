use crate::core::currency::CurrencyCode;
use crate::core::decimal::{self, WORKING_SCALE};
use crate::core::rate::ExchangeRate;
use crate::source::{RateSource, SourceError};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A rate source backed by a static table of configured rates.
///
/// Looks up the direct rate first. When only the opposite direction is
/// stored, the reciprocal is derived at the working scale, so a table
/// holding `EUR -> NLG = 2.20371` also answers `NLG -> EUR` with
/// `0.453780216`.
///
/// # Examples
///
/// ```
/// use currency_engine::core::currency::CurrencyCode;
/// use currency_engine::source::fixed::FixedRates;
/// use currency_engine::source::RateSource;
/// use rust_decimal_macros::dec;
///
/// let mut source = FixedRates::new("fixed_rates");
/// source
///     .set_rate(CurrencyCode::new("EUR"), CurrencyCode::new("NLG"), dec!(2.20371))
///     .unwrap();
///
/// let reverse = source
///     .load(&CurrencyCode::new("NLG"), &CurrencyCode::new("EUR"))
///     .unwrap();
/// assert_eq!(reverse.rate().to_string(), "0.453780216");
/// ```
#[derive(Debug, Clone)]
pub struct FixedRates {
    id: String,
    rates: HashMap<(CurrencyCode, CurrencyCode), Decimal>,
}

impl FixedRates {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rates: HashMap::new(),
        }
    }

    /// Store a rate: 1 unit of `from` = `rate` units of `to`.
    ///
    /// Rates must be positive so that reciprocal derivation is always
    /// defined. Identity pairs are rejected; the resolver synthesizes
    /// those itself.
    pub fn set_rate(
        &mut self,
        from: CurrencyCode,
        to: CurrencyCode,
        rate: Decimal,
    ) -> Result<(), SourceError> {
        if from == to {
            return Err(SourceError::IdentityPair { code: from });
        }
        if rate <= Decimal::ZERO {
            return Err(SourceError::InvalidRate { from, to, rate });
        }
        self.rates.insert((from, to), rate);
        Ok(())
    }

    /// Number of stored (directed) rates.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl RateSource for FixedRates {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<ExchangeRate> {
        if let Some(&rate) = self.rates.get(&(from.clone(), to.clone())) {
            return Some(ExchangeRate::new(Some(&self.id), from.clone(), to.clone(), rate));
        }
        // Only the opposite direction is stored; derive the reciprocal.
        // Stored rates are positive, so the division cannot fail.
        if let Some(&reverse) = self.rates.get(&(to.clone(), from.clone())) {
            let rate = decimal::divide(Decimal::ONE, reverse, WORKING_SCALE).ok()?;
            return Some(ExchangeRate::new(Some(&self.id), from.clone(), to.clone(), rate));
        }
        None
    }
}
