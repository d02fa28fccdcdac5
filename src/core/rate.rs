use crate::core::currency::CurrencyCode;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An exchange rate between two currencies, as produced by one source.
///
/// Rates are immutable once created. `provider` names the source the
/// rate came from; identity rates synthesized by the resolver carry no
/// provider. `timestamp` is set by time-aware sources (e.g. a
/// historical table) and absent for static ones.
///
/// # Examples
///
/// ```
/// use currency_engine::core::currency::CurrencyCode;
/// use currency_engine::core::rate::ExchangeRate;
/// use rust_decimal_macros::dec;
///
/// let rate = ExchangeRate::new(
///     Some("fixed_rates"),
///     CurrencyCode::new("EUR"),
///     CurrencyCode::new("NLG"),
///     dec!(2.20371),
/// );
/// assert_eq!(rate.rate(), dec!(2.20371));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Identifier of the source that produced this rate, if any.
    provider: Option<String>,
    /// When the rate was observed, for time-indexed sources.
    timestamp: Option<DateTime<Utc>>,
    /// The currency being converted from.
    from: CurrencyCode,
    /// The currency being converted to.
    to: CurrencyCode,
    /// Units of `to` per one unit of `from`. Never negative.
    rate: Decimal,
}

impl ExchangeRate {
    /// Create a new exchange rate.
    ///
    /// # Panics
    ///
    /// Panics if `rate` is negative.
    pub fn new(
        provider: Option<&str>,
        from: CurrencyCode,
        to: CurrencyCode,
        rate: Decimal,
    ) -> Self {
        assert!(
            rate >= Decimal::ZERO,
            "exchange rate must be non-negative, got {}",
            rate
        );
        Self {
            provider: provider.map(String::from),
            timestamp: None,
            from,
            to,
            rate,
        }
    }

    /// Attach an observation timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// The identity rate for a currency against itself. Always 1, never
    /// attributed to a source.
    pub fn identity(code: CurrencyCode) -> Self {
        Self {
            provider: None,
            timestamp: None,
            from: code.clone(),
            to: code,
            rate: Decimal::ONE,
        }
    }

    // --- Accessors ---

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn from(&self) -> &CurrencyCode {
        &self.from
    }

    pub fn to(&self) -> &CurrencyCode {
        &self.to
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_identity_rate() {
        let rate = ExchangeRate::identity(CurrencyCode::new("EUR"));
        assert_eq!(rate.rate(), Decimal::ONE);
        assert_eq!(rate.from(), rate.to());
        assert!(rate.provider().is_none());
    }

    #[test]
    fn test_provider_attribution() {
        let rate = ExchangeRate::new(
            Some("fixed_rates"),
            CurrencyCode::new("EUR"),
            CurrencyCode::new("NLG"),
            dec!(2.20371),
        );
        assert_eq!(rate.provider(), Some("fixed_rates"));
        assert!(rate.timestamp().is_none());
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_rate_rejected() {
        ExchangeRate::new(
            None,
            CurrencyCode::new("EUR"),
            CurrencyCode::new("USD"),
            dec!(-1),
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let rate = ExchangeRate::new(
            Some("fixed_rates"),
            CurrencyCode::new("EUR"),
            CurrencyCode::new("USD"),
            dec!(1.0786),
        );
        let json = serde_json::to_string(&rate).unwrap();
        assert!(json.contains("\"1.0786\""));
        let back: ExchangeRate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rate);
    }
}
