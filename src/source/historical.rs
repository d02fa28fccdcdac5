use crate::core::currency::CurrencyCode;
use crate::core::decimal::{self, WORKING_SCALE};
use crate::core::rate::ExchangeRate;
use crate::source::{RateSource, SourceError};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// A rate source backed by a date-indexed table.
///
/// Each pair holds a series of dated observations. A lookup answers
/// with the most recent observation at or before the source's
/// reference date, falling back to the reciprocal of the opposite
/// direction, like [`FixedRates`](crate::source::fixed::FixedRates).
/// Produced rates carry the observation date as their timestamp.
#[derive(Debug, Clone)]
pub struct HistoricalRates {
    id: String,
    /// The date rates are resolved "as of".
    reference_date: NaiveDate,
    rates: HashMap<(CurrencyCode, CurrencyCode), BTreeMap<NaiveDate, Decimal>>,
}

impl HistoricalRates {
    pub fn new(id: impl Into<String>, reference_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            reference_date,
            rates: HashMap::new(),
        }
    }

    /// Record an observation: on `date`, 1 unit of `from` was `rate`
    /// units of `to`. Same validation as a fixed table.
    pub fn insert_rate(
        &mut self,
        from: CurrencyCode,
        to: CurrencyCode,
        date: NaiveDate,
        rate: Decimal,
    ) -> Result<(), SourceError> {
        if from == to {
            return Err(SourceError::IdentityPair { code: from });
        }
        if rate <= Decimal::ZERO {
            return Err(SourceError::InvalidRate { from, to, rate });
        }
        self.rates.entry((from, to)).or_default().insert(date, rate);
        Ok(())
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Change the date rates are resolved "as of".
    pub fn set_reference_date(&mut self, date: NaiveDate) {
        self.reference_date = date;
    }

    /// Latest observation for a pair at or before the reference date.
    fn observation(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<(NaiveDate, Decimal)> {
        self.rates
            .get(&(from.clone(), to.clone()))?
            .range(..=self.reference_date)
            .next_back()
            .map(|(&date, &rate)| (date, rate))
    }

    fn dated_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        date: NaiveDate,
        rate: Decimal,
    ) -> ExchangeRate {
        ExchangeRate::new(Some(&self.id), from.clone(), to.clone(), rate)
            .with_timestamp(date.and_time(NaiveTime::MIN).and_utc())
    }
}

impl RateSource for HistoricalRates {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<ExchangeRate> {
        if let Some((date, rate)) = self.observation(from, to) {
            return Some(self.dated_rate(from, to, date, rate));
        }
        if let Some((date, reverse)) = self.observation(to, from) {
            // Observations are positive, so the division cannot fail.
            let rate = decimal::divide(Decimal::ONE, reverse, WORKING_SCALE).ok()?;
            return Some(self.dated_rate(from, to, date, rate));
        }
        None
    }
}
