//! Rate sources: independent strategies that may know an exchange rate.
//!
//! A source answers "what is the rate from A to B" for single pairs and
//! batches. Having no opinion about a pair is a normal result, not an
//! error; the resolver walks sources in configured order until one
//! answers.

pub mod fixed;
pub mod historical;

use crate::core::currency::CurrencyCode;
use crate::core::rate::ExchangeRate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors arising when building a rate source's table.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("rate must be positive, got {rate} for {from} -> {to}")]
    InvalidRate {
        from: CurrencyCode,
        to: CurrencyCode,
        rate: Decimal,
    },
    /// Identity pairs are synthesized by the resolver and never stored.
    #[error("cannot store a rate from {code} to itself")]
    IdentityPair { code: CurrencyCode },
}

/// A batch of rate lookups: source currencies, each with the target
/// currencies requested for it.
///
/// Insertion order of source currencies and of targets within a source
/// is preserved all the way through to the result. Duplicate pairs are
/// collapsed.
///
/// # Examples
///
/// ```
/// use currency_engine::core::currency::CurrencyCode;
/// use currency_engine::source::PairRequest;
///
/// let mut request = PairRequest::new();
/// request.add(CurrencyCode::new("EUR"), CurrencyCode::new("NLG"));
/// request.add(CurrencyCode::new("EUR"), CurrencyCode::new("USD"));
/// assert_eq!(request.pair_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairRequest {
    groups: Vec<(CurrencyCode, Vec<CurrencyCode>)>,
}

impl PairRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair to the request. Duplicates are ignored.
    pub fn add(&mut self, from: CurrencyCode, to: CurrencyCode) {
        match self.groups.iter_mut().find(|(f, _)| *f == from) {
            Some((_, targets)) => {
                if !targets.contains(&to) {
                    targets.push(to);
                }
            }
            None => self.groups.push((from, vec![to])),
        }
    }

    /// Number of distinct pairs in the request.
    pub fn pair_count(&self) -> usize {
        self.groups.iter().map(|(_, targets)| targets.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pair_count() == 0
    }

    pub fn contains(&self, from: &CurrencyCode, to: &CurrencyCode) -> bool {
        self.groups
            .iter()
            .any(|(f, targets)| f == from && targets.contains(to))
    }

    /// Source currencies with their requested targets, in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&CurrencyCode, &[CurrencyCode])> {
        self.groups.iter().map(|(from, targets)| (from, targets.as_slice()))
    }

    /// All pairs in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&CurrencyCode, &CurrencyCode)> {
        self.groups
            .iter()
            .flat_map(|(from, targets)| targets.iter().map(move |to| (from, to)))
    }
}

impl FromIterator<(CurrencyCode, CurrencyCode)> for PairRequest {
    fn from_iter<I: IntoIterator<Item = (CurrencyCode, CurrencyCode)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (from, to) in iter {
            request.add(from, to);
        }
        request
    }
}

/// The result of a batch lookup: one slot per requested pair, in
/// request order, each holding a rate or nothing.
///
/// A batch always covers exactly the pairs of the request it was built
/// from; slots can be filled but never added or removed. This is what
/// lets the resolver trust that a source answered precisely what it
/// was asked.
#[derive(Debug, Clone)]
pub struct RateBatch {
    slots: Vec<RateSlot>,
}

#[derive(Debug, Clone)]
struct RateSlot {
    from: CurrencyCode,
    to: CurrencyCode,
    rate: Option<ExchangeRate>,
}

impl RateBatch {
    /// Build a batch covering the request's pairs, all unresolved.
    pub fn from_request(request: &PairRequest) -> Self {
        Self {
            slots: request
                .pairs()
                .map(|(from, to)| RateSlot {
                    from: from.clone(),
                    to: to.clone(),
                    rate: None,
                })
                .collect(),
        }
    }

    /// Number of pairs covered by this batch.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The rate for a pair, if the pair is covered and resolved.
    pub fn get(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<&ExchangeRate> {
        self.slots
            .iter()
            .find(|slot| slot.from == *from && slot.to == *to)
            .and_then(|slot| slot.rate.as_ref())
    }

    pub fn contains_pair(&self, from: &CurrencyCode, to: &CurrencyCode) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.from == *from && slot.to == *to)
    }

    /// Fill the slot for a pair. Returns false when the pair is not
    /// covered by this batch, in which case nothing is written.
    pub fn set(&mut self, from: &CurrencyCode, to: &CurrencyCode, rate: ExchangeRate) -> bool {
        match self
            .slots
            .iter_mut()
            .find(|slot| slot.from == *from && slot.to == *to)
        {
            Some(slot) => {
                slot.rate = Some(rate);
                true
            }
            None => false,
        }
    }

    /// All slots in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, &CurrencyCode, Option<&ExchangeRate>)> {
        self.slots
            .iter()
            .map(|slot| (&slot.from, &slot.to, slot.rate.as_ref()))
    }

    pub fn resolved_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.rate.is_some()).count()
    }

    pub fn unresolved_count(&self) -> usize {
        self.len() - self.resolved_count()
    }
}

/// An independent strategy that may know exchange rates.
///
/// Implementations must treat unknown pairs as a normal absence, never
/// as an error. The resolver queries sources in configured order and
/// the first present answer wins.
pub trait RateSource {
    /// Identifier this source is registered and attributed under.
    fn id(&self) -> &str;

    /// Look up a single pair. `None` means this source has no opinion.
    fn load(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<ExchangeRate>;

    /// Look up a batch of pairs. The returned batch covers exactly the
    /// requested pairs. The default implementation answers pair by
    /// pair via [`RateSource::load`]; table-backed sources may override
    /// it with something cheaper.
    fn load_multiple(&self, request: &PairRequest) -> RateBatch {
        let mut batch = RateBatch::from_request(request);
        for (from, to) in request.pairs() {
            if let Some(rate) = self.load(from, to) {
                batch.set(from, to, rate);
            }
        }
        batch
    }
}
