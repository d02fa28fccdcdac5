use crate::core::currency::CurrencyCode;
use crate::core::rate::ExchangeRate;
use crate::resolver::config::{ConfigStore, ResolverConfig};
use crate::resolver::registry::SourceRegistry;
use crate::source::{PairRequest, RateBatch, RateSource};
use log::{debug, warn};

/// Resolves exchange rates by composing configured sources.
///
/// The resolver walks enabled sources in configured order; the first
/// source with an answer for a pair wins. Identity pairs resolve to
/// rate 1 without consulting any source. "No source knows this pair"
/// is a normal absent outcome, not an error.
///
/// Enabled sources are re-read from the configuration store and
/// re-instantiated on every call, so configuration changes take
/// effect immediately; the resolver caches nothing between calls.
///
/// # Examples
///
/// ```
/// use currency_engine::core::currency::CurrencyCode;
/// use currency_engine::resolver::config::{InMemoryConfigStore, ResolverConfig};
/// use currency_engine::resolver::engine::ExchangeRateResolver;
/// use currency_engine::resolver::registry::InMemoryRegistry;
/// use currency_engine::source::fixed::FixedRates;
/// use rust_decimal_macros::dec;
///
/// let mut registry = InMemoryRegistry::new();
/// registry.register("fixed_rates", || {
///     let mut source = FixedRates::new("fixed_rates");
///     source
///         .set_rate(CurrencyCode::new("EUR"), CurrencyCode::new("NLG"), dec!(2.20371))
///         .unwrap();
///     Box::new(source)
/// });
/// let config = InMemoryConfigStore::new(ResolverConfig::with_enabled(["fixed_rates"]));
///
/// let resolver = ExchangeRateResolver::new(&registry, &config);
/// let rate = resolver
///     .load(&CurrencyCode::new("EUR"), &CurrencyCode::new("NLG"))
///     .unwrap();
/// assert_eq!(rate.rate(), dec!(2.20371));
/// ```
pub struct ExchangeRateResolver<'a> {
    registry: &'a dyn SourceRegistry,
    config: &'a dyn ConfigStore,
}

impl<'a> ExchangeRateResolver<'a> {
    pub fn new(registry: &'a dyn SourceRegistry, config: &'a dyn ConfigStore) -> Self {
        Self { registry, config }
    }

    /// Instantiate the enabled sources, freshly, in configured order.
    /// Entries the registry cannot instantiate are skipped.
    fn enabled_sources(&self) -> Vec<Box<dyn RateSource>> {
        let config = self.config.load();
        config
            .enabled_ids()
            .filter_map(|id| match self.registry.create(id) {
                Some(source) => Some(source),
                None => {
                    warn!("skipping unknown rate source {id}");
                    None
                }
            })
            .collect()
    }

    /// Resolve a single pair.
    ///
    /// Identity pairs short-circuit to rate 1. Otherwise the first
    /// enabled source with an answer wins; `None` when every source
    /// is exhausted.
    pub fn load(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<ExchangeRate> {
        if from == to {
            return Some(ExchangeRate::identity(from.clone()));
        }
        for source in self.enabled_sources() {
            if let Some(rate) = source.load(from, to) {
                debug!("{from} -> {to} resolved by {}", source.id());
                return Some(rate);
            }
        }
        debug!("no enabled source knows a rate for {from} -> {to}");
        None
    }

    /// Resolve a batch of pairs.
    ///
    /// Identity pairs are resolved up front, before any source is
    /// queried, regardless of source order. Each source then receives
    /// a reduced request holding only the pairs still unresolved, so a
    /// pair resolved by an earlier source is never presented to a
    /// later one; total work is one query per unresolved pair per
    /// source. Pairs no source answers stay absent in the result.
    pub fn load_multiple(&self, request: &PairRequest) -> RateBatch {
        let mut batch = RateBatch::from_request(request);

        let identities: Vec<CurrencyCode> = batch
            .iter()
            .filter(|(from, to, _)| from == to)
            .map(|(from, _, _)| from.clone())
            .collect();
        for code in identities {
            batch.set(&code, &code, ExchangeRate::identity(code.clone()));
        }

        for source in self.enabled_sources() {
            let reduced: PairRequest = batch
                .iter()
                .filter(|(_, _, rate)| rate.is_none())
                .map(|(from, to, _)| (from.clone(), to.clone()))
                .collect();
            if reduced.is_empty() {
                break;
            }

            let answers = source.load_multiple(&reduced);
            let mut resolved = 0;
            for (from, to, rate) in answers.iter() {
                if let Some(rate) = rate {
                    batch.set(from, to, rate.clone());
                    resolved += 1;
                }
            }
            debug!(
                "source {} resolved {resolved} of {} pairs",
                source.id(),
                reduced.pair_count()
            );
        }

        batch
    }

    /// The enabled/disabled status of every source the registry knows,
    /// configured entries first in configured order.
    pub fn load_configuration(&self) -> Vec<(String, bool)> {
        self.config.load().statuses(&self.registry.definitions())
    }

    /// Persist a status map as the new configuration, preserving the
    /// caller's order.
    pub fn save_configuration(&self, statuses: impl IntoIterator<Item = (String, bool)>) {
        self.config.save(ResolverConfig::from_statuses(statuses));
    }
}
