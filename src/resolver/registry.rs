use crate::source::RateSource;

/// Supplies rate source instances from their configured ids.
///
/// `definitions` enumerates every known source for presenting
/// configuration; instantiation happens lazily, and only for enabled
/// ids. `create` returning `None` means the id is unknown or the
/// source cannot be instantiated; the resolver silently skips such
/// entries.
pub trait SourceRegistry {
    /// Ids of all known sources, in registration order.
    fn definitions(&self) -> Vec<String>;

    /// Instantiate the source registered under `id`.
    fn create(&self, id: &str) -> Option<Box<dyn RateSource>>;
}

type SourceFactory = Box<dyn Fn() -> Box<dyn RateSource>>;

/// A registry of factory closures, for embedding and tests.
///
/// # Examples
///
/// ```
/// use currency_engine::core::currency::CurrencyCode;
/// use currency_engine::resolver::registry::{InMemoryRegistry, SourceRegistry};
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
///
/// assert_eq!(registry.definitions(), vec!["fixed_rates".to_string()]);
/// assert!(registry.create("fixed_rates").is_some());
/// assert!(registry.create("unknown").is_none());
/// ```
#[derive(Default)]
pub struct InMemoryRegistry {
    factories: Vec<(String, SourceFactory)>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source factory under an id. Registering an id twice
    /// replaces the earlier factory.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn RateSource> + 'static,
    {
        let id = id.into();
        let factory: SourceFactory = Box::new(factory);
        match self.factories.iter_mut().find(|(known, _)| *known == id) {
            Some((_, existing)) => *existing = factory,
            None => self.factories.push((id, factory)),
        }
    }
}

impl SourceRegistry for InMemoryRegistry {
    fn definitions(&self) -> Vec<String> {
        self.factories.iter().map(|(id, _)| id.clone()).collect()
    }

    fn create(&self, id: &str) -> Option<Box<dyn RateSource>> {
        self.factories
            .iter()
            .find(|(known, _)| known == id)
            .map(|(_, factory)| factory())
    }
}
