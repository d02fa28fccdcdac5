use serde::{Deserialize, Serialize};

/// One rate source's entry in the resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginEntry {
    pub plugin_id: String,
    pub status: bool,
}

/// Ordered resolver configuration: which sources are enabled, and in
/// which priority order they are queried.
///
/// Sources with no entry are disabled by default. The entry order is
/// the query order, so the first enabled source wins ties.
///
/// # Examples
///
/// ```
/// use currency_engine::resolver::config::ResolverConfig;
///
/// let config = ResolverConfig::from_statuses([
///     ("historical_rates".to_string(), true),
///     ("fixed_rates".to_string(), true),
///     ("foo".to_string(), false),
/// ]);
/// let enabled: Vec<&str> = config.enabled_ids().collect();
/// assert_eq!(enabled, vec!["historical_rates", "fixed_rates"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    plugins: Vec<PluginEntry>,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a configuration from `(plugin id, enabled)` pairs,
    /// preserving the caller's order.
    pub fn from_statuses(statuses: impl IntoIterator<Item = (String, bool)>) -> Self {
        Self {
            plugins: statuses
                .into_iter()
                .map(|(plugin_id, status)| PluginEntry { plugin_id, status })
                .collect(),
        }
    }

    /// A configuration enabling the given sources, in order.
    pub fn with_enabled<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_statuses(ids.into_iter().map(|id| (id.into(), true)))
    }

    pub fn entries(&self) -> &[PluginEntry] {
        &self.plugins
    }

    /// Ids of enabled sources, in query order.
    pub fn enabled_ids(&self) -> impl Iterator<Item = &str> {
        self.plugins
            .iter()
            .filter(|entry| entry.status)
            .map(|entry| entry.plugin_id.as_str())
    }

    /// Merge this configuration with the registry's known source ids:
    /// configured entries first, in configured order, then every other
    /// known id disabled.
    pub fn statuses(&self, known_ids: &[String]) -> Vec<(String, bool)> {
        let mut statuses: Vec<(String, bool)> = self
            .plugins
            .iter()
            .map(|entry| (entry.plugin_id.clone(), entry.status))
            .collect();
        for id in known_ids {
            if !statuses.iter().any(|(configured, _)| configured == id) {
                statuses.push((id.clone(), false));
            }
        }
        statuses
    }
}

/// Where the resolver configuration lives.
///
/// The resolver reads the configuration fresh on every call, so
/// changes through [`ConfigStore::save`] take effect immediately.
/// `save` takes `&self`; implementations use interior mutability.
pub trait ConfigStore {
    fn load(&self) -> ResolverConfig;
    fn save(&self, config: ResolverConfig);
}

/// A configuration store held in memory, for embedding and tests.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    config: std::cell::RefCell<ResolverConfig>,
}

impl InMemoryConfigStore {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config: std::cell::RefCell::new(config),
        }
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load(&self) -> ResolverConfig {
        self.config.borrow().clone()
    }

    fn save(&self, config: ResolverConfig) {
        *self.config.borrow_mut() = config;
    }
}
