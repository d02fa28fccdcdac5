//! # currency-engine
//!
//! Exchange-rate resolution and exact decimal rounding for monetary
//! amounts.
//!
//! Rates are resolved by an ordered composition of independent
//! sources: the first enabled source that knows a pair wins, identity
//! pairs always resolve to 1, and "no rate known" is a normal absent
//! outcome. Amounts are rounded to a currency's rounding step with
//! exact decimal arithmetic, never binary floating point.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: currency codes and records,
//!   exchange rates, decimal primitives
//! - **source** — The rate source contract and its table-backed
//!   variants (fixed, historical)
//! - **resolver** — Ordered source composition, configuration, and
//!   the registry seam

pub mod core;
pub mod resolver;
pub mod source;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::currency::{Currency, CurrencyCode};
    pub use crate::core::decimal::WORKING_SCALE;
    pub use crate::core::rate::ExchangeRate;
    pub use crate::resolver::config::{ConfigStore, InMemoryConfigStore, ResolverConfig};
    pub use crate::resolver::engine::ExchangeRateResolver;
    pub use crate::resolver::registry::{InMemoryRegistry, SourceRegistry};
    pub use crate::source::{PairRequest, RateBatch, RateSource};
}
