//! Foundational value types: currency codes and records, exchange
//! rates, exact decimal arithmetic.

pub mod currency;
pub mod decimal;
pub mod rate;
