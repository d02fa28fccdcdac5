//! Basic single-pair resolution and rounding example.
//!
//! Demonstrates first-source-wins resolution, reciprocal derivation,
//! and rounding a converted amount to the currency's step.

use currency_engine::core::currency::{Currency, CurrencyCode};
use currency_engine::resolver::config::{InMemoryConfigStore, ResolverConfig};
use currency_engine::resolver::engine::ExchangeRateResolver;
use currency_engine::resolver::registry::InMemoryRegistry;
use currency_engine::source::fixed::FixedRates;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  currency-engine: Basic Resolution Example   ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let eur = CurrencyCode::new("EUR");
    let nlg = CurrencyCode::new("NLG");
    let jpy = CurrencyCode::new("JPY");

    let mut registry = InMemoryRegistry::new();
    registry.register("fixed_rates", || {
        let mut table = FixedRates::new("fixed_rates");
        table
            .set_rate(
                CurrencyCode::new("EUR"),
                CurrencyCode::new("NLG"),
                dec!(2.20371),
            )
            .unwrap();
        Box::new(table)
    });

    let config = InMemoryConfigStore::new(ResolverConfig::with_enabled(["fixed_rates"]));
    let resolver = ExchangeRateResolver::new(&registry, &config);

    // --- Scenario 1: Direct, reverse, and identity lookups ---
    println!("━━━ Scenario 1: Single-Pair Resolution ━━━\n");

    let direct = resolver.load(&eur, &nlg).unwrap();
    println!("EUR -> NLG  {}  (from {})", direct.rate(), direct.provider().unwrap());

    let reverse = resolver.load(&nlg, &eur).unwrap();
    println!("NLG -> EUR  {}  (reciprocal of the stored rate)", reverse.rate());

    let identity = resolver.load(&eur, &eur).unwrap();
    println!("EUR -> EUR  {}  (identity, no source queried)", identity.rate());

    match resolver.load(&eur, &jpy) {
        Some(rate) => println!("EUR -> JPY  {}", rate.rate()),
        None => println!("EUR -> JPY  no rate known"),
    }

    // --- Scenario 2: Convert and round ---
    println!("\n━━━ Scenario 2: Convert 100 NLG to EUR, round to the cent ━━━\n");

    let eur_currency = Currency::new(eur.clone()).with_subunits(100);
    let amount = dec!(100) * reverse.rate();
    let rounded = eur_currency.round_amount(amount).unwrap();

    println!("100 NLG x {}  = {} EUR", reverse.rate(), amount);
    println!("rounded to step {}  = {} EUR", eur_currency.rounding_step().unwrap(), rounded);
}
