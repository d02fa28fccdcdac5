//! Batch resolution across multiple sources.
//!
//! Demonstrates identity short-circuiting and the reduced request each
//! source receives: pairs resolved by an earlier source are never
//! presented to a later one.

use chrono::NaiveDate;
use currency_engine::core::currency::CurrencyCode;
use currency_engine::resolver::config::{InMemoryConfigStore, ResolverConfig};
use currency_engine::resolver::engine::ExchangeRateResolver;
use currency_engine::resolver::registry::InMemoryRegistry;
use currency_engine::source::fixed::FixedRates;
use currency_engine::source::historical::HistoricalRates;
use currency_engine::source::PairRequest;
use rust_decimal_macros::dec;

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s)
}

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  currency-engine: Batch Resolution Example   ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let mut registry = InMemoryRegistry::new();

    // A fixed table that only knows the guilder conversion rate.
    registry.register("fixed_rates", || {
        let mut table = FixedRates::new("fixed_rates");
        table
            .set_rate(code("EUR"), code("NLG"), dec!(2.20371))
            .unwrap();
        Box::new(table)
    });

    // A historical series that also knows EUR/USD — but it is second
    // in priority, so it is only asked what the fixed table could not
    // answer.
    registry.register("historical_rates", || {
        let mut table = HistoricalRates::new(
            "historical_rates",
            NaiveDate::from_ymd_opt(2008, 12, 31).unwrap(),
        );
        table
            .insert_rate(
                code("EUR"),
                code("USD"),
                NaiveDate::from_ymd_opt(2008, 7, 15).unwrap(),
                dec!(1.5990),
            )
            .unwrap();
        table
            .insert_rate(
                code("EUR"),
                code("NLG"),
                NaiveDate::from_ymd_opt(2002, 1, 1).unwrap(),
                dec!(9.9999),
            )
            .unwrap();
        Box::new(table)
    });

    let config = InMemoryConfigStore::new(ResolverConfig::with_enabled([
        "fixed_rates",
        "historical_rates",
    ]));
    let resolver = ExchangeRateResolver::new(&registry, &config);

    let request: PairRequest = [
        (code("EUR"), code("NLG")),
        (code("EUR"), code("EUR")),
        (code("EUR"), code("USD")),
        (code("EUR"), code("XAU")),
    ]
    .into_iter()
    .collect();

    let batch = resolver.load_multiple(&request);

    println!("Requested {} pairs, resolved {}:\n", batch.len(), batch.resolved_count());
    for (from, to, rate) in batch.iter() {
        match rate {
            Some(rate) => println!(
                "  {} -> {}  {:<12} ({})",
                from,
                to,
                rate.rate(),
                rate.provider().unwrap_or("identity"),
            ),
            None => println!("  {} -> {}  no rate known", from, to),
        }
    }

    println!();
    println!("Note: EUR -> NLG came from fixed_rates even though the");
    println!("historical series also had an answer — the first enabled");
    println!("source wins, and later sources never see resolved pairs.");
}
