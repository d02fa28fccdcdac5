use chrono::NaiveDate;
use currency_engine::core::currency::{Currency, CurrencyCode};
use currency_engine::resolver::config::{ConfigStore, InMemoryConfigStore, ResolverConfig};
use currency_engine::resolver::engine::ExchangeRateResolver;
use currency_engine::resolver::registry::InMemoryRegistry;
use currency_engine::source::fixed::FixedRates;
use currency_engine::source::historical::HistoricalRates;
use currency_engine::source::PairRequest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s)
}

/// A registry with a fixed table (EUR/NLG) and a historical EUR/USD
/// series, the setup the full pipeline scenarios run against.
fn registry() -> InMemoryRegistry {
    let mut registry = InMemoryRegistry::new();

    registry.register("fixed_rates", || {
        let mut table = FixedRates::new("fixed_rates");
        table
            .set_rate(code("EUR"), code("NLG"), dec!(2.20371))
            .unwrap();
        Box::new(table)
    });

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
        Box::new(table)
    });

    registry
}

/// Full pipeline: configuration → resolution → rounding.
#[test]
fn full_pipeline_conversion_scenario() {
    let registry = registry();
    let config = InMemoryConfigStore::new(ResolverConfig::with_enabled([
        "fixed_rates",
        "historical_rates",
    ]));
    let resolver = ExchangeRateResolver::new(&registry, &config);

    // Direct rate from the fixed table.
    let rate = resolver.load(&code("EUR"), &code("NLG")).unwrap();
    assert_eq!(rate.rate(), dec!(2.20371));
    assert_eq!(rate.provider(), Some("fixed_rates"));

    // Reverse rate derived from the same table entry.
    let reverse = resolver.load(&code("NLG"), &code("EUR")).unwrap();
    assert_eq!(reverse.rate().to_string(), "0.453780216");

    // Dated rate from the historical series.
    let dated = resolver.load(&code("EUR"), &code("USD")).unwrap();
    assert_eq!(dated.rate(), dec!(1.5990));
    assert_eq!(dated.provider(), Some("historical_rates"));
    assert!(dated.timestamp().is_some());

    // Convert and round: 100 NLG in EUR, to the cent.
    let eur = Currency::new(code("EUR")).with_subunits(100);
    let amount = dec!(100) * reverse.rate();
    assert_eq!(eur.round_amount(amount).unwrap(), dec!(45.38));
}

#[test]
fn batch_resolution_across_sources() {
    let registry = registry();
    let config = InMemoryConfigStore::new(ResolverConfig::with_enabled([
        "fixed_rates",
        "historical_rates",
    ]));
    let resolver = ExchangeRateResolver::new(&registry, &config);

    let request: PairRequest = [
        (code("EUR"), code("NLG")),
        (code("EUR"), code("EUR")),
        (code("EUR"), code("USD")),
        (code("EUR"), code("JPY")),
    ]
    .into_iter()
    .collect();

    let batch = resolver.load_multiple(&request);
    assert_eq!(batch.len(), 4);
    assert_eq!(batch.resolved_count(), 3);

    assert_eq!(
        batch.get(&code("EUR"), &code("NLG")).unwrap().provider(),
        Some("fixed_rates")
    );
    assert_eq!(
        batch.get(&code("EUR"), &code("EUR")).unwrap().rate(),
        Decimal::ONE
    );
    assert_eq!(
        batch.get(&code("EUR"), &code("USD")).unwrap().provider(),
        Some("historical_rates")
    );
    assert!(batch.get(&code("EUR"), &code("JPY")).is_none());
}

#[test]
fn source_order_decides_the_winner() {
    let mut registry = InMemoryRegistry::new();
    registry.register("a", || {
        let mut table = FixedRates::new("a");
        table.set_rate(code("EUR"), code("USD"), dec!(1.08)).unwrap();
        Box::new(table)
    });
    registry.register("b", || {
        let mut table = FixedRates::new("b");
        table.set_rate(code("EUR"), code("USD"), dec!(1.10)).unwrap();
        Box::new(table)
    });

    let config = InMemoryConfigStore::new(ResolverConfig::with_enabled(["a", "b"]));
    let resolver = ExchangeRateResolver::new(&registry, &config);
    assert_eq!(
        resolver.load(&code("EUR"), &code("USD")).unwrap().rate(),
        dec!(1.08)
    );

    config.save(ResolverConfig::with_enabled(["b", "a"]));
    assert_eq!(
        resolver.load(&code("EUR"), &code("USD")).unwrap().rate(),
        dec!(1.10)
    );
}

#[test]
fn configuration_round_trip_through_resolver() {
    let registry = registry();
    let config = InMemoryConfigStore::new(ResolverConfig::new());
    let resolver = ExchangeRateResolver::new(&registry, &config);

    // Nothing configured: everything known but disabled.
    assert_eq!(
        resolver.load_configuration(),
        vec![
            ("fixed_rates".to_string(), false),
            ("historical_rates".to_string(), false),
        ]
    );
    assert!(resolver.load(&code("EUR"), &code("NLG")).is_none());

    resolver.save_configuration([
        ("historical_rates".to_string(), true),
        ("fixed_rates".to_string(), true),
        ("foo".to_string(), false),
    ]);
    assert_eq!(
        resolver.load_configuration(),
        vec![
            ("historical_rates".to_string(), true),
            ("fixed_rates".to_string(), true),
            ("foo".to_string(), false),
        ]
    );
    assert!(resolver.load(&code("EUR"), &code("NLG")).is_some());
}

#[test]
fn rounding_model_scenarios() {
    let eur = Currency::new(code("EUR")).with_subunits(100);
    assert_eq!(eur.decimals(), 2);
    assert_eq!(eur.rounding_step(), Some(dec!(0.01)));
    assert_eq!(eur.round_amount(dec!(123.456)).unwrap(), dec!(123.46));

    let bhd = Currency::new(code("BHD")).with_subunits(1000);
    assert_eq!(bhd.decimals(), 3);
    assert_eq!(bhd.round_amount(dec!(1.23456)).unwrap(), dec!(1.235));

    let chf = Currency::new(code("CHF"))
        .with_subunits(100)
        .with_rounding_step(dec!(0.05));
    assert_eq!(chf.round_amount(dec!(7.27)).unwrap(), dec!(7.25));
    assert_eq!(chf.round_amount(dec!(7.28)).unwrap(), dec!(7.30));
}
