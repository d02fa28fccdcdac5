use criterion::{black_box, criterion_group, criterion_main, Criterion};
use currency_engine::core::currency::{Currency, CurrencyCode};
use currency_engine::resolver::config::{InMemoryConfigStore, ResolverConfig};
use currency_engine::resolver::engine::ExchangeRateResolver;
use currency_engine::resolver::registry::InMemoryRegistry;
use currency_engine::source::fixed::FixedRates;
use currency_engine::source::PairRequest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Codes CUR00..CURnn, with each consecutive pair given a rate.
fn dense_table(id: &'static str, codes: &[CurrencyCode]) -> FixedRates {
    let mut table = FixedRates::new(id);
    for window in codes.windows(2) {
        table
            .set_rate(window[0].clone(), window[1].clone(), dec!(1.2345))
            .unwrap();
    }
    table
}

fn codes(n: usize) -> Vec<CurrencyCode> {
    (0..n)
        .map(|i| CurrencyCode::new(format!("CUR{i:02}")))
        .collect()
}

fn bench_single_resolution(c: &mut Criterion) {
    let codes = codes(50);
    let table = dense_table("fixed_rates", &codes);
    let mut registry = InMemoryRegistry::new();
    registry.register("fixed_rates", move || Box::new(table.clone()));
    let config = InMemoryConfigStore::new(ResolverConfig::with_enabled(["fixed_rates"]));
    let resolver = ExchangeRateResolver::new(&registry, &config);

    c.bench_function("resolve_single_pair", |b| {
        b.iter(|| resolver.load(black_box(&codes[10]), black_box(&codes[11])))
    });
}

fn bench_batch_resolution(c: &mut Criterion) {
    let codes = codes(50);
    // Split the pairs across two sources so the batch walks both.
    let front = dense_table("front", &codes[..25]);
    let back = dense_table("back", &codes[24..]);
    let mut registry = InMemoryRegistry::new();
    registry.register("front", move || Box::new(front.clone()));
    registry.register("back", move || Box::new(back.clone()));
    let config = InMemoryConfigStore::new(ResolverConfig::with_enabled(["front", "back"]));
    let resolver = ExchangeRateResolver::new(&registry, &config);

    let request: PairRequest = codes
        .windows(2)
        .map(|window| (window[0].clone(), window[1].clone()))
        .collect();

    c.bench_function("resolve_batch_49_pairs", |b| {
        b.iter(|| resolver.load_multiple(black_box(&request)))
    });
}

fn bench_rounding(c: &mut Criterion) {
    let chf = Currency::new(CurrencyCode::new("CHF"))
        .with_subunits(100)
        .with_rounding_step(dec!(0.05));
    let amount: Decimal = dec!(12345.6789);

    c.bench_function("round_amount_to_step", |b| {
        b.iter(|| chf.round_amount(black_box(amount)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_single_resolution,
    bench_batch_resolution,
    bench_rounding
);
criterion_main!(benches);
