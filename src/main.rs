//! currency-engine CLI
//!
//! Resolve exchange rates and round monetary amounts from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Resolve pairs against a JSON rate document
//! currency-engine resolve --rates rates.json EUR NLG NLG EUR
//!
//! # Output as JSON
//! currency-engine resolve --rates rates.json --format json EUR USD
//!
//! # Round an amount for a currency with 100 subunits
//! currency-engine round --subunits 100 123.456
//!
//! # List configured sources
//! currency-engine sources --rates rates.json
//! ```

use chrono::{NaiveDate, Utc};
use currency_engine::core::currency::{Currency, CurrencyCode};
use currency_engine::core::decimal;
use currency_engine::resolver::config::{InMemoryConfigStore, PluginEntry, ResolverConfig};
use currency_engine::resolver::engine::ExchangeRateResolver;
use currency_engine::resolver::registry::InMemoryRegistry;
use currency_engine::source::fixed::FixedRates;
use currency_engine::source::historical::HistoricalRates;
use currency_engine::source::PairRequest;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"currency-engine — exchange-rate resolution and exact monetary rounding

USAGE:
    currency-engine <COMMAND> [OPTIONS]

COMMANDS:
    resolve     Resolve exchange rates for one or more currency pairs
    round       Round an amount to a currency's rounding step
    sources     List known rate sources and their enabled status
    help        Show this message

OPTIONS (resolve, sources):
    --rates <FILE>      Path to JSON rate document
    --format <FORMAT>   Output format: text (default) or json
    --date <DATE>       Reference date for historical rates (YYYY-MM-DD, default today)

OPTIONS (round):
    --subunits <N>      Number of subunits in one main unit
    --step <S>          Explicit rounding step (overrides --subunits derivation)

EXAMPLES:
    currency-engine resolve --rates rates.json EUR NLG
    currency-engine resolve --rates rates.json --format json EUR NLG NLG EUR
    currency-engine resolve --rates rates.json --date 2008-07-15 EUR USD
    currency-engine round --subunits 100 123.456
    currency-engine round --subunits 100 --step 0.05 1.33"#
    );
}

/// JSON schema for the rate document.
#[derive(serde::Deserialize)]
struct RatesFile {
    #[serde(default)]
    fixed: Vec<FixedRateInput>,
    #[serde(default)]
    historical: Vec<HistoricalRateInput>,
    /// Source priority configuration; defaults to both sources
    /// enabled, fixed first.
    #[serde(default)]
    plugins: Option<Vec<PluginEntry>>,
}

#[derive(serde::Deserialize)]
struct FixedRateInput {
    from: String,
    to: String,
    rate: String,
}

#[derive(serde::Deserialize)]
struct HistoricalRateInput {
    from: String,
    to: String,
    date: NaiveDate,
    rate: String,
}

/// JSON output schema for resolved rates.
#[derive(serde::Serialize)]
struct RateOutput {
    from: String,
    to: String,
    rate: Option<String>,
    provider: Option<String>,
}

struct LoadedRates {
    registry: InMemoryRegistry,
    config: InMemoryConfigStore,
}

fn parse_decimal_or_exit(s: &str, what: &str) -> rust_decimal::Decimal {
    decimal::parse(s).unwrap_or_else(|e| {
        eprintln!("Invalid {}: {}", what, e);
        process::exit(1);
    })
}

fn load_rates(path: &str, reference_date: NaiveDate) -> LoadedRates {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: RatesFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "fixed": [
    {{ "from": "EUR", "to": "NLG", "rate": "2.20371" }}
  ],
  "historical": [
    {{ "from": "EUR", "to": "USD", "date": "2008-07-15", "rate": "1.5990" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut fixed = FixedRates::new("fixed_rates");
    for entry in &file.fixed {
        let rate = parse_decimal_or_exit(&entry.rate, "rate");
        fixed
            .set_rate(CurrencyCode::new(&entry.from), CurrencyCode::new(&entry.to), rate)
            .unwrap_or_else(|e| {
                eprintln!("Invalid fixed rate: {}", e);
                process::exit(1);
            });
    }

    let mut historical = HistoricalRates::new("historical_rates", reference_date);
    for entry in &file.historical {
        let rate = parse_decimal_or_exit(&entry.rate, "rate");
        historical
            .insert_rate(
                CurrencyCode::new(&entry.from),
                CurrencyCode::new(&entry.to),
                entry.date,
                rate,
            )
            .unwrap_or_else(|e| {
                eprintln!("Invalid historical rate: {}", e);
                process::exit(1);
            });
    }

    let mut registry = InMemoryRegistry::new();
    registry.register("fixed_rates", move || Box::new(fixed.clone()));
    registry.register("historical_rates", move || Box::new(historical.clone()));

    let config = match file.plugins {
        Some(entries) => ResolverConfig::from_statuses(
            entries.into_iter().map(|entry| (entry.plugin_id, entry.status)),
        ),
        None => ResolverConfig::with_enabled(["fixed_rates", "historical_rates"]),
    };

    LoadedRates {
        registry,
        config: InMemoryConfigStore::new(config),
    }
}

fn cmd_resolve(args: &[String]) {
    let mut rates_path = None;
    let mut format = "text".to_string();
    let mut reference_date = Utc::now().date_naive();
    let mut codes: Vec<String> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--rates" => {
                i += 1;
                rates_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--rates requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--date" => {
                i += 1;
                reference_date = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--date requires a YYYY-MM-DD date");
                        process::exit(1);
                    });
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
            code => codes.push(code.to_string()),
        }
        i += 1;
    }

    let path = rates_path.unwrap_or_else(|| {
        eprintln!("Error: --rates <FILE> is required");
        process::exit(1);
    });
    if codes.is_empty() || codes.len() % 2 != 0 {
        eprintln!("Error: pairs must be given as <FROM> <TO> [<FROM> <TO>...]");
        process::exit(1);
    }

    let loaded = load_rates(&path, reference_date);
    let resolver = ExchangeRateResolver::new(&loaded.registry, &loaded.config);

    let request: PairRequest = codes
        .chunks(2)
        .map(|pair| (CurrencyCode::new(&pair[0]), CurrencyCode::new(&pair[1])))
        .collect();
    let batch = resolver.load_multiple(&request);

    if format == "json" {
        let output: Vec<RateOutput> = batch
            .iter()
            .map(|(from, to, rate)| RateOutput {
                from: from.to_string(),
                to: to.to_string(),
                rate: rate.map(|r| r.rate().to_string()),
                provider: rate.and_then(|r| r.provider().map(String::from)),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        for (from, to, rate) in batch.iter() {
            match rate {
                Some(rate) => {
                    let provider = rate.provider().unwrap_or("identity");
                    println!("{} -> {}  {}  ({})", from, to, rate.rate(), provider);
                }
                None => println!("{} -> {}  no rate known", from, to),
            }
        }
    }
}

fn cmd_round(args: &[String]) {
    let mut subunits: Option<u32> = None;
    let mut step: Option<String> = None;
    let mut amount: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--subunits" => {
                i += 1;
                subunits = Some(args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--subunits requires a non-negative integer");
                    process::exit(1);
                }));
            }
            "--step" => {
                i += 1;
                step = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--step requires a numeric string");
                    process::exit(1);
                }));
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
            value => amount = Some(value.to_string()),
        }
        i += 1;
    }

    let amount = amount.unwrap_or_else(|| {
        eprintln!("Error: an amount is required");
        process::exit(1);
    });
    let amount = parse_decimal_or_exit(&amount, "amount");

    let mut currency = Currency::new(CurrencyCode::new("XXX"));
    if let Some(subunits) = subunits {
        currency = currency.with_subunits(subunits);
    }
    if let Some(step) = step {
        currency = currency.with_rounding_step(parse_decimal_or_exit(&step, "step"));
    }

    match currency.round_amount(amount) {
        Ok(rounded) => println!("{}", rounded),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_sources(args: &[String]) {
    let mut rates_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--rates" => {
                i += 1;
                rates_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--rates requires a file path");
                    process::exit(1);
                }));
            }
            other => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = rates_path.unwrap_or_else(|| {
        eprintln!("Error: --rates <FILE> is required");
        process::exit(1);
    });

    let loaded = load_rates(&path, Utc::now().date_naive());
    let resolver = ExchangeRateResolver::new(&loaded.registry, &loaded.config);
    for (id, enabled) in resolver.load_configuration() {
        let status = if enabled { "enabled" } else { "disabled" };
        println!("{:<20} {}", id, status);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "resolve" => cmd_resolve(rest),
        "round" => cmd_round(rest),
        "sources" => cmd_sources(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
