//! # Seed Data Generator
//!
//! Writes the development item catalog and pricing rules.
//!
//! ## Usage
//! ```bash
//! # Write data/items.json and data/pricing_rules.json
//! cargo run -p checkout-store --bin seed
//!
//! # Custom paths
//! cargo run -p checkout-store --bin seed -- --items /tmp/items.json --rules /tmp/rules.json
//! ```
//!
//! ## Generated Data
//! The acceptance catalog:
//! - A $60.00, B $30.00, C $30.00, D $25.00
//! - Rules: A is 3 for $150.00, B is 2 for $45.00
//!
//! Existing files are replaced.

use std::env;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use checkout_core::{PricingRuleRecord, RuleType};
use checkout_store::{ItemRecord, ItemsRepository, PricingRulesRepository, StoreConfig};

/// The acceptance catalog: (id, sku, unit price in cents).
const ITEMS: &[(i32, &str, i64)] = &[
    (1, "A", 6000),
    (2, "B", 3000),
    (3, "C", 3000),
    (4, "D", 2500),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = parse_args(StoreConfig::from_env());

    // Replace, don't append: a re-run must be deterministic
    for path in [&config.items_path, &config.rules_path] {
        if path.exists() {
            std::fs::remove_file(path).expect("failed to remove existing data file");
        }
    }

    seed_items(&config);
    seed_rules(&config);

    info!(
        items = %config.items_path.display(),
        rules = %config.rules_path.display(),
        "seed data written"
    );
}

/// Overrides config paths from `--items` / `--rules` flags.
fn parse_args(mut config: StoreConfig) -> StoreConfig {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--items" => {
                if let Some(path) = args.next() {
                    config.items_path = PathBuf::from(path);
                }
            }
            "--rules" => {
                if let Some(path) = args.next() {
                    config.rules_path = PathBuf::from(path);
                }
            }
            other => {
                eprintln!("unknown argument: {other}");
                eprintln!("usage: seed [--items PATH] [--rules PATH]");
                std::process::exit(2);
            }
        }
    }
    config
}

fn seed_items(config: &StoreConfig) {
    let repo = ItemsRepository::new(config);
    for &(id, sku, cents) in ITEMS {
        repo.add(ItemRecord {
            id,
            sku: sku.to_string(),
            unit_price: Decimal::new(cents, 2),
        })
        .expect("failed to write item record");
    }
    info!(count = ITEMS.len(), "item catalog seeded");
}

fn seed_rules(config: &StoreConfig) {
    let repo = PricingRulesRepository::new(config);
    let rules = [
        // A: 3 for $150
        PricingRuleRecord {
            id: 1,
            item_id: 1,
            rule_type: RuleType::MultiBuy,
            data: json!({
                "multipleUnitsPrice": "150.00",
                "numberOfUnitsForDiscount": 3,
            }),
        },
        // B: 2 for $45
        PricingRuleRecord {
            id: 2,
            item_id: 2,
            rule_type: RuleType::MultiBuy,
            data: json!({
                "multipleUnitsPrice": "45.00",
                "numberOfUnitsForDiscount": 2,
            }),
        },
    ];

    let count = rules.len();
    for rule in rules {
        repo.add(rule).expect("failed to write rule record");
    }
    info!(count, "pricing rules seeded");
}
