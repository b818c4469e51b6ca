//! # Store Configuration
//!
//! File paths for the item catalog and pricing-rule records.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

/// Paths to the JSON record files.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// The item catalog file.
    pub items_path: PathBuf,

    /// The pricing-rule record file. Record order is rule priority.
    pub rules_path: PathBuf,
}

impl Default for StoreConfig {
    /// Defaults suitable for development, relative to the working dir.
    fn default() -> Self {
        StoreConfig {
            items_path: PathBuf::from("data/items.json"),
            rules_path: PathBuf::from("data/pricing_rules.json"),
        }
    }
}

impl StoreConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CHECKOUT_ITEMS_FILE`: Override the item catalog path
    /// - `CHECKOUT_RULES_FILE`: Override the rule record path
    pub fn from_env() -> Self {
        let mut config = StoreConfig::default();

        if let Ok(path) = std::env::var("CHECKOUT_ITEMS_FILE") {
            config.items_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("CHECKOUT_RULES_FILE") {
            config.rules_path = PathBuf::from(path);
        }

        config
    }
}
