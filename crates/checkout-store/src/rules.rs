//! # Pricing Rules Repository
//!
//! File-backed store of raw pricing-rule records, and the [`RuleSource`]
//! implementation the rule compiler reads at startup.
//!
//! ## Ordering Matters
//! The compiler applies "first registered wins" per item id, so the
//! record order in `pricing_rules.json` is semantically meaningful. The
//! underlying file store preserves it.

use tracing::warn;

use checkout_core::{PricingRuleRecord, RuleSource};

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::file::{JsonFileStore, Record};

impl Record for PricingRuleRecord {
    fn record_id(&self) -> i32 {
        self.id
    }
}

/// Repository over the pricing-rule record file.
#[derive(Debug)]
pub struct PricingRulesRepository {
    store: JsonFileStore<PricingRuleRecord>,
}

impl PricingRulesRepository {
    /// Creates a repository over the configured rules path.
    pub fn new(config: &StoreConfig) -> Self {
        PricingRulesRepository {
            store: JsonFileStore::new(&config.rules_path),
        }
    }

    /// Adds a new rule record; fails on a duplicate record id.
    pub fn add(&self, record: PricingRuleRecord) -> StoreResult<()> {
        self.store.add(record)
    }

    /// Updates an existing rule record in place (priority preserved).
    pub fn update(&self, record: PricingRuleRecord) -> StoreResult<()> {
        self.store.update(record)
    }

    /// Deletes a rule record by record id.
    pub fn delete(&self, id: i32) -> StoreResult<()> {
        self.store.delete(id)
    }

    /// Returns every rule record, in file (priority) order.
    pub fn get_all(&self) -> StoreResult<Vec<PricingRuleRecord>> {
        self.store.load()
    }

    /// Looks up one rule record by record id.
    pub fn get_by_id(&self, id: i32) -> StoreResult<Option<PricingRuleRecord>> {
        Ok(self.store.load()?.into_iter().find(|record| record.id == id))
    }
}

/// The compiler's view of the rule file.
///
/// A broken rules file degrades to "no records" (logged): the engine
/// then initializes with linear pricing only.
impl RuleSource for PricingRulesRepository {
    fn all_records(&self) -> Vec<PricingRuleRecord> {
        match self.get_all() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "rule source unreadable, compiling an empty rule set");
                Vec::new()
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
