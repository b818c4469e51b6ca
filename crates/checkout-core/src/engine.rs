//! # Pricing Engine
//!
//! Owns the immutable `itemId → rule` map and prices N units of an item
//! using the item's rule, or linear pricing when no rule is mapped.
//!
//! Built once per process lifetime (or on explicit reload) and shared
//! read-only by every session - no locking needed.

use std::collections::HashMap;

use crate::compile::{compile_rules, PricingRuleRecord, RuleSource};
use crate::item::Item;
use crate::money::Money;
use crate::rules::PricingRule;

/// Prices items under their compiled rules.
///
/// ## Usage
/// ```rust
/// use checkout_core::engine::PricingEngine;
/// use checkout_core::item::Item;
/// use checkout_core::money::Money;
///
/// let engine = PricingEngine::from_records(&[]);
/// let item = Item::new(1, "A", Money::from_cents(6000));
///
/// // No rule mapped: linear pricing
/// assert_eq!(engine.price(&item, 2), Money::from_cents(12000));
/// ```
#[derive(Debug, Default)]
pub struct PricingEngine {
    rules: HashMap<i32, PricingRule>,
}

impl PricingEngine {
    /// Wraps an already-compiled rule map.
    pub fn new(rules: HashMap<i32, PricingRule>) -> Self {
        PricingEngine { rules }
    }

    /// Compiles raw records and builds an engine over the result.
    pub fn from_records(records: &[PricingRuleRecord]) -> Self {
        PricingEngine::new(compile_rules(records))
    }

    /// Builds an engine from the external rule source.
    pub fn from_source(source: &dyn RuleSource) -> Self {
        PricingEngine::from_records(&source.all_records())
    }

    /// Prices `quantity` units of `item`.
    ///
    /// Delegates to the item's mapped rule if one exists, else falls back
    /// to `unit_price × quantity`. The engine does not enforce quantity
    /// positivity - rule variants own their own edge cases, and the
    /// linear fallback is well-defined for any integer.
    pub fn price(&self, item: &Item, quantity: i64) -> Money {
        match self.rules.get(&item.id) {
            Some(rule) => rule.price(item, quantity),
            None => item.unit_price.multiply_quantity(quantity),
        }
    }

    /// Number of items that have a rule mapped.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::MultiBuyRule;

    fn engine_with_rule(item_id: i32, rule: MultiBuyRule) -> PricingEngine {
        let mut rules = HashMap::new();
        rules.insert(item_id, PricingRule::MultiBuy(rule));
        PricingEngine::new(rules)
    }

    #[test]
    fn test_no_rule_prices_linearly() {
        let engine = PricingEngine::default();
        let item = Item::new(4, "D", Money::from_major_minor(25, 0));

        assert_eq!(engine.price(&item, 1), Money::from_major_minor(25, 0));
        assert_eq!(engine.price(&item, 3), Money::from_major_minor(75, 0));
        assert_eq!(engine.price(&item, 0), Money::zero());
    }

    #[test]
    fn test_mapped_rule_is_delegated_to() {
        let engine = engine_with_rule(1, MultiBuyRule::new(Money::from_major_minor(150, 0), 3));
        let item = Item::new(1, "A", Money::from_major_minor(60, 0));

        assert_eq!(engine.price(&item, 3), Money::from_major_minor(150, 0));
        assert_eq!(engine.price(&item, 4), Money::from_major_minor(210, 0));
    }

    #[test]
    fn test_rule_lookup_is_by_item_id() {
        let engine = engine_with_rule(1, MultiBuyRule::new(Money::from_major_minor(150, 0), 3));

        // Different id: the rule must not apply
        let other = Item::new(2, "A", Money::from_major_minor(60, 0));
        assert_eq!(engine.price(&other, 3), Money::from_major_minor(180, 0));
    }

    #[test]
    fn test_rule_count() {
        let engine = engine_with_rule(1, MultiBuyRule::new(Money::from_major_minor(150, 0), 3));
        assert_eq!(engine.rule_count(), 1);
        assert_eq!(PricingEngine::default().rule_count(), 0);
    }
}
