//! # Basket
//!
//! Per-session accumulation of scanned items and the running total.
//!
//! ## Invariants
//! - Lines are unique by item identity; quantities are positive
//! - `total` always equals the engine-computed sum over the current
//!   quantities, rounded to 2 fraction digits half-away-from-zero,
//!   after every mutation - never stale
//!
//! ## Why Recompute the Whole Total on Every Scan?
//! Recomputing from scratch guarantees the total is always exactly the
//! sum of fresh per-item rule evaluations, so a rule's batch boundaries
//! can never desynchronize from a running delta. Cost is O(distinct
//! items) per scan, which is negligible for human shopping carts.

use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::PricingEngine;
use crate::item::Item;
use crate::money::Money;

/// The accumulating collection of scanned items for one session.
///
/// Owned exclusively by one checkout session; the registry hands it out
/// behind a per-session lock, and the surrounding layer is responsible
/// for not issuing two concurrent scans against the same session.
#[derive(Debug)]
pub struct Basket {
    /// Shared, read-only pricing engine wired in at session creation.
    engine: Arc<PricingEngine>,

    /// Scanned items keyed by identity, with quantities.
    lines: HashMap<Item, u32>,

    /// Last computed, rounded total.
    total: Money,
}

impl Basket {
    /// Creates an empty basket bound to the shared pricing engine.
    pub fn new(engine: Arc<PricingEngine>) -> Self {
        Basket {
            engine,
            lines: HashMap::new(),
            total: Money::zero(),
        }
    }

    /// Scans one unit of `item` and recomputes the total.
    ///
    /// Increments the line for `item` (keyed by identity), creating it at
    /// quantity 1 if absent. Always succeeds given a valid item.
    pub fn scan(&mut self, item: Item) {
        *self.lines.entry(item).or_insert(0) += 1;
        self.recompute_total();
    }

    /// Returns the last computed total. Reading never recomputes.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Quantity currently held for an item id (0 if never scanned).
    pub fn quantity_of(&self, item_id: i32) -> u32 {
        self.lines
            .iter()
            .find(|(item, _)| item.id == item_id)
            .map(|(_, qty)| *qty)
            .unwrap_or(0)
    }

    /// Number of distinct items scanned.
    pub fn distinct_items(&self) -> usize {
        self.lines.len()
    }

    /// True if nothing has been scanned.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sums fresh per-item rule evaluations and rounds once.
    fn recompute_total(&mut self) {
        let mut sum = Money::zero();
        for (item, quantity) in &self.lines {
            sum += self.engine.price(item, i64::from(*quantity));
        }
        self.total = sum.round_to_cents();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile_rules;
    use crate::rules::{MultiBuyRule, PricingRule};
    use rust_decimal_macros::dec;

    fn item_a() -> Item {
        Item::new(1, "A", Money::from_major_minor(60, 0))
    }

    fn item_b() -> Item {
        Item::new(2, "B", Money::from_major_minor(30, 0))
    }

    fn item_d() -> Item {
        Item::new(4, "D", Money::from_major_minor(25, 0))
    }

    /// Acceptance rules: A is 3 for $150, B is 2 for $45.
    fn acceptance_engine() -> Arc<PricingEngine> {
        let mut rules = HashMap::new();
        rules.insert(
            1,
            PricingRule::MultiBuy(MultiBuyRule::new(Money::from_major_minor(150, 0), 3)),
        );
        rules.insert(
            2,
            PricingRule::MultiBuy(MultiBuyRule::new(Money::from_major_minor(45, 0), 2)),
        );
        Arc::new(PricingEngine::new(rules))
    }

    fn scan_all(basket: &mut Basket, items: &[Item]) {
        for item in items {
            basket.scan(item.clone());
        }
    }

    #[test]
    fn test_empty_basket_totals_zero() {
        let basket = Basket::new(acceptance_engine());
        assert!(basket.is_empty());
        assert_eq!(basket.total(), Money::zero());
    }

    #[test]
    fn test_acceptance_scenarios() {
        let engine = acceptance_engine();
        let cases: &[(&[Item], i64)] = &[
            (&[item_a()], 60),
            (&[item_a(), item_a(), item_a()], 150),
            (&[item_a(), item_a(), item_a(), item_a()], 210),
            (&[item_a(), item_a(), item_a(), item_b(), item_b()], 195),
            (
                &[item_d(), item_a(), item_b(), item_a(), item_b(), item_a()],
                220,
            ),
        ];

        for (items, expected) in cases {
            let mut basket = Basket::new(engine.clone());
            scan_all(&mut basket, items);
            assert_eq!(
                basket.total(),
                Money::from_major_minor(*expected, 0),
                "scanning {:?}",
                items.iter().map(|i| i.sku.as_str()).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_scanning_same_item_accumulates_one_line() {
        let mut basket = Basket::new(acceptance_engine());
        scan_all(&mut basket, &[item_a(), item_a()]);

        assert_eq!(basket.distinct_items(), 1);
        assert_eq!(basket.quantity_of(1), 2);
    }

    #[test]
    fn test_total_is_idempotent_between_scans() {
        let mut basket = Basket::new(acceptance_engine());
        basket.scan(item_a());

        let first = basket.total();
        assert_eq!(basket.total(), first);
        assert_eq!(basket.total(), first);
    }

    #[test]
    fn test_total_rounds_half_away_from_zero() {
        // Two rule-less items with sub-cent prices: 2.9999 + 2.8888 = 5.8887
        let engine = Arc::new(PricingEngine::new(HashMap::new()));
        let mut basket = Basket::new(engine);

        basket.scan(Item::new(7, "X", Money::new(dec!(2.9999))));
        basket.scan(Item::new(8, "Y", Money::new(dec!(2.8888))));

        assert_eq!(basket.total(), Money::from_cents(589));
    }

    #[test]
    fn test_total_stays_fresh_across_batch_boundaries() {
        // Crossing a MultiBuy batch boundary must reprice the whole line,
        // not apply a running delta: 2×A = 120, 3×A = 150
        let mut basket = Basket::new(acceptance_engine());
        scan_all(&mut basket, &[item_a(), item_a()]);
        assert_eq!(basket.total(), Money::from_major_minor(120, 0));

        basket.scan(item_a());
        assert_eq!(basket.total(), Money::from_major_minor(150, 0));
    }

    #[test]
    fn test_engine_built_from_records_prices_basket() {
        use crate::compile::PricingRuleRecord;
        use serde_json::json;

        let records: Vec<PricingRuleRecord> = serde_json::from_value(json!([
            {
                "id": 1,
                "itemId": 1,
                "ruleType": "multiBuy",
                "data": { "multipleUnitsPrice": "150", "numberOfUnitsForDiscount": 3 }
            }
        ]))
        .unwrap();

        let engine = Arc::new(PricingEngine::new(compile_rules(&records)));
        let mut basket = Basket::new(engine);
        scan_all(&mut basket, &[item_a(), item_a(), item_a()]);
        assert_eq!(basket.total(), Money::from_major_minor(150, 0));
    }
}
