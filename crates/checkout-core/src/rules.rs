//! # Pricing Rule Variants
//!
//! The closed set of discount algorithms an item can carry.
//!
//! ## Strategy-by-Sum-Type
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rule Dispatch                                      │
//! │                                                                         │
//! │  PricingEngine.price(item, qty)                                         │
//! │       │                                                                 │
//! │       ├── item has a rule ──► PricingRule::price(item, qty)             │
//! │       │                            │                                    │
//! │       │                            └── MultiBuy ─► batches × flat price │
//! │       │                                            + remainder × unit   │
//! │       │                                                                 │
//! │       └── no rule ──► unit_price × qty (linear fallback)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is a pure function of `(item, quantity)` with no side
//! effects and no shared mutable state. New promotions are added as new
//! enum variants, not runtime-registered factories.

use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::money::Money;

// =============================================================================
// Pricing Rule
// =============================================================================

/// One concrete discount algorithm bound to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PricingRule {
    /// Buy k units for a flat price; remainder at unit price.
    MultiBuy(MultiBuyRule),
}

impl PricingRule {
    /// Prices `quantity` units of `item` under this rule.
    ///
    /// Returns an unrounded amount; presentation rounding belongs to the
    /// basket total.
    pub fn price(&self, item: &Item, quantity: i64) -> Money {
        match self {
            PricingRule::MultiBuy(rule) => rule.price(item, quantity),
        }
    }
}

// =============================================================================
// MultiBuy
// =============================================================================

/// The "buy k for a flat price" promotion.
///
/// ## Example
/// Item A costs $60, rule is "3 for $150":
/// - 3 × A → $150
/// - 4 × A → $150 + $60 = $210
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiBuyRule {
    /// Flat price for a full batch of units.
    pub multiple_units_price: Money,

    /// Batch size k. Always > 0 - the rule compiler rejects 0.
    pub units_for_discount: u32,
}

impl MultiBuyRule {
    /// Creates a new MultiBuy rule.
    pub fn new(multiple_units_price: Money, units_for_discount: u32) -> Self {
        MultiBuyRule {
            multiple_units_price,
            units_for_discount,
        }
    }

    /// Prices `quantity` units: full batches at the flat price, the
    /// remainder at the item's unit price.
    ///
    /// ## Edge Case
    /// Zero or negative quantities price to zero - there is no negative
    /// or zero-quantity pricing.
    pub fn price(&self, item: &Item, quantity: i64) -> Money {
        if quantity <= 0 {
            return Money::zero();
        }

        let batch_size = i64::from(self.units_for_discount);
        let full_batches = quantity / batch_size;
        let remainder = quantity % batch_size;

        self.multiple_units_price.multiply_quantity(full_batches)
            + item.unit_price.multiply_quantity(remainder)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item_a() -> Item {
        // Acceptance catalog: A costs $60, 3 for $150
        Item::new(1, "A", Money::from_major_minor(60, 0))
    }

    fn three_for_150() -> MultiBuyRule {
        MultiBuyRule::new(Money::from_major_minor(150, 0), 3)
    }

    #[test]
    fn test_full_batch_prices_at_flat_price() {
        let rule = three_for_150();
        assert_eq!(rule.price(&item_a(), 3), Money::from_major_minor(150, 0));
    }

    #[test]
    fn test_remainder_prices_at_unit_price() {
        let rule = three_for_150();
        assert_eq!(rule.price(&item_a(), 4), Money::from_major_minor(210, 0));
        assert_eq!(rule.price(&item_a(), 2), Money::from_major_minor(120, 0));
    }

    #[test]
    fn test_multiple_full_batches() {
        let rule = three_for_150();
        assert_eq!(rule.price(&item_a(), 7), Money::from_major_minor(510, 0));
    }

    #[test]
    fn test_zero_and_negative_quantities_price_to_zero() {
        let rule = three_for_150();
        assert_eq!(rule.price(&item_a(), 0), Money::zero());
        assert_eq!(rule.price(&item_a(), -5), Money::zero());
    }

    #[test]
    fn test_enum_dispatch() {
        let rule = PricingRule::MultiBuy(three_for_150());
        assert_eq!(rule.price(&item_a(), 3), Money::from_major_minor(150, 0));
    }
}
