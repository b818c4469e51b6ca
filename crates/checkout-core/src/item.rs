//! # Item Types
//!
//! The immutable catalog item consumed by the pricing engine, and the
//! lookup boundary the surrounding layer supplies.
//!
//! ## Identity Rule
//! Two items with the same `id` are the SAME item, regardless of sku or
//! unit price. `PartialEq`/`Hash` are implemented over `id` alone so an
//! item can key a basket line even if a later catalog edit changed its
//! price after it was scanned.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A catalog item available for scanning.
///
/// Created by the item repository; never mutated by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier - the item's identity.
    pub id: i32,

    /// Stock Keeping Unit - the business identifier scanned at the till.
    pub sku: String,

    /// Price for a single unit. May carry sub-cent precision.
    pub unit_price: Money,
}

impl Item {
    /// Creates a new item.
    pub fn new(id: i32, sku: impl Into<String>, unit_price: Money) -> Self {
        Item {
            id,
            sku: sku.into(),
            unit_price,
        }
    }
}

/// Identity is `id` alone (see module docs).
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

/// Hash must agree with `PartialEq`: `id` only.
impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// =============================================================================
// Item Lookup Boundary
// =============================================================================

/// The external item-lookup collaborator.
///
/// Scanning by sku resolves the sku through this boundary; an unknown sku
/// is an expected, recoverable absence - `None`, never an error.
pub trait ItemSource: Send + Sync {
    /// Resolves a sku to an item, or `None` if no item matches.
    fn get_by_sku(&self, sku: &str) -> Option<Item>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_equality_is_by_id_only() {
        let a = Item::new(1, "SKU-A", Money::from_cents(6000));
        let b = Item::new(1, "SKU-RENAMED", Money::from_cents(9999));
        let c = Item::new(2, "SKU-A", Money::from_cents(6000));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        let mut map: HashMap<Item, u32> = HashMap::new();
        map.insert(Item::new(1, "SKU-A", Money::from_cents(6000)), 1);

        // Same id with different fields hits the same entry
        let renamed = Item::new(1, "SKU-B", Money::from_cents(1));

        assert_eq!(map.get(&renamed), Some(&1));
    }
}
