//! # Items Repository
//!
//! File-backed catalog of scannable items, and the [`ItemSource`]
//! implementation the scan path resolves skus through.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use checkout_core::{Item, ItemSource, Money};

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::file::{JsonFileStore, Record};

// =============================================================================
// Item Record
// =============================================================================

/// An item as stored in `items.json`.
///
/// Kept separate from [`checkout_core::Item`]: the record is the file
/// shape, the core item is the domain value (with identity semantics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: i32,
    pub sku: String,
    pub unit_price: Decimal,
}

impl Record for ItemRecord {
    fn record_id(&self) -> i32 {
        self.id
    }
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Item::new(record.id, record.sku, Money::new(record.unit_price))
    }
}

// =============================================================================
// Items Repository
// =============================================================================

/// Repository over the item catalog file.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ItemsRepository::new(&StoreConfig::from_env());
/// let item = repo.get_by_sku("A")?;
/// ```
#[derive(Debug)]
pub struct ItemsRepository {
    store: JsonFileStore<ItemRecord>,
}

impl ItemsRepository {
    /// Creates a repository over the configured catalog path.
    pub fn new(config: &StoreConfig) -> Self {
        ItemsRepository {
            store: JsonFileStore::new(&config.items_path),
        }
    }

    /// Adds a new item record; fails on a duplicate id.
    pub fn add(&self, record: ItemRecord) -> StoreResult<()> {
        self.store.add(record)
    }

    /// Updates an existing item record.
    pub fn update(&self, record: ItemRecord) -> StoreResult<()> {
        self.store.update(record)
    }

    /// Deletes an item record by id.
    pub fn delete(&self, id: i32) -> StoreResult<()> {
        self.store.delete(id)
    }

    /// Returns every catalog item.
    pub fn get_all(&self) -> StoreResult<Vec<Item>> {
        Ok(self.store.load()?.into_iter().map(Item::from).collect())
    }

    /// Looks up an item by id.
    pub fn get_by_id(&self, id: i32) -> StoreResult<Option<Item>> {
        Ok(self
            .store
            .load()?
            .into_iter()
            .find(|record| record.id == id)
            .map(Item::from))
    }

    /// Looks up an item by sku.
    pub fn get_by_sku(&self, sku: &str) -> StoreResult<Option<Item>> {
        Ok(self
            .store
            .load()?
            .into_iter()
            .find(|record| record.sku == sku)
            .map(Item::from))
    }
}

/// The scan path's view of the catalog.
///
/// A broken catalog file degrades to "sku absent" (logged) - it must
/// never take down a scan.
impl ItemSource for ItemsRepository {
    fn get_by_sku(&self, sku: &str) -> Option<Item> {
        match ItemsRepository::get_by_sku(self, sku) {
            Ok(item) => item,
            Err(e) => {
                warn!(sku, error = %e, "item lookup failed, treating sku as absent");
                None
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
