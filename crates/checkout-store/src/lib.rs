//! # checkout-store: JSON File Repositories
//!
//! File-backed persistence for the two inputs the checkout core consumes:
//! the item catalog and the raw pricing-rule records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Store Data Flow                           │
//! │                                                                         │
//! │  items.json ──► ItemsRepository ──────► ItemSource (scan-by-sku)        │
//! │                                                                         │
//! │  pricing_rules.json ──► PricingRulesRepository ──► RuleSource           │
//! │                                                         │               │
//! │                                                         ▼  (startup)    │
//! │                                          compile_rules → PricingEngine  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`file`] - Generic JSON-array file store with serialized access
//! - [`items`] - Item catalog repository (`ItemSource` impl)
//! - [`rules`] - Rule record repository (`RuleSource` impl)
//! - [`config`] - File path configuration
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod file;
pub mod items;
pub mod rules;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use file::{JsonFileStore, Record};
pub use items::{ItemRecord, ItemsRepository};
pub use rules::PricingRulesRepository;
