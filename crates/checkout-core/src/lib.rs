//! # checkout-core: Pure Business Logic for Checkout Sessions
//!
//! This crate is the **heart** of the checkout system. It contains all
//! pricing and basket logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout System Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                External HTTP Layer (not in this repo)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              checkout-session (registry, reaper, facade)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   money   │  │   rules   │  │  compile  │  │  basket   │   │   │
//! │  │   │   Money   │  │ MultiBuy  │  │ first-win │  │  Basket   │   │   │
//! │  │   │ rounding  │  │ dispatch  │  │ priority  │  │  totals   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED MUTABLE STATE • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            checkout-store (JSON item and rule files)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Exact decimal money with away-from-zero cent rounding
//! - [`item`] - Catalog item (identity by id) and the lookup boundary
//! - [`rules`] - Pricing rule variants (MultiBuy)
//! - [`compile`] - Raw records → immutable rule map, first registered wins
//! - [`engine`] - Rule dispatch with linear fallback
//! - [`basket`] - Per-session scan accumulation and running total
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: pricing is deterministic - same input, same output
//! 2. **No I/O**: file, network, and clock access are FORBIDDEN here
//! 3. **Exact Decimals**: money is `rust_decimal`, rounded once per total
//! 4. **Skip, Don't Die**: a bad rule record is logged and dropped, never fatal

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod compile;
pub mod engine;
pub mod item;
pub mod money;
pub mod rules;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use checkout_core::Money` instead of
// `use checkout_core::money::Money`

pub use basket::Basket;
pub use compile::{
    compile_rules, MultiBuyRuleData, PricingRuleRecord, RuleCompileError, RuleSource, RuleType,
};
pub use engine::PricingEngine;
pub use item::{Item, ItemSource};
pub use money::Money;
pub use rules::{MultiBuyRule, PricingRule};
