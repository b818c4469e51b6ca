//! # Rule Compiler
//!
//! Transforms raw pricing-rule records into the immutable `itemId → rule`
//! map consumed by the pricing engine. Runs once at startup (and on any
//! explicit reload), never per request.
//!
//! ## Compilation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rule Compilation                                   │
//! │                                                                         │
//! │  [record, record, record, ...]        (caller-supplied order)           │
//! │       │                                                                 │
//! │       ▼  per record                                                     │
//! │  dispatch on ruleType                                                   │
//! │       ├── multiBuy     ──► parse payload ──► PricingRule::MultiBuy      │
//! │       ├── unsupported  ──► skip (warn)                                  │
//! │       └── bad payload  ──► skip (warn)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FIRST REGISTERED WINS: the first record that yields a rule for an      │
//! │  itemId establishes the mapping; later records for the same itemId      │
//! │  are dropped, even valid ones.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One malformed record never prevents the engine from initializing with
//! all the good ones - skips are logged per record and compilation
//! continues.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::money::Money;
use crate::rules::{MultiBuyRule, PricingRule};

// =============================================================================
// Raw Record Shapes
// =============================================================================

/// Discriminator for raw rule records.
///
/// Unknown strings deserialize to `Unsupported` instead of failing the
/// whole file - forward compatibility with rule types this build does
/// not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleType {
    /// Buy k units for a flat price.
    MultiBuy,

    /// Anything this build cannot compile. Skipped, not an error.
    #[serde(other)]
    Unsupported,
}

/// A raw pricing-rule record as stored by the rule source.
///
/// `data` is an opaque payload whose shape depends on `rule_type`; the
/// compiler is the only consumer that interprets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRuleRecord {
    /// Record identity (unique within the rule source).
    pub id: i32,

    /// The item this rule targets.
    pub item_id: i32,

    /// Which rule variant the payload describes.
    pub rule_type: RuleType,

    /// Variant-specific payload.
    pub data: serde_json::Value,
}

/// Payload shape for [`RuleType::MultiBuy`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiBuyRuleData {
    /// Flat price for a full batch.
    pub multiple_units_price: Decimal,

    /// Batch size k.
    pub number_of_units_for_discount: u32,
}

// =============================================================================
// Rule Source Boundary
// =============================================================================

/// The external rule-source collaborator.
///
/// Record ordering is semantically meaningful: first-registered wins, so
/// implementations must return records in a stable, deterministic order.
pub trait RuleSource {
    /// Returns every raw rule record, in priority order.
    fn all_records(&self) -> Vec<PricingRuleRecord>;
}

// =============================================================================
// Compilation Errors
// =============================================================================

/// Why a single record failed to compile.
///
/// These are isolated per record: the compiler logs and skips, it never
/// aborts the whole compilation.
#[derive(Debug, Error)]
pub enum RuleCompileError {
    /// The record's type tag names a variant this build cannot compile.
    #[error("unsupported rule type")]
    UnsupportedType,

    /// The payload does not match the variant's expected shape.
    #[error("malformed rule data: {0}")]
    MalformedData(#[from] serde_json::Error),

    /// A MultiBuy batch size of zero would divide by zero when pricing.
    #[error("multi-buy batch size must be greater than zero")]
    ZeroBatchSize,
}

// =============================================================================
// Compiler
// =============================================================================

/// Compiles raw records into the immutable `itemId → rule` map.
///
/// - First registered wins per item id (insertion-order priority).
/// - Unsupported types and malformed payloads are skipped with a warning.
/// - Empty input yields an empty map, not an error.
pub fn compile_rules(records: &[PricingRuleRecord]) -> HashMap<i32, PricingRule> {
    let mut rules: HashMap<i32, PricingRule> = HashMap::new();

    for record in records {
        match compile_record(record) {
            Ok(rule) => {
                if rules.contains_key(&record.item_id) {
                    debug!(
                        record_id = record.id,
                        item_id = record.item_id,
                        "dropping rule record: item already has a rule (first registered wins)"
                    );
                    continue;
                }
                rules.insert(record.item_id, rule);
            }
            Err(e) => {
                warn!(
                    record_id = record.id,
                    item_id = record.item_id,
                    error = %e,
                    "skipping rule record"
                );
            }
        }
    }

    rules
}

/// Compiles one raw record into a rule variant.
fn compile_record(record: &PricingRuleRecord) -> Result<PricingRule, RuleCompileError> {
    match record.rule_type {
        RuleType::MultiBuy => {
            let data: MultiBuyRuleData = serde_json::from_value(record.data.clone())?;
            if data.number_of_units_for_discount == 0 {
                return Err(RuleCompileError::ZeroBatchSize);
            }
            Ok(PricingRule::MultiBuy(MultiBuyRule::new(
                Money::new(data.multiple_units_price),
                data.number_of_units_for_discount,
            )))
        }
        RuleType::Unsupported => Err(RuleCompileError::UnsupportedType),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
