//! # Checkout Service Facade
//!
//! The surface the surrounding HTTP layer consumes. Composes the session
//! registry with the external item-lookup collaborator; everything here
//! is a thin, synchronous orchestration over those two.
//!
//! ## Operation → Outcome Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_session()          → token                                      │
//! │  is_alive(token)           → bool          (lookup, keep-alive touch)   │
//! │  scan(token, sku)          → ScanOutcome                                │
//! │      dead session          → SessionNotFound  (nothing mutated)         │
//! │      unknown sku           → UnknownSku(total) (basket untouched)       │
//! │      success               → Scanned(total)                             │
//! │  end_session(token)        → Option<final total>                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Absences are outcomes, not errors: the HTTP layer maps them to
//! not-found responses. There are no retries anywhere in this core.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use checkout_core::{ItemSource, Money};

use crate::error::SessionResult;
use crate::registry::SessionRegistry;

// =============================================================================
// Scan Outcome
// =============================================================================

/// Result of scanning a sku into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The sku was scanned; the new running total.
    Scanned(Money),

    /// No item matches the sku; the basket is unchanged and this is its
    /// current total (querying total is still valid after a failed scan).
    UnknownSku(Money),

    /// The token names no live session; nothing was mutated.
    SessionNotFound,
}

impl ScanOutcome {
    /// True only for a successful scan.
    pub fn is_scanned(&self) -> bool {
        matches!(self, ScanOutcome::Scanned(_))
    }
}

// =============================================================================
// Checkout Service
// =============================================================================

/// Facade over the registry and the item-lookup collaborator.
pub struct CheckoutService {
    registry: Arc<SessionRegistry>,
    items: Arc<dyn ItemSource>,
}

impl CheckoutService {
    /// Wires the facade to its collaborators.
    pub fn new(registry: Arc<SessionRegistry>, items: Arc<dyn ItemSource>) -> Self {
        CheckoutService { registry, items }
    }

    /// The registry this facade fronts (shared with the reaper).
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Starts a checkout session and returns its token.
    pub fn create_session(&self) -> SessionResult<Uuid> {
        self.registry.create()
    }

    /// Keep-alive probe: true if the token names a live session.
    ///
    /// A successful probe counts as activity and resets the TTL clock.
    pub fn is_alive(&self, token: Uuid) -> bool {
        self.registry.lookup(token).is_some()
    }

    /// Scans a sku into the session named by `token`.
    pub fn scan(&self, token: Uuid, sku: &str) -> ScanOutcome {
        let Some(session) = self.registry.lookup(token) else {
            debug!(%token, sku, "scan against dead session");
            return ScanOutcome::SessionNotFound;
        };

        let Some(item) = self.items.get_by_sku(sku) else {
            debug!(%token, sku, "scan for unknown sku");
            return ScanOutcome::UnknownSku(session.with_basket(|b| b.total()));
        };

        let total = session.with_basket_mut(|basket| {
            basket.scan(item);
            basket.total()
        });
        ScanOutcome::Scanned(total)
    }

    /// Ends the session, returning its final total.
    ///
    /// `None` if the token names no live session (already ended, reaped,
    /// or never created).
    pub fn end_session(&self, token: Uuid) -> Option<Money> {
        self.registry
            .remove(token)
            .map(|session| session.with_basket(|b| b.total()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
