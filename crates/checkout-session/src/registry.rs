//! # Session Registry
//!
//! Thread-safe creation, lookup, and removal of checkout sessions.
//!
//! ## Concurrency Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SessionRegistry                                    │
//! │                                                                         │
//! │  Request threads                       Reaper task                      │
//! │  ───────────────                       ───────────                      │
//! │  create()  ──┐                   ┌──  snapshot()                        │
//! │  lookup()  ──┼──► Mutex<HashMap> ─┼──  remove(token)                    │
//! │  remove()  ──┘    token → entry   └──                                   │
//! │                                                                         │
//! │  ONE registry-wide mutex makes every operation atomic: no lost          │
//! │  touch updates, no two removes winning the same token, no lookup        │
//! │  observing a half-removed entry. Critical sections are a map probe      │
//! │  plus a timestamp write, so contention stays negligible for the         │
//! │  session counts a single checkout process serves.                       │
//! │                                                                         │
//! │  The basket itself lives behind a per-session Arc<Mutex<Basket>>        │
//! │  handed out by lookup(); scans never hold the registry lock.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Keep-Alive Contract
//! `lookup` refreshes `last_accessed` as a side effect: any successful
//! read-through counts as activity and resets the TTL clock. `snapshot`
//! (used only by the reaper) deliberately does not.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use checkout_core::{Basket, PricingEngine};

use crate::error::{SessionError, SessionResult};

// =============================================================================
// Session Entry
// =============================================================================

/// Registry-internal record for one live session.
#[derive(Debug)]
struct SessionEntry {
    /// The session's basket, shared with handed-out handles.
    basket: Arc<Mutex<Basket>>,

    /// Refreshed by every successful lookup; read by the reaper.
    last_accessed: DateTime<Utc>,
}

// =============================================================================
// Session Handle
// =============================================================================

/// A live session obtained from the registry.
///
/// Holds a clone of the basket `Arc`, so the basket stays usable for the
/// caller that obtained it even if the reaper detaches the session
/// concurrently (the registry's linearizability decides who observed it).
#[derive(Debug, Clone)]
pub struct SessionHandle {
    token: Uuid,
    basket: Arc<Mutex<Basket>>,
}

impl SessionHandle {
    /// The session's token.
    pub fn token(&self) -> Uuid {
        self.token
    }

    /// Executes a function with read access to the basket.
    pub fn with_basket<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Basket) -> R,
    {
        let basket = self.basket.lock().expect("basket mutex poisoned");
        f(&basket)
    }

    /// Executes a function with write access to the basket.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = handle.with_basket_mut(|b| {
    ///     b.scan(item);
    ///     b.total()
    /// });
    /// ```
    pub fn with_basket_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Basket) -> R,
    {
        let mut basket = self.basket.lock().expect("basket mutex poisoned");
        f(&mut basket)
    }
}

// =============================================================================
// Session Registry
// =============================================================================

/// The token → session map, safe under concurrent request threads and
/// the background reaper.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,

    /// Shared read-only pricing engine every new basket is wired to.
    engine: Arc<PricingEngine>,
}

impl SessionRegistry {
    /// Creates an empty registry around the shared pricing engine.
    pub fn new(engine: Arc<PricingEngine>) -> Self {
        SessionRegistry {
            sessions: Mutex::new(HashMap::new()),
            engine,
        }
    }

    /// Creates a new session and returns its token.
    ///
    /// Generates a fresh random token, binds an empty basket to the
    /// shared engine, and inserts atomically with `last_accessed = now`.
    ///
    /// ## Errors
    /// `SessionError::TokenCollision` if the random token is already
    /// live - a fatal invariant breach that cannot occur with working
    /// v4 UUID generation.
    pub fn create(&self) -> SessionResult<Uuid> {
        let token = Uuid::new_v4();
        let entry = SessionEntry {
            basket: Arc::new(Mutex::new(Basket::new(self.engine.clone()))),
            last_accessed: Utc::now(),
        };

        let mut sessions = self.sessions.lock().expect("session registry mutex poisoned");
        match sessions.entry(token) {
            Entry::Occupied(_) => Err(SessionError::TokenCollision(token)),
            Entry::Vacant(slot) => {
                slot.insert(entry);
                info!(%token, live = sessions.len(), "session created");
                Ok(token)
            }
        }
    }

    /// Looks up a session, refreshing its TTL clock.
    ///
    /// Returns `None` (not an error) for unknown tokens. On a hit,
    /// `last_accessed` is updated under the same lock - the touch and
    /// the read are one atomic step, kept monotonically non-decreasing.
    pub fn lookup(&self, token: Uuid) -> Option<SessionHandle> {
        let mut sessions = self.sessions.lock().expect("session registry mutex poisoned");
        sessions.get_mut(&token).map(|entry| {
            entry.last_accessed = entry.last_accessed.max(Utc::now());
            SessionHandle {
                token,
                basket: entry.basket.clone(),
            }
        })
    }

    /// Atomically detaches and returns a session.
    ///
    /// Idempotent: only the first removal of a token observes the
    /// session; every later call (and any concurrent loser) gets `None`.
    pub fn remove(&self, token: Uuid) -> Option<SessionHandle> {
        let mut sessions = self.sessions.lock().expect("session registry mutex poisoned");
        let removed = sessions.remove(&token).map(|entry| SessionHandle {
            token,
            basket: entry.basket,
        });
        if removed.is_some() {
            debug!(%token, live = sessions.len(), "session removed");
        }
        removed
    }

    /// A point-in-time view of `(token, last_accessed)` for the reaper.
    ///
    /// Does not refresh any TTL clock. The snapshot is consistent (taken
    /// under the lock) but immediately stale: the reaper re-checks
    /// nothing, it simply removes, and the registry's atomicity decides
    /// races with concurrent lookups.
    pub fn snapshot(&self) -> Vec<(Uuid, DateTime<Utc>)> {
        let sessions = self.sessions.lock().expect("session registry mutex poisoned");
        sessions
            .iter()
            .map(|(token, entry)| (*token, entry.last_accessed))
            .collect()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .expect("session registry mutex poisoned")
            .len()
    }

    /// True if no sessions are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{Item, Money};
    use std::thread;

    fn registry() -> Arc<SessionRegistry> {
        Arc::new(SessionRegistry::new(Arc::new(PricingEngine::default())))
    }

    #[test]
    fn test_create_then_lookup() {
        let registry = registry();
        let token = registry.create().unwrap();

        let handle = registry.lookup(token).expect("session must be live");
        assert_eq!(handle.token(), token);
        assert!(handle.with_basket(|b| b.is_empty()));
    }

    #[test]
    fn test_lookup_unknown_token_is_absent() {
        let registry = registry();
        assert!(registry.lookup(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = registry();
        let token = registry.create().unwrap();

        assert!(registry.remove(token).is_some());
        assert!(registry.remove(token).is_none());
        assert!(registry.remove(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_lookup_after_remove_is_absent() {
        let registry = registry();
        let token = registry.create().unwrap();

        registry.remove(token);
        assert!(registry.lookup(token).is_none());
    }

    #[test]
    fn test_lookup_refreshes_last_accessed() {
        let registry = registry();
        let token = registry.create().unwrap();

        let before = registry.snapshot()[0].1;
        thread::sleep(std::time::Duration::from_millis(5));
        registry.lookup(token);
        let after = registry.snapshot()[0].1;

        assert!(after > before, "lookup must touch last_accessed");
    }

    #[test]
    fn test_snapshot_does_not_touch() {
        let registry = registry();
        registry.create().unwrap();

        let first = registry.snapshot()[0].1;
        thread::sleep(std::time::Duration::from_millis(5));
        let second = registry.snapshot()[0].1;

        assert_eq!(first, second, "snapshot must not count as activity");
    }

    #[test]
    fn test_tokens_are_unique_across_sessions() {
        let registry = registry();
        let a = registry.create().unwrap();
        let b = registry.create().unwrap();

        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_basket_survives_for_holder_after_remove() {
        let registry = registry();
        let token = registry.create().unwrap();

        let handle = registry.lookup(token).unwrap();
        handle.with_basket_mut(|b| b.scan(Item::new(1, "A", Money::from_cents(6000))));

        let removed = registry.remove(token).unwrap();
        assert_eq!(removed.with_basket(|b| b.total()), Money::from_cents(6000));
    }

    #[test]
    fn test_concurrent_removes_have_exactly_one_winner() {
        let registry = registry();
        let token = registry.create().unwrap();

        let winners: usize = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let registry = &registry;
                    scope.spawn(move || registry.remove(token).is_some() as usize)
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(winners, 1, "exactly one remove may observe the session");
    }

    #[test]
    fn test_concurrent_create_lookup_remove_stays_consistent() {
        let registry = registry();

        thread::scope(|scope| {
            for _ in 0..4 {
                let registry = &registry;
                scope.spawn(move || {
                    for _ in 0..50 {
                        let token = registry.create().unwrap();
                        assert!(registry.lookup(token).is_some());
                        assert!(registry.remove(token).is_some());
                    }
                });
            }
        });

        assert!(registry.is_empty());
    }
}
