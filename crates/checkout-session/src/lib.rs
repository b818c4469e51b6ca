//! # checkout-session: Concurrent Session Management
//!
//! This crate owns every piece of shared mutable state in the checkout
//! system: the token → session registry, the TTL reaper, and the service
//! facade the surrounding HTTP layer calls.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Session Data Flow                           │
//! │                                                                         │
//! │  HTTP layer (external)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutService ── create_session / is_alive / scan / end_session      │
//! │       │                                                                 │
//! │       ├──► SessionRegistry (Mutex'd token → basket map)                 │
//! │       │         ▲                                                       │
//! │       │         │ snapshot + remove                                     │
//! │       │    Reaper task (tokio interval, clean shutdown)                 │
//! │       │                                                                 │
//! │       └──► ItemSource (external catalog) ──► Basket.scan ──► total      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`registry`] - Linearizable create/lookup/remove with touch-on-read
//! - [`reaper`] - Periodic TTL eviction with start/stop lifecycle
//! - [`service`] - The facade exposed to the service layer
//! - [`config`] - TTL and sweep timing
//! - [`error`] - Invariant-breach errors (absences are not errors)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use checkout_core::PricingEngine;
//! use checkout_session::{CheckoutService, Reaper, SessionConfig, SessionRegistry};
//!
//! let engine = Arc::new(PricingEngine::from_source(&rules_repo));
//! let registry = Arc::new(SessionRegistry::new(engine));
//! let reaper = Reaper::spawn(registry.clone(), SessionConfig::from_env());
//! let service = CheckoutService::new(registry, Arc::new(items_repo));
//!
//! let token = service.create_session()?;
//! let outcome = service.scan(token, "A");
//! // ... on shutdown:
//! reaper.shutdown().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod reaper;
pub mod registry;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use reaper::{sweep, Reaper, ReaperHandle};
pub use registry::{SessionHandle, SessionRegistry};
pub use service::{CheckoutService, ScanOutcome};
