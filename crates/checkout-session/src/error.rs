//! # Session Error Types
//!
//! Expected absences (unknown token, unknown sku) are NOT errors in this
//! crate - they are `Option`/outcome values the surrounding HTTP layer
//! maps to not-found responses. The only error here is an internal
//! invariant breach.

use thiserror::Error;
use uuid::Uuid;

/// Session registry errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A freshly generated token collided with a live session.
    ///
    /// ## When This Occurs
    /// Never, in practice: tokens are random 128-bit UUIDs, so a
    /// collision means the token generator is broken. Treated as a
    /// fatal internal invariant breach, not a retryable condition.
    #[error("session token collision: {0}")]
    TokenCollision(Uuid),
}

/// Convenience type alias for Results with SessionError.
pub type SessionResult<T> = Result<T, SessionError>;
