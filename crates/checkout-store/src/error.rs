//! # Store Error Types
//!
//! Error types for file repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds record identity context                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Collaborator impls (ItemSource/RuleSource) log and degrade to          │
//! │  "absent"/"no records" - a broken file must never panic a scan          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// File repository errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read or written.
    #[error("file access failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file content is not a valid JSON record list.
    #[error("malformed record file: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A record with this identity already exists.
    #[error("record {id} already exists")]
    Duplicate { id: i32 },

    /// No record with this identity exists.
    #[error("record {id} not found")]
    NotFound { id: i32 },
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
