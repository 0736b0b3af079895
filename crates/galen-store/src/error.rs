//! # Store Error Types
//!
//! Error types for ledger store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                             │
//! │                                                                     │
//! │  std::io::Error / serde_json::Error (snapshot file)                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← adds entity/id context                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ApiError (in server) ← mapped to HTTP status + {"error": msg}      │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use galen_core::CoreError;
use thiserror::Error;

/// Ledger store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in its collection.
    ///
    /// ## When This Occurs
    /// - Update/delete by an id that does not exist
    /// - Stock receipt or sale line referencing a missing medicine
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    /// Unique constraint violation (e.g. duplicate username).
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: &'static str, value: String },

    /// Business rule violation bubbled up from galen-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Snapshot file could not be read or written.
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file exists but does not parse.
    ///
    /// Surfaced rather than silently reinitializing: starting over on a
    /// corrupt file would discard the whole ledger.
    #[error("Snapshot is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        StoreError::NotFound { entity, id }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field,
            value: value.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
