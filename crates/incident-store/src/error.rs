//! Error types for the incident store.
//!
//! All fallible store operations return [`StoreError`] via [`StoreResult`].

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed or out-of-policy input. Surfaced to the caller
    /// synchronously, never retried internally.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A content key is claimed in the dedup index but no matching record
    /// exists in the primary map. Indicates a logic defect in the store.
    #[error("dedup index out of sync: key `{key}` has no matching record")]
    IndexOutOfSync { key: String },
}
