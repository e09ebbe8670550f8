//! Store Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use uuid::Uuid;

/// A store error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The storage layer rejected an insert, link or query. Whatever
    /// transaction it happened in must be abandoned.
    #[display("database error")]
    Database,
    #[display("database migration error")]
    Migration,
    /// The caller passed something that can never succeed; do not retry.
    #[display("invalid argument: {_0}")]
    InvalidArgument(#[error(not(source))] String),
    /// A stored row could not be turned back into a model.
    #[display("invalid stored data: {_0}")]
    InvalidData(#[error(not(source))] &'static str),
    #[display("revision not found: {_0}")]
    RevisionNotFound(#[error(not(source))] i64),
    /// Following entity redirects led back to an entity already visited.
    #[display("redirect cycle through entity {_0}")]
    RedirectCycle(#[error(not(source))] Uuid),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
