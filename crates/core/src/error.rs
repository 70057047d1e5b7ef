//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only hard failures live here. Expected operator-facing outcomes while
/// scanning (unknown GTIN, unreadable expiry) are carried inside result
/// structures instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required input was missing, empty or malformed.
    #[error("{0}")]
    InvalidArgument(String),

    /// An outbound line item references a batch that expired before posting.
    #[error("Row #{row}: The batch {batch} has already expired.")]
    ExpiredBatch { row: usize, batch: String },

    /// A serial number on a line item is stocked under a different batch.
    #[error("Row #{row}: Serial No {serial_no} does not belong to Batch {batch}")]
    SerialBatchMismatch {
        row: usize,
        serial_no: String,
        batch: String,
    },

    /// A requested record was not found.
    #[error("not found")]
    NotFound,

    /// A conflicting write was detected.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Record storage could not serve the request.
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn expired_batch(row: usize, batch: impl Into<String>) -> Self {
        Self::ExpiredBatch {
            row,
            batch: batch.into(),
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Host-facing exception class name for this error.
    pub fn exc_type(&self) -> &'static str {
        match self {
            DomainError::ExpiredBatch { .. } => "BatchExpiredError",
            DomainError::NotFound => "DoesNotExistError",
            DomainError::Conflict(_) => "DuplicateEntryError",
            DomainError::Storage(_) => "StorageError",
            DomainError::InvalidArgument(_) | DomainError::SerialBatchMismatch { .. } => {
                "ValidationError"
            }
        }
    }
}
