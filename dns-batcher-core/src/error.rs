//! Unified core error definitions.

use serde::Serialize;
use thiserror::Error;

use crate::types::BatchChangeErrorResponse;

// Re-export the per-change error taxonomy from the record library.
pub use dns_batcher_record::ChangeError;

/// Error type for the core layer.
///
/// Per-change problems accumulate inside [`CoreError::InvalidBatch`]; the
/// remaining variants are batch-level preconditions, lookup misses, and
/// terminal transport failures.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The batch contained no changes.
    #[error("Batch change must contain at least one change")]
    BatchChangeIsEmpty,

    /// The batch exceeded the configured change limit.
    #[error("Batch change exceeds the limit of {limit} changes")]
    BatchChangeIsTooLarge { limit: usize },

    /// One or more positions failed validation; the payload echoes every
    /// input with its accumulated errors so the submitter can correct and
    /// retry. Nothing was persisted.
    #[error("Batch change failed validation")]
    InvalidBatch(BatchChangeErrorResponse),

    /// No batch change with the requested id exists.
    #[error("Batch change {0} not found")]
    BatchChangeNotFound(String),

    /// The requester may not view the requested batch change.
    #[error("User is not authorized to view this batch change")]
    UserNotAuthorizedToView,

    /// A repository call failed at the transport level.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// A stored row could not be converted to or from its domain form.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The downstream converter rejected or failed to enqueue the batch.
    #[error("Conversion error: {0}")]
    ConversionError(String),

    /// Injected configuration is unusable (for example an invalid
    /// high-value-domain pattern).
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// Returns whether this error is expected (user input, missing resource,
    /// authorization) rather than an infrastructure fault.
    ///
    /// Use `warn` when this returns `true`, and `error` otherwise.
    /// Keep this method updated when adding new variants.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::BatchChangeIsEmpty
            | Self::BatchChangeIsTooLarge { .. }
            | Self::InvalidBatch(_)
            | Self::BatchChangeNotFound(_)
            | Self::UserNotAuthorizedToView => true,
            Self::StorageError(_)
            | Self::SerializationError(_)
            | Self::ConversionError(_)
            | Self::ValidationError(_) => false,
        }
    }
}

/// `Result` alias used by the core layer.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_batch_too_large() {
        let e = CoreError::BatchChangeIsTooLarge { limit: 1000 };
        assert_eq!(e.to_string(), "Batch change exceeds the limit of 1000 changes");
    }

    #[test]
    fn display_not_found() {
        let e = CoreError::BatchChangeNotFound("abc-123".to_string());
        assert_eq!(e.to_string(), "Batch change abc-123 not found");
    }

    #[test]
    fn expected_split() {
        assert!(CoreError::BatchChangeIsEmpty.is_expected());
        assert!(CoreError::UserNotAuthorizedToView.is_expected());
        assert!(!CoreError::StorageError("down".into()).is_expected());
        assert!(!CoreError::ConversionError("queue full".into()).is_expected());
    }

    #[test]
    fn serialize_carries_code_tag() {
        let e = CoreError::BatchChangeIsTooLarge { limit: 10 };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"BatchChangeIsTooLarge\""));
        assert!(json.contains("\"limit\":10"));
    }
}
