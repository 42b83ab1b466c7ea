//! Error types for tour construction and search.

use thiserror::Error;

use crate::models::CityId;

/// Result type alias for u-tsp operations.
pub type TspResult<T> = Result<T, TspError>;

/// Errors raised by the matrix builder, the constructor, and the searches.
///
/// None of these are retryable: every operation works on in-memory state, so
/// once inputs validate the algorithms can only fail through a logic defect
/// (reported as [`TspError::InvariantViolation`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TspError {
    /// Fewer than two cities; no tour can be formed.
    #[error("insufficient input: at least 2 cities required, found {found}")]
    InsufficientInput {
        /// Number of cities supplied.
        found: usize,
    },

    /// A city id exceeds the supported bound.
    #[error("city id {id} out of range (maximum {max})")]
    IdentifierOutOfRange {
        /// Offending id.
        id: CityId,
        /// Largest accepted id.
        max: CityId,
    },

    /// The same city id was supplied twice.
    #[error("duplicate city id {id}")]
    DuplicateIdentifier {
        /// Repeated id.
        id: CityId,
    },

    /// An internal consistency check failed.
    #[error("invariant violation: {message}")]
    InvariantViolation {
        /// What was violated.
        message: String,
    },

    /// A search configuration is invalid.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the invalid parameter.
        message: String,
    },
}

impl TspError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        TspError::InvariantViolation {
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        TspError::Config {
            message: message.into(),
        }
    }
}
