//! Error types for rostore.
//!
//! All public APIs return `StoreResult<T>` — no panics in library code.
//! Validation errors are raised before any command reaches the backend.

use thiserror::Error;

/// Boxed cause carried by [`StoreError::Backend`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Query compilation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Target key resolved to an empty string
    #[error("query key is required")]
    MissingKey,

    /// Score bound that is not a number
    #[error("query bound {value:?} is not a valid score: {reason}")]
    InvalidBound { value: String, reason: String },
}

/// Unified error type for all store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `key_suffix()` returned an empty string
    #[error("invalid key: {type_name}.key_suffix() should be present")]
    InvalidKey { type_name: String },

    /// `score_map()` returned `None` instead of a (possibly empty) map
    #[error("{key}'s score_map() should be present")]
    MissingScoreMap { key: String },

    /// Empty index name inside a non-empty score map
    #[error("index name in {key}'s score_map() should be present")]
    InvalidIndexName { key: String },

    /// Score that cannot be represented as a finite 64-bit float
    #[error("{key}'s score_map()[{index}] should be a number, got {value:?}: {reason}")]
    InvalidScore {
        key: String,
        index: String,
        value: String,
        reason: String,
    },

    /// Stored field value does not match the record field type
    #[error("type mismatch at {key}.{field}: expected {expected}, got {actual:?}")]
    TypeMismatch {
        key: String,
        field: String,
        expected: String,
        actual: String,
    },

    /// Query cannot be translated into a backend command
    #[error("query compile error: {0}")]
    Compile(#[from] QueryError),

    /// Store configuration rejected
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Network, protocol or backend-side failure
    #[error("backend error: {context}: {source}")]
    Backend {
        context: String,
        #[source]
        source: BoxedCause,
    },

    /// Backend answered with a reply of the wrong shape
    #[error("unexpected reply to {command}: expected {expected}, got {actual}")]
    UnexpectedReply {
        command: String,
        expected: &'static str,
        actual: String,
    },
}

impl StoreError {
    /// Wraps a backend failure with the operation it interrupted.
    pub fn backend(context: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        StoreError::Backend {
            context: context.into(),
            source: source.into(),
        }
    }

    /// `true` for errors detected before any command was sent.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            StoreError::Backend { .. } | StoreError::UnexpectedReply { .. }
        )
    }
}

/// Result type alias for all store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// From 구현들
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::InvalidConfig(err.to_string())
    }
}
