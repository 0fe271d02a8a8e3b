//! Error types for store operations
//!
//! Every error except `InvalidIndexSpec` is raised by an operation that left
//! the store untouched. `InvalidIndexSpec` is raised at construction and
//! prevents the store from being created at all.

use thiserror::Error;

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by the indexed store
///
/// Primary keys are rendered with `Debug` when the error is built so that
/// the error type stays independent of the record type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Insert with a primary key that is already present
    #[error("duplicate primary key: {key}")]
    DuplicateKey {
        /// The offending key
        key: String,
    },

    /// Remove or update referencing an absent primary key
    #[error("primary key not found: {key}")]
    NotFound {
        /// The missing key
        key: String,
    },

    /// Update whose mutator changed the primary key
    #[error("primary key {key} is immutable (mutator produced {attempted})")]
    ImmutableKey {
        /// Key the record is stored under
        key: String,
        /// Key the mutated record reported
        attempted: String,
    },

    /// Secondary index declaration rejected at construction
    #[error("invalid index spec '{name}': {reason}")]
    InvalidIndexSpec {
        /// Declared index name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Lookup against an index that was never declared
    #[error("unknown index: {name}")]
    UnknownIndex {
        /// Requested index name
        name: String,
    },

    /// Invariant check found primary and secondary structures out of sync
    #[error("index inconsistency: {reason}")]
    Inconsistent {
        /// Description of the violated invariant
        reason: String,
    },
}

impl StoreError {
    /// Build a `DuplicateKey` error from any debuggable key
    pub fn duplicate_key(key: &impl std::fmt::Debug) -> Self {
        StoreError::DuplicateKey {
            key: format!("{:?}", key),
        }
    }

    /// Build a `NotFound` error from any debuggable key
    pub fn not_found(key: &impl std::fmt::Debug) -> Self {
        StoreError::NotFound {
            key: format!("{:?}", key),
        }
    }

    /// Build an `InvalidIndexSpec` error
    pub fn invalid_spec(name: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::InvalidIndexSpec {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Build an `Inconsistent` error
    pub fn inconsistent(reason: impl Into<String>) -> Self {
        StoreError::Inconsistent {
            reason: reason.into(),
        }
    }

    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// True for `DuplicateKey`
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }
}
