//! Error types for the clinic store.

use petclinic_model::ValidationErrors;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// A saved entity refers to an identity the store does not hold.
    #[error("unknown {entity} {id}")]
    UnknownReference { entity: &'static str, id: i32 },

    /// A required association is unset or has never been saved.
    #[error("{entity} requires a saved {association}")]
    MissingReference {
        entity: &'static str,
        association: &'static str,
    },

    /// The entity cannot be deleted while others still refer to it.
    #[error("{entity} {id} is still in use")]
    InUse { entity: &'static str, id: i32 },

    /// Field validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A writer panicked while holding the table lock.
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<i32>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub(crate) fn unknown(entity: &'static str, id: impl Into<i32>) -> Self {
        Self::UnknownReference {
            entity,
            id: id.into(),
        }
    }

    pub(crate) fn missing(entity: &'static str, association: &'static str) -> Self {
        Self::MissingReference {
            entity,
            association,
        }
    }
}
