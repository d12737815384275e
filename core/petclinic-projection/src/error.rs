//! Error types for the projector.

use thiserror::Error;

/// Result type for projection operations.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Who is at fault for a failed projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller-supplied text is unusable (I/O-class fault, 400-class).
    Input,
    /// Server-held data breaks an invariant (500-class).
    Invariant,
}

/// Errors that can occur while projecting.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A required association was not supplied when writing.
    #[error("cannot serialize {entity}: required association `{association}` is not set")]
    MissingRequiredAssociation {
        entity: &'static str,
        association: &'static str,
    },

    /// A held date has no `yyyy/MM/dd` form.
    #[error("cannot serialize {entity}.{field}: {date} is outside years 0000..=9999")]
    UnwritableDate {
        entity: &'static str,
        field: &'static str,
        date: chrono::NaiveDate,
    },

    /// A date field is not `yyyy/MM/dd`.
    #[error("invalid date at `{path}`: {value:?} does not match yyyy/MM/dd")]
    DateFormat { path: String, value: String },

    /// A node the schema requires is absent or has the wrong shape.
    #[error("malformed document at `{path}`: {reason}")]
    MalformedDocument { path: String, reason: String },

    /// The document exceeds the configured size cap.
    #[error("document too large: {size} bytes (limit {limit})")]
    DocumentTooLarge { size: usize, limit: usize },

    /// The text is not JSON, or a field has the wrong JSON type.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProjectionError {
    pub(crate) fn missing(entity: &'static str, association: &'static str) -> Self {
        Self::MissingRequiredAssociation {
            entity,
            association,
        }
    }

    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredAssociation { .. } | Self::UnwritableDate { .. } => {
                ErrorCategory::Invariant
            }
            Self::DateFormat { .. }
            | Self::MalformedDocument { .. }
            | Self::DocumentTooLarge { .. }
            | Self::Serialization(_) => ErrorCategory::Input,
        }
    }

    /// True when the caller's document caused the failure.
    pub fn is_client_fault(&self) -> bool {
        self.category() == ErrorCategory::Input
    }
}
