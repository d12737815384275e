//! Error types for the HTTP API and their status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use petclinic_projection::ProjectionError;
use petclinic_store::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// The request is well-formed but asks for something contradictory.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// Rejects a body identity that disagrees with the path.
    pub(crate) fn check_path_id(path_id: i32, body_id: Option<i32>) -> ApiResult<()> {
        match body_id {
            Some(body_id) if body_id != path_id => Err(Self::BadRequest(format!(
                "body id {body_id} does not match path id {path_id}"
            ))),
            _ => Ok(()),
        }
    }

    /// Rejects a create request whose body already carries an identity.
    pub(crate) fn check_new(entity: &str, body_id: Option<i32>) -> ApiResult<()> {
        match body_id {
            Some(id) => Err(Self::BadRequest(format!(
                "a new {entity} must not carry an id (got {id})"
            ))),
            None => Ok(()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::InUse { .. }) => StatusCode::CONFLICT,
            Self::Store(StoreError::LockPoisoned) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(_) => StatusCode::BAD_REQUEST,
            Self::Projection(e) if e.is_client_fault() => StatusCode::BAD_REQUEST,
            Self::Projection(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        } else {
            debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        match self {
            Self::Store(StoreError::NotFound { entity, id }) => {
                (status, Json(json!({ "message": format!("{entity} {id} not found.") })))
                    .into_response()
            }
            Self::Store(StoreError::Validation(errors)) => (status, Json(errors)).into_response(),
            other => (status, Json(json!({ "message": other.to_string() }))).into_response(),
        }
    }
}
