//! Request bodies handed to the projector.

use crate::AppState;
use crate::error::ApiError;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_LENGTH;
use petclinic_projection::ProjectionError;

/// A request body read as text.
///
/// The router caps bodies at the projector's document limit; a body over it
/// is reported as [`ProjectionError::DocumentTooLarge`] rather than axum's
/// bare 413.
#[derive(Debug)]
pub(crate) struct Document(pub String);

impl FromRequest<AppState> for Document {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let limit = state.projector.config().max_document_bytes;
        let declared = req
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<usize>().ok());

        match String::from_request(req, state).await {
            Ok(text) => Ok(Self(text)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(ApiError::Projection(ProjectionError::DocumentTooLarge {
                    size: declared.unwrap_or_else(|| limit.saturating_add(1)),
                    limit,
                }))
            }
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}
