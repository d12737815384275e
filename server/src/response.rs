use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// A body that is already serialized JSON text.
pub(crate) struct JsonText(pub String);

impl IntoResponse for JsonText {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/json")], self.0).into_response()
    }
}

/// 201 with a `Location` header pointing at the new resource.
pub(crate) fn created(location: String, body: impl IntoResponse) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], body).into_response()
}
