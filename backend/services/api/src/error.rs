use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use wellbeing_common::error::WellbeingError;

pub struct ApiError(pub WellbeingError);

impl From<WellbeingError> for ApiError {
    fn from(err: WellbeingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            WellbeingError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            WellbeingError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "request failed");
        }

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
