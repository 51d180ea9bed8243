use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockcast_core::ServiceError;

/// Every pipeline failure maps to the same envelope and status; the error
/// class is only visible in logs.
pub fn service_error_to_response(err: &ServiceError) -> axum::response::Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, err.message())
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}
