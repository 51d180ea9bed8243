use axum::{routing::post, Router};

pub mod predict;

/// Router for the prediction endpoint.
pub fn router() -> Router {
    Router::new().route(
        "/predict",
        post(predict::predict).fallback(predict::method_not_allowed),
    )
}
