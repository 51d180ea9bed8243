//! HTTP API application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: consistent error responses

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use stockcast_forecast::ForecastService;

use crate::config::ServiceConfig;

pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(service: ForecastService, config: &ServiceConfig) -> Router {
    tracing::info!(model = service.predictor_name(), "building router");

    let router = routes::router()
        .layer(Extension(service))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    if config.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
