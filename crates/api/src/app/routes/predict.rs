use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{debug, info, info_span, warn};

use stockcast_core::{RequestId, ServiceResult};
use stockcast_forecast::{ForecastService, PredictionRequest, PredictionResult};

use crate::app::errors;

pub async fn predict(
    Extension(service): Extension<ForecastService>,
    body: Bytes,
) -> axum::response::Response {
    let request_id = RequestId::new();
    let span = info_span!("predict", %request_id);

    match span.in_scope(|| run(&service, &body)) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => errors::service_error_to_response(&e),
    }
}

fn run(service: &ForecastService, body: &[u8]) -> ServiceResult<PredictionResult> {
    let outcome = PredictionRequest::from_slice(body).and_then(|request| {
        debug!(fields = ?request.fields(), "incoming request");
        service.predict_request(request)
    });

    match &outcome {
        Ok(r) => info!(
            predicted_demand = r.predicted_demand,
            eoq = r.eoq,
            rol = r.rol,
            "prediction served"
        ),
        Err(e) => warn!(kind = e.kind(), error = %e, "prediction failed"),
    }
    outcome
}

pub async fn method_not_allowed() -> axum::response::Response {
    errors::json_error(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
