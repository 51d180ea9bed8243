//! Request orchestration.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use stockcast_core::{DemandPredictor, ServiceError, ServiceResult};

use crate::inventory::{self, InventoryParams};
use crate::request::PredictionRequest;
use crate::{assemble, calendar, validate};

/// The response payload. Field order is the wire order.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    #[serde(rename = "PredictedDemand")]
    pub predicted_demand: f64,
    #[serde(rename = "EOQ")]
    pub eoq: f64,
    #[serde(rename = "ROL")]
    pub rol: f64,
}

/// Runs the full pipeline for one request against a shared predictor.
///
/// The predictor is injected once at startup and never mutated, so the
/// service is cheap to clone and safe to share between requests.
#[derive(Clone)]
pub struct ForecastService {
    predictor: Arc<dyn DemandPredictor>,
}

impl ForecastService {
    pub fn new(predictor: Arc<dyn DemandPredictor>) -> Self {
        Self { predictor }
    }

    pub fn predictor_name(&self) -> &str {
        self.predictor.name()
    }

    /// Parse, then run [`Self::predict_request`].
    pub fn predict_json(&self, body: JsonValue) -> ServiceResult<PredictionResult> {
        self.predict_request(PredictionRequest::from_value(body)?)
    }

    /// Date → calendar → validation → assembly → prediction → EOQ/ROL.
    ///
    /// Either all three outputs are produced or an error is returned.
    pub fn predict_request(&self, mut request: PredictionRequest) -> ServiceResult<PredictionResult> {
        let calendar = calendar::derive(request.target_date())?;
        request.inject_calendar(calendar);

        validate::validate(&request)?;
        let features = assemble::assemble(&request)?;

        let daily_demand = self.predictor.predict(&features)?;
        if !daily_demand.is_finite() {
            return Err(ServiceError::predictor("predictor returned a non-finite demand"));
        }
        debug!(daily_demand, ?calendar, "raw prediction");

        let params = InventoryParams::from_request(&request)?;
        let plan = inventory::compute(daily_demand, params)?;

        let predicted_demand = inventory::round2(daily_demand);
        if !predicted_demand.is_finite() {
            return Err(ServiceError::unexpected("rounded demand is not finite"));
        }

        Ok(PredictionResult {
            predicted_demand,
            eoq: plan.eoq,
            rol: plan.rol,
        })
    }
}

impl core::fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ForecastService")
            .field("predictor", &self.predictor.name())
            .finish()
    }
}
