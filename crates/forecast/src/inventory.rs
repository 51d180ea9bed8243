//! Economic Order Quantity and Reorder Level.
//!
//! - annual demand `D = d * 365`
//! - `EOQ = sqrt(2 * D * K / H)`
//! - `ROL = d * L`
//!
//! with daily demand `d`, ordering cost `K`, holding cost per unit `H` and lead
//! time in days `L`. Both outputs are rounded to 2 decimal places.

use serde_json::Value as JsonValue;

use stockcast_core::{ServiceError, ServiceResult};

use crate::request::PredictionRequest;

pub const ORDERING_COST_FIELD: &str = "Ordering Cost";
pub const HOLDING_COST_FIELD: &str = "Holding Cost";
pub const LEAD_TIME_FIELD: &str = "Lead Time";

pub const DEFAULT_ORDERING_COST: f64 = 50.0;
pub const DEFAULT_HOLDING_COST: f64 = 2.0;
pub const DEFAULT_LEAD_TIME_DAYS: f64 = 7.0;

const DAYS_PER_YEAR: f64 = 365.0;

/// Cost and timing inputs to the inventory formulas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InventoryParams {
    pub ordering_cost: f64,
    pub holding_cost: f64,
    pub lead_time_days: f64,
}

impl Default for InventoryParams {
    fn default() -> Self {
        Self {
            ordering_cost: DEFAULT_ORDERING_COST,
            holding_cost: DEFAULT_HOLDING_COST,
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
        }
    }
}

impl InventoryParams {
    /// Read the optional overrides, falling back to the defaults.
    pub fn from_request(request: &PredictionRequest) -> ServiceResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            ordering_cost: optional_number(request, ORDERING_COST_FIELD, defaults.ordering_cost)?,
            holding_cost: optional_number(request, HOLDING_COST_FIELD, defaults.holding_cost)?,
            lead_time_days: optional_number(request, LEAD_TIME_FIELD, defaults.lead_time_days)?,
        })
    }
}

/// Rounded inventory plan.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InventoryPlan {
    pub eoq: f64,
    pub rol: f64,
}

/// Compute EOQ and ROL for a predicted daily demand.
pub fn compute(daily_demand: f64, params: InventoryParams) -> ServiceResult<InventoryPlan> {
    if !(params.holding_cost.is_finite() && params.holding_cost > 0.0) {
        return Err(ServiceError::validation("Holding Cost must be positive"));
    }

    let annual_demand = daily_demand * DAYS_PER_YEAR;
    let radicand = (2.0 * annual_demand * params.ordering_cost) / params.holding_cost;
    if radicand < 0.0 {
        return Err(ServiceError::validation(
            "EOQ is undefined for negative annual demand or ordering cost",
        ));
    }

    // `+ 0.0` turns a `-0.0` radicand's root into `0.0`.
    let eoq = round2(radicand.sqrt() + 0.0);
    let rol = round2(daily_demand * params.lead_time_days);
    if !(eoq.is_finite() && rol.is_finite()) {
        return Err(ServiceError::unexpected(format!(
            "inventory formula produced a non-finite result (EOQ={eoq}, ROL={rol})"
        )));
    }

    Ok(InventoryPlan { eoq, rol })
}

/// Magnitude from which `f64` carries no fractional cents worth rounding.
const ROUNDING_LIMIT: f64 = 1e15;

/// Round half away from zero to 2 decimal places.
///
/// Ties go up in magnitude (`round2(0.125) == 0.13`), unlike banker's
/// rounding. Values at or beyond `1e15` are returned unchanged so that
/// scaling by 100 cannot overflow to infinity.
pub fn round2(x: f64) -> f64 {
    if !x.is_finite() || x.abs() >= ROUNDING_LIMIT {
        return x;
    }
    (x * 100.0).round() / 100.0
}

fn optional_number(request: &PredictionRequest, field: &str, default: f64) -> ServiceResult<f64> {
    let not_a_number = || ServiceError::validation(format!("'{field}' must be a number"));
    let value = match request.get(field) {
        None => return Ok(default),
        Some(JsonValue::Number(n)) => n.as_f64().ok_or_else(not_a_number)?,
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().map_err(|_| not_a_number())?,
        Some(_) => return Err(not_a_number()),
    };
    if !value.is_finite() {
        return Err(not_a_number());
    }
    Ok(value)
}
