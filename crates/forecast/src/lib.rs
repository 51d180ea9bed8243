//! `stockcast-forecast`: request validation, feature derivation and the
//! inventory formulas wrapped around the demand predictor.
//!
//! Pipeline (see [`ForecastService::predict`]):
//! 1. [`calendar`]: `Target Date` → Day / Month / Weekday
//! 2. [`validate`]: every required input is present, non-null and scalar
//! 3. [`assemble`]: typed [`stockcast_core::FeatureVector`] in schema order
//! 4. predictor (injected [`stockcast_core::DemandPredictor`])
//! 5. [`inventory`]: EOQ and ROL from the predicted daily demand

pub mod assemble;
pub mod calendar;
pub mod inventory;
pub mod request;
pub mod service;
pub mod validate;

pub use calendar::CalendarFeatures;
pub use inventory::{InventoryParams, InventoryPlan};
pub use request::PredictionRequest;
pub use service::{ForecastService, PredictionResult};
