//! `stockcast-core`: shared building blocks for the demand forecasting service.
//!
//! This crate contains **pure** primitives (no I/O, no transport concerns):
//! the error taxonomy, the fixed feature schema consumed by the predictor and
//! the predictor boundary itself.

pub mod error;
pub mod feature;
pub mod id;
pub mod predictor;

pub use error::{ServiceError, ServiceResult};
pub use feature::{FeatureName, FeatureValue, FeatureVector};
pub use id::RequestId;
pub use predictor::DemandPredictor;
