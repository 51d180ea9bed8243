//! Predictor boundary.

use crate::error::ServiceResult;
use crate::feature::FeatureVector;

/// A loaded demand model.
///
/// Implementations are read-only after construction and shared across
/// concurrent requests, so `predict` must be reentrant.
pub trait DemandPredictor: Send + Sync + 'static {
    /// Predict daily demand for exactly one feature row.
    ///
    /// Schema or type mismatches are reported as [`crate::ServiceError::Predictor`].
    fn predict(&self, features: &FeatureVector) -> ServiceResult<f64>;

    /// Human-readable model name (logged at startup).
    fn name(&self) -> &str;
}
