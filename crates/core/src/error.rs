//! Service error model.

use thiserror::Error;

/// Result type used across the forecasting pipeline.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Pipeline-level error.
///
/// The variant is an internal classification only (logging); callers outside
/// the service only ever see the message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request was incomplete or malformed.
    #[error("{0}")]
    Validation(String),

    /// The predictor rejected the feature vector or failed internally.
    #[error("{0}")]
    Predictor(String),

    /// Anything else (numeric domain failures, broken internal assumptions).
    #[error("{0}")]
    Unexpected(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn predictor(msg: impl Into<String>) -> Self {
        Self::Predictor(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Predictor(_) => "predictor",
            Self::Unexpected(_) => "unexpected",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m) | Self::Predictor(m) | Self::Unexpected(m) => m,
        }
    }
}
