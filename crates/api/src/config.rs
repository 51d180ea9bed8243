//! Runtime configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const BIND_ENV: &str = "STOCKCAST_BIND";
pub const MODEL_ENV: &str = "STOCKCAST_MODEL";
pub const CORS_ENV: &str = "STOCKCAST_CORS";

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_MODEL_PATH: &str = "models/demand_forecast_model.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address '{value}'")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var}: expected true/false, got '{value}'")]
    InvalidBool { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    /// Fixed path of the model artifact, read once at startup.
    pub model_path: PathBuf,
    /// Allow cross-origin requests from any domain.
    pub cors_permissive: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            cors_permissive: true,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map here).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw.trim().parse().map_err(|_| ConfigError::InvalidAddr {
            var: BIND_ENV,
            value: bind_raw.clone(),
        })?;

        let model_path = match lookup(MODEL_ENV) {
            Some(p) if !p.trim().is_empty() => PathBuf::from(p.trim()),
            _ => {
                tracing::info!("{MODEL_ENV} not set; using {DEFAULT_MODEL_PATH}");
                PathBuf::from(DEFAULT_MODEL_PATH)
            }
        };

        let cors_permissive = match lookup(CORS_ENV) {
            None => true,
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidBool {
                var: CORS_ENV,
                value: v.clone(),
            })?,
        };
        if cors_permissive {
            tracing::warn!("CORS is open to all origins; set {CORS_ENV}=false to disable");
        }

        Ok(Self {
            bind_addr,
            model_path,
            cors_permissive,
        })
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
