//! `stockcast-model`
//!
//! **Responsibility:** the concrete demand predictor.
//!
//! The model is a gradient-boosted regression tree ensemble exported to a JSON
//! artifact. It is loaded once at startup and is read-only afterwards:
//! - It must not depend on HTTP or request parsing.
//! - It consumes a validated [`stockcast_core::FeatureVector`], never raw JSON.

pub mod artifact;
pub mod ensemble;
pub mod error;

pub use artifact::{ModelArtifact, NodeSpec, TreeSpec};
pub use ensemble::TreeEnsemble;
pub use error::ModelError;
