//! On-disk model format.
//!
//! ```json
//! {
//!   "name": "demand-gbrt",
//!   "base_score": 120.0,
//!   "features": ["Store ID", "...", "Weekday"],
//!   "categories": { "Region": { "North": 0, "South": 1 } },
//!   "trees": [
//!     { "nodes": [
//!       { "split": { "feature": 5, "threshold": 100.0, "yes": 1, "no": 2, "missing": 1 } },
//!       { "leaf": { "value": -12.5 } },
//!       { "leaf": { "value": 18.0 } }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Rows go to `yes` when `value < threshold`, to `no` otherwise and to
//! `missing` when the value has no encoding (unknown category).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub base_score: f64,
    /// Column order the trees were trained on (must match the service schema).
    pub features: Vec<String>,
    /// Category → code tables, keyed by feature name.
    #[serde(default)]
    pub categories: BTreeMap<String, BTreeMap<String, f64>>,
    pub trees: Vec<TreeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSpec {
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        missing: usize,
    },
    Leaf {
        value: f64,
    },
}

fn default_name() -> String {
    "demand-model".to_string()
}
