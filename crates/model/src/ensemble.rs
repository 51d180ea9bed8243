use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use stockcast_core::{DemandPredictor, FeatureName, FeatureVector, ServiceError, ServiceResult};

use crate::artifact::{ModelArtifact, NodeSpec};
use crate::error::ModelError;

const FEATURE_COUNT: usize = FeatureName::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        missing: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone, PartialEq)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn eval(&self, row: &[Option<f64>; FEATURE_COUNT]) -> f64 {
        // Children always point forward (checked at load), so this terminates.
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    idx = match row[feature] {
                        Some(v) if v < threshold => yes,
                        Some(_) => no,
                        None => missing,
                    };
                }
            }
        }
    }
}

/// Gradient-boosted regression trees: `base_score + Σ leaf(tree)`.
///
/// Immutable once loaded; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsemble {
    name: String,
    base_score: f64,
    categories: HashMap<FeatureName, HashMap<String, f64>>,
    trees: Vec<Tree>,
}

impl TreeEnsemble {
    /// Load and validate a JSON artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json_str(&raw)?;
        info!(
            model = %model.name,
            trees = model.trees.len(),
            path = %path.display(),
            "loaded demand model"
        );
        Ok(model)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_str(raw)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        check_schema(&artifact.features)?;
        if !artifact.base_score.is_finite() {
            return Err(ModelError::invalid("base_score must be finite"));
        }

        let mut categories = HashMap::new();
        for (column, table) in artifact.categories {
            let feature = FeatureName::ALL
                .into_iter()
                .find(|f| f.as_str() == column)
                .ok_or_else(|| ModelError::invalid(format!("category table for unknown feature '{column}'")))?;
            if !feature.is_categorical() {
                return Err(ModelError::invalid(format!(
                    "feature '{column}' is numeric but has a category table"
                )));
            }
            if let Some((key, _)) = table.iter().find(|(_, code)| !code.is_finite()) {
                return Err(ModelError::invalid(format!(
                    "category '{key}' of '{column}' has a non-finite code"
                )));
            }
            categories.insert(feature, table.into_iter().collect());
        }

        if artifact.trees.is_empty() {
            return Err(ModelError::invalid("model has no trees"));
        }
        let trees = artifact
            .trees
            .into_iter()
            .enumerate()
            .map(|(t, spec)| build_tree(t, spec.nodes))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: artifact.name,
            base_score: artifact.base_score,
            categories,
            trees,
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Encode one row. `None` marks a value routed down the `missing` branch.
    fn encode(&self, features: &FeatureVector) -> ServiceResult<[Option<f64>; FEATURE_COUNT]> {
        let mut row = [None; FEATURE_COUNT];
        for (name, value) in features.iter() {
            row[name.index()] = if name.is_categorical() {
                self.categories
                    .get(&name)
                    .and_then(|table| table.get(&*value.category_key()))
                    .copied()
            } else {
                match value.as_number() {
                    Some(n) if n.is_finite() => Some(n),
                    _ => {
                        return Err(ServiceError::predictor(format!(
                            "could not convert '{}' value to a number",
                            name
                        )));
                    }
                }
            };
        }
        Ok(row)
    }
}

impl DemandPredictor for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> ServiceResult<f64> {
        let row = self.encode(features)?;
        let prediction = self.base_score + self.trees.iter().map(|t| t.eval(&row)).sum::<f64>();
        if !prediction.is_finite() {
            return Err(ServiceError::predictor("model produced a non-finite prediction"));
        }
        Ok(prediction)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn check_schema(columns: &[String]) -> Result<(), ModelError> {
    let expected: Vec<&str> = FeatureName::ALL.iter().map(|f| f.as_str()).collect();
    let actual: Vec<&str> = columns.iter().map(String::as_str).collect();
    if actual != expected {
        return Err(ModelError::invalid(format!(
            "feature columns {actual:?} do not match expected {expected:?}"
        )));
    }
    Ok(())
}

fn build_tree(t: usize, specs: Vec<NodeSpec>) -> Result<Tree, ModelError> {
    if specs.is_empty() {
        return Err(ModelError::invalid(format!("tree {t} has no nodes")));
    }
    let len = specs.len();
    let mut nodes = Vec::with_capacity(len);

    for (i, spec) in specs.into_iter().enumerate() {
        let node = match spec {
            NodeSpec::Leaf { value } => {
                if !value.is_finite() {
                    return Err(ModelError::invalid(format!("tree {t} node {i}: non-finite leaf")));
                }
                Node::Leaf(value)
            }
            NodeSpec::Split {
                feature,
                threshold,
                yes,
                no,
                missing,
            } => {
                if feature >= FEATURE_COUNT {
                    return Err(ModelError::invalid(format!(
                        "tree {t} node {i}: feature index {feature} out of range"
                    )));
                }
                if threshold.is_nan() {
                    return Err(ModelError::invalid(format!("tree {t} node {i}: NaN threshold")));
                }
                for child in [yes, no, missing] {
                    if child <= i || child >= len {
                        return Err(ModelError::invalid(format!(
                            "tree {t} node {i}: child {child} must point to a later node"
                        )));
                    }
                }
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                }
            }
        };
        nodes.push(node);
    }

    Ok(Tree { nodes })
}
