//! On-disk forest format and its evaluator.
//!
//! # Format
//!
//! ```json
//! {
//!   "format": "evcharge-forest",
//!   "version": 1,
//!   "features": ["hour", "day_of_week", "is_weekend", "month"],
//!   "metadata": { "model": "Random Forest", "dataset": "UrbanEV Dataset" },
//!   "trees": [
//!     { "nodes": [
//!       { "feature": 0, "threshold": 6.5, "left": 1, "right": 2 },
//!       { "value": 3.1 },
//!       { "value": 9.8 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Nodes are stored flat per tree with the root at index 0. A split sends a
//! sample left when `x[feature] <= threshold`, matching how scikit-learn
//! exports its trees. The forest output is the mean of all tree outputs.
//!
//! Children must sit at a strictly larger index than their parent; that makes
//! every walk terminate without a visited set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::{FEATURE_NAMES, FeatureVector};
use crate::model::DemandModel;

/// Value of the `format` tag.
pub const FOREST_FORMAT: &str = "evcharge-forest";

/// Highest artifact version this build understands.
pub const FOREST_VERSION: u32 = 1;

/// Serialized forest, exactly as read from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestArtifact {
    pub format: String,
    pub version: u32,
    pub features: Vec<String>,
    #[serde(default)]
    pub metadata: ForestMetadata,
    pub trees: Vec<TreeSpec>,
}

/// Descriptive fields carried alongside the trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestMetadata {
    pub model: Option<String>,
    pub dataset: Option<String>,
    pub description: Option<String>,
}

impl ForestMetadata {
    /// Footer line, e.g. `Random Forest | UrbanEV Dataset | Real EV Charging Demand`.
    #[must_use]
    pub fn caption(&self) -> String {
        [
            self.model.as_deref().unwrap_or("Random Forest"),
            self.dataset.as_deref().unwrap_or("UrbanEV Dataset"),
            self.description
                .as_deref()
                .unwrap_or("Real EV Charging Demand"),
        ]
        .join(" | ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Why an artifact was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArtifactError {
    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("unrecognized format tag {0:?}")]
    Format(String),

    #[error("unsupported version {0} (max {max})", max = FOREST_VERSION)]
    UnsupportedVersion(u32),

    #[error("feature schema differs from the encoder")]
    SchemaMismatch { found: Vec<String> },

    #[error("tree {tree}: {detail}")]
    Structure { tree: usize, detail: String },

    #[error("forest has no trees")]
    Empty,
}

impl ForestArtifact {
    pub fn from_json_str(s: &str) -> Result<Self, ArtifactError> {
        serde_json::from_str(s).map_err(|e| ArtifactError::Json(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check the envelope, the schema, and every tree, then build the
    /// evaluator.
    pub fn validate(self) -> Result<RandomForest, ArtifactError> {
        if self.format != FOREST_FORMAT {
            return Err(ArtifactError::Format(self.format));
        }
        if self.version == 0 || self.version > FOREST_VERSION {
            return Err(ArtifactError::UnsupportedVersion(self.version));
        }
        if !self.features.iter().map(String::as_str).eq(FEATURE_NAMES) {
            return Err(ArtifactError::SchemaMismatch {
                found: self.features,
            });
        }
        if self.trees.is_empty() {
            return Err(ArtifactError::Empty);
        }

        let trees = self
            .trees
            .into_iter()
            .enumerate()
            .map(|(idx, tree)| compile_tree(idx, tree))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RandomForest {
            trees,
            metadata: self.metadata,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

fn compile_tree(tree: usize, spec: TreeSpec) -> Result<Vec<Node>, ArtifactError> {
    let structure = |detail: String| ArtifactError::Structure { tree, detail };

    if spec.nodes.is_empty() {
        return Err(structure("no nodes".to_string()));
    }
    let len = spec.nodes.len();

    spec.nodes
        .into_iter()
        .enumerate()
        .map(|(idx, node)| match node {
            NodeSpec::Leaf { value } if value.is_finite() => Ok(Node::Leaf(value)),
            NodeSpec::Leaf { value } => Err(structure(format!(
                "node {idx}: leaf value {value} is not finite"
            ))),
            NodeSpec::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if feature >= FeatureVector::LEN {
                    return Err(structure(format!(
                        "node {idx}: feature {feature} out of range"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(structure(format!(
                        "node {idx}: threshold {threshold} is not finite"
                    )));
                }
                for child in [left, right] {
                    if child >= len || child <= idx {
                        return Err(structure(format!(
                            "node {idx}: child {child} must be in {}..{len}",
                            idx + 1
                        )));
                    }
                }
                Ok(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                })
            }
        })
        .collect()
}

/// Validated, immutable forest regressor.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<Vec<Node>>,
    metadata: ForestMetadata,
}

impl RandomForest {
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn metadata(&self) -> &ForestMetadata {
        &self.metadata
    }

    fn eval_tree(nodes: &[Node], x: &[f64; FeatureVector::LEN]) -> f64 {
        let mut idx = 0;
        loop {
            match nodes[idx] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

impl DemandModel for RandomForest {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let x = features.as_array();
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| Self::eval_tree(tree, &x))
            .sum();
        total / self.trees.len() as f64
    }

    fn describe(&self) -> String {
        self.metadata.caption()
    }
}
