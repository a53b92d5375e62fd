use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::YieldModel;
use crate::error::{EngineError, EngineResult};
use crate::features::FeatureVector;

/// One node of a regression tree. Splits send `x[feature] <= threshold`
/// to `left`; children always sit at higher indices than their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn eval(&self, x: &[f64]) -> f64 {
        let mut i = 0;
        loop {
            match self.nodes[i] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    i = if x[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

/// Random-forest regressor: the mean of its trees' outputs.
///
/// Only constructible through [`RandomForest::new`]; deserialization runs
/// the same structural checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ForestJson")]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<Tree>,
}

#[derive(Deserialize)]
struct ForestJson {
    n_features: usize,
    trees: Vec<Tree>,
}

impl TryFrom<ForestJson> for RandomForest {
    type Error = anyhow::Error;

    fn try_from(raw: ForestJson) -> Result<Self> {
        Self::new(raw.n_features, raw.trees)
    }
}

impl RandomForest {
    /// Checks the structure once so `eval` can index without bounds failures.
    pub fn new(n_features: usize, trees: Vec<Tree>) -> Result<Self> {
        if trees.is_empty() {
            bail!("forest has no trees");
        }
        for (t, tree) in trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                bail!("tree {t} has no nodes");
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                match *node {
                    Node::Leaf { value } => {
                        if !value.is_finite() {
                            bail!("tree {t} node {i}: leaf value {value} is not finite");
                        }
                    }
                    Node::Split {
                        feature,
                        left,
                        right,
                        ..
                    } => {
                        if feature >= n_features {
                            bail!("tree {t} node {i}: feature {feature} out of range (n_features={n_features})");
                        }
                        for child in [left, right] {
                            if child <= i || child >= tree.nodes.len() {
                                bail!("tree {t} node {i}: bad child index {child}");
                            }
                        }
                    }
                }
            }
        }
        Ok(Self { n_features, trees })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("failed to read forest at {}", path.display()))?;
        serde_json::from_str(&txt)
            .with_context(|| format!("invalid forest {}", path.display()))
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }
}

impl YieldModel for RandomForest {
    fn predict(&self, features: &FeatureVector) -> EngineResult<f64> {
        let x = features.as_slice();
        if x.len() != self.n_features {
            return Err(EngineError::Inference(format!(
                "feature length mismatch: got {}, expected {}",
                x.len(),
                self.n_features
            )));
        }
        let sum: f64 = self.trees.iter().map(|t| t.eval(x)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn kind(&self) -> &'static str {
        "random_forest"
    }
}
