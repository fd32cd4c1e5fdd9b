use serde::{Deserialize, Serialize};

use crate::core::errors::SplitError;
use crate::core::estimator::Estimator;
use crate::core::models::FeatureVector;

/// Gradient boosted regression trees, as exported from a fitted scikit-learn
/// `GradientBoostingRegressor`: `init + learning_rate * Σ tree(x)`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GradientBoostedTrees {
    pub init: f64,
    pub learning_rate: f64,
    pub trees: Vec<RegressionTree>,
}

/// Nodes are stored flat; node 0 is the root and children always sit after their parent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TreeNode {
    /// Goes to `left` when `x[feature] <= threshold`, otherwise to `right`.
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

impl RegressionTree {
    /// Walks from the root to a leaf. A tree that skipped `validate` and has an unknown
    /// feature, a dangling child or a backward edge yields NaN, which callers reject as a
    /// non-finite estimate.
    fn predict(&self, x: &[f64; FeatureVector::LEN]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return *value,
                Some(&TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let Some(&value) = x.get(feature) else {
                        return f64::NAN;
                    };
                    let next = if value <= threshold { left } else { right };
                    // children sit after their parent, so forward-only steps always terminate
                    if next <= index {
                        return f64::NAN;
                    }
                    index = next;
                }
                None => return f64::NAN,
            }
        }
    }

    fn validate(&self, tree: usize) -> Result<(), SplitError> {
        if self.nodes.is_empty() {
            return Err(SplitError::ModelLoad(format!("tree {} has no nodes", tree)));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            let ok = match *node {
                TreeNode::Leaf { value } => value.is_finite(),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    feature < FeatureVector::LEN
                        && !threshold.is_nan()
                        && left > index
                        && right > index
                        && left < self.nodes.len()
                        && right < self.nodes.len()
                }
            };
            if !ok {
                return Err(SplitError::ModelLoad(format!("tree {} node {} is invalid", tree, index)));
            }
        }
        Ok(())
    }
}

impl GradientBoostedTrees {
    pub fn validate(&self) -> Result<(), SplitError> {
        if !self.init.is_finite() || !self.learning_rate.is_finite() {
            return Err(SplitError::ModelLoad(
                "init and learning_rate must be finite".to_string(),
            ));
        }
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(index, tree)| tree.validate(index))
    }
}

impl Estimator for GradientBoostedTrees {
    fn estimate(&self, features: &FeatureVector) -> f64 {
        let x = features.as_array();
        let boosted: f64 = self.trees.iter().map(|tree| tree.predict(&x)).sum();
        self.init + self.learning_rate * boosted
    }

    fn name(&self) -> &str {
        "gradient_boosting"
    }
}
