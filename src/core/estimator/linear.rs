use serde::{Deserialize, Serialize};

use crate::core::errors::SplitError;
use crate::core::estimator::Estimator;
use crate::core::models::FeatureVector;

/// `intercept + weights · features`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LinearEstimator {
    pub intercept: f64,
    pub weights: Vec<f64>,
}

impl LinearEstimator {
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.weights.len() != FeatureVector::LEN {
            return Err(SplitError::ModelLoad(format!(
                "linear model has {} weights, expected {}",
                self.weights.len(),
                FeatureVector::LEN
            )));
        }
        if !self.intercept.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(SplitError::ModelLoad("linear model has non-finite coefficients".to_string()));
        }
        Ok(())
    }
}

impl Estimator for LinearEstimator {
    fn estimate(&self, features: &FeatureVector) -> f64 {
        self.intercept
            + self
                .weights
                .iter()
                .zip(features.as_array())
                .map(|(weight, value)| weight * value)
                .sum::<f64>()
    }

    fn name(&self) -> &str {
        "linear"
    }
}
