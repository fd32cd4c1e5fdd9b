use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::core::errors::SplitError;
use crate::core::estimator::{Estimator, GradientBoostedTrees, LinearEstimator};

/// On-disk model formats, tagged by `kind`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    GradientBoosting(GradientBoostedTrees),
    Linear(LinearEstimator),
}

impl ModelArtifact {
    pub fn parse(json: &str) -> Result<Self, SplitError> {
        let artifact: ModelArtifact =
            serde_json::from_str(json).map_err(|e| SplitError::ModelLoad(format!("invalid model file: {}", e)))?;
        match &artifact {
            ModelArtifact::GradientBoosting(model) => model.validate()?,
            ModelArtifact::Linear(model) => model.validate()?,
        }
        Ok(artifact)
    }

    pub fn into_estimator(self) -> Arc<dyn Estimator> {
        match self {
            ModelArtifact::GradientBoosting(model) => Arc::new(model),
            ModelArtifact::Linear(model) => Arc::new(model),
        }
    }
}

/// Reads and validates a model file. Called once at startup.
pub fn load_estimator(path: impl AsRef<Path>) -> Result<Arc<dyn Estimator>, SplitError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| SplitError::ModelLoad(format!("cannot read {}: {}", path.display(), e)))?;
    let estimator = ModelArtifact::parse(&json)?.into_estimator();
    info!(path = %path.display(), model = estimator.name(), "estimator loaded");
    Ok(estimator)
}
