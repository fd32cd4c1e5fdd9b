//! Approximate balances for events where exact reconciliation is impossible.
//!
//! Any deterministic point predictor can back the fallback. Models are loaded once at startup
//! (see [`crate::infrastructure::model_store`]) and shared read-only for the process lifetime.

pub mod gradient_boosting;
pub mod linear;

pub use gradient_boosting::{GradientBoostedTrees, RegressionTree, TreeNode};
pub use linear::LinearEstimator;

use tracing::debug;

use crate::core::constants::round2;
use crate::core::errors::SplitError;
use crate::core::models::{BalanceMap, FeatureVector, ParticipantRecord};

/// A deterministic `features -> balance` predictor.
pub trait Estimator: Send + Sync {
    fn estimate(&self, features: &FeatureVector) -> f64;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Estimator for F
where
    F: Fn(&FeatureVector) -> f64 + Send + Sync,
{
    fn estimate(&self, features: &FeatureVector) -> f64 {
        self(features)
    }
}

/// Predicts a balance for every record, rounded to cents.
///
/// All required features are checked before anything is predicted; the error names every
/// feature absent from at least one record.
pub fn estimate_balances(
    records: &[ParticipantRecord],
    estimator: Option<&dyn Estimator>,
) -> Result<BalanceMap, SplitError> {
    let mut features = Vec::with_capacity(records.len());
    let mut missing: Vec<&'static str> = Vec::new();
    for record in records {
        match record.features() {
            Ok(vector) => features.push((record.participant_id.as_str(), vector)),
            Err(absent) => missing.extend(absent),
        }
    }
    if !missing.is_empty() {
        let names = FeatureVector::NAMES
            .iter()
            .filter(|name| missing.contains(*name))
            .map(|name| name.to_string())
            .collect();
        return Err(SplitError::MissingFeature(names));
    }

    let estimator = estimator.ok_or(SplitError::EstimatorUnavailable)?;
    debug!(model = estimator.name(), participants = features.len(), "estimating balances");

    let mut balances = BalanceMap::new();
    for (id, vector) in features {
        let predicted = estimator.estimate(&vector);
        if !predicted.is_finite() {
            return Err(SplitError::malformed(id, "produced a non-finite estimate"));
        }
        balances.insert(id, round2(predicted));
    }
    Ok(balances)
}
