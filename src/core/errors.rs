use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum SplitError {
    /// Method selector is not `manual` or `ml`
    #[error("Invalid method. Use 'manual' or 'ml'.")]
    InvalidMethod(Option<String>),

    /// Group size is zero, negative, or differs between records
    #[error("Invalid group size: {0}")]
    InvalidGroupSize(String),

    /// Estimator invoked without the features it needs
    #[error("Missing columns in data: {0:?}")]
    MissingFeature(Vec<String>),

    /// Declared group totals disagree across records
    #[error("Inconsistent group totals for `{field}`: {first} vs {other}")]
    InconsistentTotals { field: String, first: f64, other: f64 },

    /// Structurally invalid input
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Resolved balances do not net to zero, so they cannot be settled
    #[error("Balances do not sum to zero (sum = {0:.2})")]
    UnbalancedLedger(f64),

    #[error("No estimator model is loaded")]
    EstimatorUnavailable,

    #[error("Failed to load estimator model: {0}")]
    ModelLoad(String),
}

impl SplitError {
    /// Stable machine-readable name used in error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            SplitError::InvalidMethod(_) => "InvalidMethod",
            SplitError::InvalidGroupSize(_) => "InvalidGroupSize",
            SplitError::MissingFeature(_) => "MissingFeature",
            SplitError::InconsistentTotals { .. } => "InconsistentTotals",
            SplitError::MalformedPayload(_) => "MalformedPayload",
            SplitError::UnbalancedLedger(_) => "UnbalancedLedger",
            SplitError::EstimatorUnavailable => "EstimatorUnavailable",
            SplitError::ModelLoad(_) => "ModelLoad",
        }
    }

    pub(crate) fn malformed(field: &str, reason: impl std::fmt::Display) -> Self {
        SplitError::MalformedPayload(format!("`{}` {}", field, reason))
    }
}
