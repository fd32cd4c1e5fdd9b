/// Tolerance for declared group totals and for the zero-sum check on balances.
pub const TOTALS_TOLERANCE: f64 = 1e-2;

/// Tolerance for detecting an equal `1 / group_size` consumption ratio.
pub const EQUAL_SHARE_TOLERANCE: f64 = 1e-6;

/// Remaining amounts at or below half a cent are considered settled.
pub const SETTLED_EPSILON: f64 = 0.005;

pub const METHOD_MANUAL: &str = "manual";
pub const METHOD_ML: &str = "ml";

/// Rounds a monetary amount to cents, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
