mod api_tests;

use std::sync::Arc;

use crate::core::estimator::{Estimator, LinearEstimator};
use crate::core::models::ParticipantRecord;
use crate::core::services::SplitService;

/// `balance = equal_share - item_sum`, a stand-in for a fitted model.
pub fn fair_share_model() -> Arc<dyn Estimator> {
    Arc::new(LinearEstimator {
        intercept: 0.0,
        weights: vec![0.0, 0.0, -1.0, 1.0, 0.0, 0.0, 0.0],
    })
}

pub fn create_test_service() -> SplitService {
    SplitService::new(Some(fair_share_model()))
}

/// A record carrying every feature, with group totals for a group of `group_size`.
pub fn record(
    id: &str,
    group_size: i64,
    paid: f64,
    item_sum: f64,
    group_paid: f64,
    group_cost: f64,
) -> ParticipantRecord {
    ParticipantRecord {
        participant_id: id.to_string(),
        group_size,
        item_count: Some(1.0),
        item_sum: Some(item_sum),
        equal_share: Some(group_cost / group_size as f64),
        item_share_ratio: Some(item_sum / group_cost),
        paid_amount: Some(paid),
        total_paid_group: Some(group_paid),
        total_item_cost_group: Some(group_cost),
    }
}
