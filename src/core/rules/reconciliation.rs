use tracing::debug;

use crate::core::constants::{TOTALS_TOLERANCE, round2};
use crate::core::models::{BalanceMap, ParticipantRecord};

/// Exact balances from paid and consumed amounts.
///
/// Returns `None` when the precondition does not hold: a record lacks `paid_amount` or
/// `item_sum`, the group cost is unknown, or the consumed amounts do not add up to it.
/// Callers must have validated that records agree on `total_item_cost_group`.
pub fn reconcile(records: &[ParticipantRecord]) -> Option<BalanceMap> {
    let group_cost = records.iter().find_map(|r| r.total_item_cost_group)?;

    let mut paid_and_consumed = Vec::with_capacity(records.len());
    for record in records {
        paid_and_consumed.push((record.participant_id.as_str(), record.paid_amount?, record.item_sum?));
    }

    let consumed: f64 = paid_and_consumed.iter().map(|(_, _, item_sum)| item_sum).sum();
    if (consumed - group_cost).abs() >= TOTALS_TOLERANCE {
        debug!(consumed, group_cost, "item sums do not match group cost, reconciliation skipped");
        return None;
    }

    Some(
        paid_and_consumed
            .into_iter()
            .map(|(id, paid, item_sum)| (id, round2(paid - item_sum)))
            .collect(),
    )
}
