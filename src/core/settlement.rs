use tracing::debug;

use crate::core::constants::SETTLED_EPSILON;
use crate::core::errors::SplitError;
use crate::core::models::{BalanceMap, TransferInstruction};

/// Validates `balances` and turns them into payment instructions.
pub fn settle(balances: &BalanceMap) -> Result<Vec<TransferInstruction>, SplitError> {
    balances.validate()?;
    Ok(greedy_transfers(balances))
}

/// Left-to-right greedy matching: each debtor, in map order, pays creditors in map order until
/// their debt is cleared. Deterministic for a given map order, but not guaranteed to use the
/// fewest possible transfers.
///
/// Balances within half a cent of zero are left out up front. Matched amounts are emitted
/// exactly as they are deducted, so replaying them clears each balance; rounding for display
/// is left to the caller.
fn greedy_transfers(balances: &BalanceMap) -> Vec<TransferInstruction> {
    let mut creditors: Vec<(&str, f64)> = balances.iter().filter(|(_, b)| *b > SETTLED_EPSILON).collect();
    let debtors: Vec<(&str, f64)> = balances
        .iter()
        .filter(|(_, b)| *b < -SETTLED_EPSILON)
        .map(|(id, b)| (id, -b))
        .collect();

    let mut transfers = Vec::new();
    for (debtor, owed) in debtors {
        let mut remaining = owed;
        for (creditor, due) in creditors.iter_mut() {
            // `min` zeroes one side exactly, so only genuine leftovers stay positive
            if remaining <= 0.0 {
                break;
            }
            if *due <= 0.0 {
                continue;
            }
            let amount = remaining.min(*due);
            remaining -= amount;
            *due -= amount;

            debug!(from = debtor, to = *creditor, amount, "transfer");
            transfers.push(TransferInstruction::new(debtor, *creditor, amount));
        }
    }
    transfers
}
