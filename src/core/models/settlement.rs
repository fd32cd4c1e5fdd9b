use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::models::balance::BalanceMap;

/// A single payment from a debtor to a creditor. `amount` is always positive.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TransferInstruction {
    pub from_participant: String,
    pub to_participant: String,
    pub amount: f64,
}

impl TransferInstruction {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: f64) -> Self {
        TransferInstruction {
            from_participant: from.into(),
            to_participant: to.into(),
            amount,
        }
    }
}

/// Applies the transfers to a copy of `balances`. Paying settles debt, so the payer's balance
/// rises and the receiver's falls.
pub fn replay(balances: &BalanceMap, transfers: &[TransferInstruction]) -> BalanceMap {
    let mut after = balances.clone();
    for transfer in transfers {
        *after.entry_mut(&transfer.from_participant) += transfer.amount;
        *after.entry_mut(&transfer.to_participant) -= transfer.amount;
    }
    after
}
