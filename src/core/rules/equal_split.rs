use tracing::debug;

use crate::core::constants::{EQUAL_SHARE_TOLERANCE, round2};
use crate::core::errors::SplitError;
use crate::core::models::{BalanceMap, ParticipantRecord};

/// Splits `total` evenly between the participants and the payer, with the payer exempt from
/// owing. Everyone else owes `per_person`; the payer is owed the sum of those shares.
///
/// The payer is counted once whether or not they appear in `participants`.
pub fn equal_split(total: f64, payer: &str, participants: &[String]) -> Result<BalanceMap, SplitError> {
    let payer_listed = participants.iter().any(|p| p == payer);
    let people = participants.len() + usize::from(!payer_listed);
    if people == 0 {
        return Err(SplitError::InvalidGroupSize("no one to split between".to_string()));
    }

    let per_person = round2(total / people as f64);
    let debtors = participants.iter().filter(|p| p.as_str() != payer);

    let mut balances = BalanceMap::new();
    let mut owed_to_payer = 0.0;
    for participant in debtors {
        balances.insert(participant.as_str(), -per_person);
        owed_to_payer += per_person;
    }
    balances.insert(payer, round2(owed_to_payer));

    debug!(total, people, per_person, payer, "equal split computed");
    Ok(balances)
}

/// True when every record carries a consumption ratio of `1 / group_size`.
pub fn is_equal_share(records: &[ParticipantRecord]) -> bool {
    !records.is_empty()
        && records.iter().all(|record| {
            let equal_ratio = 1.0 / record.group_size as f64;
            record
                .item_share_ratio
                .is_some_and(|ratio| (ratio - equal_ratio).abs() < EQUAL_SHARE_TOLERANCE)
        })
}
