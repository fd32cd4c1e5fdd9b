use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::constants::{TOTALS_TOLERANCE, round2};
use crate::core::errors::SplitError;

/// Net balance per participant: positive means owed money, negative means owes money.
///
/// Iteration follows insertion order, which keeps settlement output reproducible.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(transparent)]
pub struct BalanceMap(IndexMap<String, f64>);

impl BalanceMap {
    pub fn new() -> Self {
        BalanceMap(IndexMap::new())
    }

    /// Sets a participant's balance, keeping their original position if already present.
    pub fn insert(&mut self, participant_id: impl Into<String>, balance: f64) {
        self.0.insert(participant_id.into(), balance);
    }

    pub fn get(&self, participant_id: &str) -> Option<f64> {
        self.0.get(participant_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(id, balance)| (id.as_str(), *balance))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Checks that every balance is finite and that the map nets to zero within a cent.
    pub fn validate(&self) -> Result<(), SplitError> {
        if let Some((id, _)) = self.0.iter().find(|(_, balance)| !balance.is_finite()) {
            return Err(SplitError::malformed(id, "has a non-finite balance"));
        }
        let total = self.total();
        if total.abs() > TOTALS_TOLERANCE {
            return Err(SplitError::UnbalancedLedger(round2(total)));
        }
        Ok(())
    }

    pub(crate) fn entry_mut(&mut self, participant_id: &str) -> &mut f64 {
        self.0.entry(participant_id.to_string()).or_insert(0.0)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for BalanceMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        BalanceMap(iter.into_iter().map(|(id, balance)| (id.into(), balance)).collect())
    }
}
