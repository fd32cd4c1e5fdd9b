use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::core::constants::{METHOD_MANUAL, METHOD_ML, TOTALS_TOLERANCE};
use crate::core::errors::SplitError;
use crate::core::estimator::{Estimator, estimate_balances};
use crate::core::models::{BalanceMap, ParticipantRecord};
use crate::core::rules::{equal_split, is_equal_share, reconcile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Manual,
    Ml,
}

impl FromStr for Method {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            METHOD_MANUAL => Ok(Method::Manual),
            METHOD_ML => Ok(Method::Ml),
            other => Err(SplitError::InvalidMethod(Some(other.to_string()))),
        }
    }
}

/// Which rule produced a set of balances.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    EqualSplit,
    Reconciliation,
    Estimator,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ManualSplit {
    pub total: f64,
    pub payer: String,
    pub participants: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MlSplit {
    pub data: Vec<ParticipantRecord>,
    #[serde(default)]
    pub payer: Option<String>,
}

#[derive(Clone, Debug, Serialize, ToSchema, PartialEq)]
pub struct Resolution {
    pub strategy: Strategy,
    pub balances: BalanceMap,
}

/// Decodes `payload` for `method` and resolves it into balances.
pub fn resolve_balances(
    method: &str,
    payload: serde_json::Value,
    estimator: Option<&dyn Estimator>,
) -> Result<Resolution, SplitError> {
    match method.parse::<Method>()? {
        Method::Manual => {
            let split: ManualSplit = decode(payload)?;
            resolve_manual(&split)
        }
        Method::Ml => {
            let split: MlSplit = decode(payload)?;
            resolve_ml(&split, estimator)
        }
    }
}

fn decode<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T, SplitError> {
    serde_json::from_value(payload).map_err(|e| SplitError::MalformedPayload(e.to_string()))
}

pub fn resolve_manual(split: &ManualSplit) -> Result<Resolution, SplitError> {
    validate_amount("total", Some(split.total))?;
    if split.payer.trim().is_empty() {
        return Err(SplitError::malformed("payer", "must not be empty"));
    }
    if split.participants.is_empty() {
        return Err(SplitError::malformed("participants", "must not be empty"));
    }
    if split.participants.iter().any(|id| id.trim().is_empty()) {
        return Err(SplitError::malformed("participants", "must not contain empty ids"));
    }
    ensure_unique("participants", split.participants.iter().map(String::as_str))?;

    Ok(Resolution {
        strategy: Strategy::EqualSplit,
        balances: equal_split(split.total, &split.payer, &split.participants)?,
    })
}

/// Runs the selection policy: equal share, then reconciliation, then the estimator.
pub fn resolve_ml(split: &MlSplit, estimator: Option<&dyn Estimator>) -> Result<Resolution, SplitError> {
    let records = &split.data;
    validate_records(records)?;

    if is_equal_share(records) {
        debug!("all consumption ratios equal, using equal split");
        let payer = split
            .payer
            .as_deref()
            .filter(|payer| !payer.trim().is_empty())
            .ok_or_else(|| SplitError::malformed("payer", "is required for an equal split"))?;
        let total = records
            .iter()
            .find_map(|r| r.total_paid_group)
            .ok_or_else(|| SplitError::MissingFeature(vec!["total_paid_group".to_string()]))?;
        let participants: Vec<String> = records.iter().map(|r| r.participant_id.clone()).collect();
        return Ok(Resolution {
            strategy: Strategy::EqualSplit,
            balances: equal_split(total, payer, &participants)?,
        });
    }

    if let Some(balances) = reconcile(records) {
        debug!("item sums match group cost, using reconciliation");
        return Ok(Resolution {
            strategy: Strategy::Reconciliation,
            balances,
        });
    }

    debug!("no exact rule applies, falling back to the estimator");
    Ok(Resolution {
        strategy: Strategy::Estimator,
        balances: estimate_balances(records, estimator)?,
    })
}

fn validate_records(records: &[ParticipantRecord]) -> Result<(), SplitError> {
    let first = records
        .first()
        .ok_or_else(|| SplitError::malformed("data", "must contain at least one participant"))?;

    ensure_unique("participant_id", records.iter().map(|r| r.participant_id.as_str()))?;

    for record in records {
        if record.participant_id.trim().is_empty() {
            return Err(SplitError::malformed("participant_id", "must not be empty"));
        }
        if record.group_size <= 0 {
            return Err(SplitError::InvalidGroupSize(format!(
                "{} for participant {}",
                record.group_size, record.participant_id
            )));
        }
        if record.group_size != first.group_size {
            return Err(SplitError::InvalidGroupSize(format!(
                "records disagree: {} vs {}",
                first.group_size, record.group_size
            )));
        }
        validate_amount("item_count", record.item_count)?;
        validate_amount("item_sum", record.item_sum)?;
        validate_amount("equal_share", record.equal_share)?;
        validate_amount("item_share_ratio", record.item_share_ratio)?;
        validate_amount("paid_amount", record.paid_amount)?;
        validate_amount("total_paid_group", record.total_paid_group)?;
        validate_amount("total_item_cost_group", record.total_item_cost_group)?;
    }

    ensure_consistent("total_paid_group", records.iter().map(|r| r.total_paid_group))?;
    ensure_consistent("total_item_cost_group", records.iter().map(|r| r.total_item_cost_group))?;
    Ok(())
}

/// Declared totals must agree across every record that carries them.
fn ensure_consistent(field: &str, values: impl Iterator<Item = Option<f64>>) -> Result<(), SplitError> {
    let declared: Vec<f64> = values.flatten().collect();
    let Some(&first) = declared.first() else {
        return Ok(());
    };
    if let Some(&other) = declared.iter().find(|v| (*v - first).abs() > TOTALS_TOLERANCE) {
        warn!(field, first, other, "records disagree on group total");
        return Err(SplitError::InconsistentTotals {
            field: field.to_string(),
            first,
            other,
        });
    }
    Ok(())
}

fn ensure_unique<'a>(field: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), SplitError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SplitError::malformed(field, format!("contains duplicate `{}`", id)));
        }
    }
    Ok(())
}

fn validate_amount(field: &str, value: Option<f64>) -> Result<(), SplitError> {
    match value {
        Some(v) if !v.is_finite() => Err(SplitError::malformed(field, "must be a finite number")),
        Some(v) if v < 0.0 => Err(SplitError::malformed(field, "must not be negative")),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_methods() {
        assert_eq!("manual".parse::<Method>(), Ok(Method::Manual));
        assert_eq!("ml".parse::<Method>(), Ok(Method::Ml));
        assert_eq!(
            "smart".parse::<Method>(),
            Err(SplitError::InvalidMethod(Some("smart".to_string())))
        );
    }

    #[test]
    fn manual_payload_must_decode() {
        let err = resolve_balances("manual", json!({ "total": 10.0, "payer": "A" }), None).unwrap_err();
        assert_eq!(err.kind(), "MalformedPayload");
    }

    #[test]
    fn negative_totals_are_rejected() {
        let split = ManualSplit {
            total: -5.0,
            payer: "A".to_string(),
            participants: vec!["B".to_string()],
        };
        assert_eq!(resolve_manual(&split).unwrap_err().kind(), "MalformedPayload");
    }

    #[test]
    fn duplicate_participants_are_rejected() {
        let split = ManualSplit {
            total: 5.0,
            payer: "A".to_string(),
            participants: vec!["B".to_string(), "B".to_string()],
        };
        assert_eq!(resolve_manual(&split).unwrap_err().kind(), "MalformedPayload");
    }

    #[test]
    fn empty_participant_ids_are_rejected() {
        for blank in ["", "   "] {
            let split = ManualSplit {
                total: 30.0,
                payer: "A".to_string(),
                participants: vec!["A".to_string(), blank.to_string()],
            };
            assert_eq!(
                resolve_manual(&split).unwrap_err(),
                SplitError::malformed("participants", "must not contain empty ids")
            );
        }
    }
}
