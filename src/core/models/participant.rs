use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One participant's contribution and consumption data for a settlement event.
///
/// Only `participant_id` and `group_size` are required on the wire. The remaining fields are
/// optional so that a strategy needing them can report exactly which ones are absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ParticipantRecord {
    pub participant_id: String,
    pub group_size: i64,
    #[serde(default)]
    pub item_count: Option<f64>,
    #[serde(default, alias = "amount_consumed")]
    pub item_sum: Option<f64>,
    #[serde(default)]
    pub equal_share: Option<f64>,
    #[serde(default)]
    pub item_share_ratio: Option<f64>,
    #[serde(default, alias = "amount_paid")]
    pub paid_amount: Option<f64>,
    #[serde(default, alias = "total_group_paid")]
    pub total_paid_group: Option<f64>,
    #[serde(default, alias = "total_group_consumed")]
    pub total_item_cost_group: Option<f64>,
}

impl ParticipantRecord {
    /// Builds the estimator input, or lists the features this record lacks.
    pub fn features(&self) -> Result<FeatureVector, Vec<&'static str>> {
        let optional = [
            ("item_count", self.item_count),
            ("item_sum", self.item_sum),
            ("equal_share", self.equal_share),
            ("item_share_ratio", self.item_share_ratio),
            ("total_paid_group", self.total_paid_group),
            ("total_item_cost_group", self.total_item_cost_group),
        ];
        let missing: Vec<&'static str> = optional
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        // every optional is present past this point
        let [item_count, item_sum, equal_share, item_share_ratio, total_paid_group, total_item_cost_group] =
            optional.map(|(_, value)| value.unwrap_or_default());

        Ok(FeatureVector {
            group_size: self.group_size as f64,
            item_count,
            item_sum,
            equal_share,
            item_share_ratio,
            total_paid_group,
            total_item_cost_group,
        })
    }
}

/// Estimator input, in the column order the models were fitted on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureVector {
    pub group_size: f64,
    pub item_count: f64,
    pub item_sum: f64,
    pub equal_share: f64,
    pub item_share_ratio: f64,
    pub total_paid_group: f64,
    pub total_item_cost_group: f64,
}

impl FeatureVector {
    pub const LEN: usize = 7;

    pub const NAMES: [&'static str; FeatureVector::LEN] = [
        "group_size",
        "item_count",
        "item_sum",
        "equal_share",
        "item_share_ratio",
        "total_paid_group",
        "total_item_cost_group",
    ];

    pub fn as_array(&self) -> [f64; FeatureVector::LEN] {
        [
            self.group_size,
            self.item_count,
            self.item_sum,
            self.equal_share,
            self.item_share_ratio,
            self.total_paid_group,
            self.total_item_cost_group,
        ]
    }
}
