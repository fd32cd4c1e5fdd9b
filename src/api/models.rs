use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::SplitError;
use crate::core::models::{BalanceMap, TransferInstruction};

// Request structs for JSON payloads

/// `method` selects the payload shape: `manual` takes `total`, `payer` and `participants`;
/// `ml` takes `data` (participant records) and an optional `payer`.
#[derive(Deserialize, ToSchema)]
pub struct SmartSplitRequest {
    pub method: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, ToSchema)]
pub struct SettleRequest {
    pub balances: BalanceMap,
}

#[derive(Serialize, ToSchema)]
pub struct SettleResponse {
    pub transfers: Vec<TransferInstruction>,
}

// Error response struct
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub kind: String,
    pub error: String,
}

// Newtype wrapper for SplitError to implement IntoResponse
pub struct ApiError(pub SplitError);

impl From<SplitError> for ApiError {
    fn from(err: SplitError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0 {
            SplitError::InvalidMethod(_)
            | SplitError::InvalidGroupSize(_)
            | SplitError::MissingFeature(_)
            | SplitError::InconsistentTotals { .. }
            | SplitError::MalformedPayload(_)
            | SplitError::UnbalancedLedger(_) => StatusCode::BAD_REQUEST,
            SplitError::EstimatorUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            SplitError::ModelLoad(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            kind: self.0.kind().to_string(),
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
