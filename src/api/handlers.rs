use crate::{
    api::{models::*, openapi::ApiDoc},
    core::{
        errors::SplitError,
        services::{ResolvedBalances, SplitOutcome, SplitService},
    },
};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;

// Define API routes
pub fn api_routes(service: Arc<SplitService>) -> Router {
    Router::new()
        .route("/smart-split", post(smart_split))
        .route("/balances", post(resolve_balances))
        .route("/settle", post(settle))
        .with_state(service)
}

/// Full application router: health check, API under `/api`, and the OpenAPI document.
pub fn app(service: Arc<SplitService>) -> Router {
    Router::new()
        .route("/", get(|| async { "Smart + Manual Split API is running!" }))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api_routes(service))
}

fn split_request(
    payload: Result<Json<SmartSplitRequest>, JsonRejection>,
) -> Result<(String, serde_json::Value), SplitError> {
    let Json(req) = payload.map_err(|e| SplitError::MalformedPayload(e.body_text()))?;
    let method = req.method.ok_or(SplitError::InvalidMethod(None))?;
    Ok((method, serde_json::Value::Object(req.payload)))
}

#[utoipa::path(
    post,
    path = "/api/smart-split",
    request_body = SmartSplitRequest,
    responses(
        (status = 200, description = "Balances resolved and settled", body = SplitOutcome),
        (status = 400, description = "Invalid method, payload or balances", body = ErrorResponse),
        (status = 503, description = "Estimator needed but no model is loaded", body = ErrorResponse)
    )
)]
async fn smart_split(
    State(service): State<Arc<SplitService>>,
    payload: Result<Json<SmartSplitRequest>, JsonRejection>,
) -> Result<Json<SplitOutcome>, ApiError> {
    let (method, payload) = split_request(payload)?;
    let outcome = service.split(&method, payload)?;
    Ok(Json(outcome))
}

#[utoipa::path(
    post,
    path = "/api/balances",
    request_body = SmartSplitRequest,
    responses(
        (status = 200, description = "Balances resolved", body = ResolvedBalances),
        (status = 400, description = "Invalid method or payload", body = ErrorResponse),
        (status = 503, description = "Estimator needed but no model is loaded", body = ErrorResponse)
    )
)]
async fn resolve_balances(
    State(service): State<Arc<SplitService>>,
    payload: Result<Json<SmartSplitRequest>, JsonRejection>,
) -> Result<Json<ResolvedBalances>, ApiError> {
    let (method, payload) = split_request(payload)?;
    let resolved = service.resolve(&method, payload)?;
    Ok(Json(resolved))
}

#[utoipa::path(
    post,
    path = "/api/settle",
    request_body = SettleRequest,
    responses(
        (status = 200, description = "Transfers that settle the balances", body = SettleResponse),
        (status = 400, description = "Balances are malformed or do not net to zero", body = ErrorResponse)
    )
)]
async fn settle(
    State(service): State<Arc<SplitService>>,
    payload: Result<Json<SettleRequest>, JsonRejection>,
) -> Result<Json<SettleResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| SplitError::MalformedPayload(e.body_text()))?;
    let transfers = service.settle(&req.balances)?;
    Ok(Json(SettleResponse { transfers }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
