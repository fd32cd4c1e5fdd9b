use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use super::create_test_service;
use crate::api::app;
use crate::core::services::SplitService;

fn test_app() -> Router {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    app(Arc::new(create_test_service()))
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_manual_split_end_to_end() {
    let (status, body) = post_json(
        test_app(),
        "/api/smart-split",
        json!({ "method": "manual", "total": 300.0, "payer": "A", "participants": ["B", "C"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["strategy"], "equal_split");
    assert_eq!(body["balances"], json!({ "B": -100.0, "C": -100.0, "A": 200.0 }));
    assert_eq!(
        body["transfers"],
        json!([
            { "from_participant": "B", "to_participant": "A", "amount": 100.0 },
            { "from_participant": "C", "to_participant": "A", "amount": 100.0 }
        ])
    );
    assert!(body["event_id"].as_str().is_some());
}

#[tokio::test]
async fn test_reconciliation_end_to_end() {
    let record = |id: &str, paid: f64| {
        json!({
            "participant_id": id,
            "group_size": 3,
            "item_count": 1,
            "item_sum": 100.0,
            "equal_share": 100.0,
            "item_share_ratio": 0.3,
            "paid_amount": paid,
            "total_paid_group": 300.0,
            "total_item_cost_group": 300.0
        })
    };
    let (status, body) = post_json(
        test_app(),
        "/api/smart-split",
        json!({ "method": "ml", "data": [record("A", 300.0), record("B", 0.0), record("C", 0.0)] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["strategy"], "reconciliation");
    assert_eq!(body["transfers"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["transfers"][1]["from_participant"], "C");
}

#[tokio::test]
async fn test_estimator_balances_without_settlement() {
    let record = |id: &str, item_sum: f64, ratio: f64| {
        json!({
            "participant_id": id,
            "group_size": 2,
            "item_count": 2,
            "item_sum": item_sum,
            "equal_share": 50.0,
            "item_share_ratio": ratio,
            "total_paid_group": 100.0,
            "total_item_cost_group": 100.0
        })
    };
    let payload = json!({ "method": "ml", "data": [record("A", 30.0, 0.35), record("B", 60.0, 0.65)] });

    let (status, body) = post_json(test_app(), "/api/balances", payload.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["strategy"], "estimator");
    assert_eq!(body["balances"], json!({ "A": 20.0, "B": -10.0 }));

    // 20 - 10 does not net to zero, so settling is refused rather than guessed
    let (status, body) = post_json(test_app(), "/api/smart-split", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "UnbalancedLedger");
}

#[tokio::test]
async fn test_errors_are_structured() {
    let (status, body) = post_json(test_app(), "/api/smart-split", json!({ "method": "magic" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidMethod");
    assert_eq!(body["error"], "Invalid method. Use 'manual' or 'ml'.");

    let (status, body) = post_json(test_app(), "/api/smart-split", json!({ "total": 5.0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidMethod");

    let (status, body) = post_json(
        test_app(),
        "/api/smart-split",
        json!({ "method": "ml", "data": [{ "participant_id": "A", "group_size": 2, "item_share_ratio": 0.1 }] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "MissingFeature");
}

#[tokio::test]
async fn test_invalid_json_is_malformed() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/settle")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["kind"], "MalformedPayload");
}

#[tokio::test]
async fn test_settle_endpoint() {
    let (status, body) = post_json(
        test_app(),
        "/api/settle",
        json!({ "balances": { "A": 200.0, "B": -100.0, "C": -100.0 } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transfers"][0], json!({ "from_participant": "B", "to_participant": "A", "amount": 100.0 }));

    let (status, body) = post_json(test_app(), "/api/settle", json!({ "balances": { "A": 0.0, "B": 0.0 } })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transfers"], json!([]));
}

#[tokio::test]
async fn test_missing_model_is_service_unavailable() {
    let app = app(Arc::new(SplitService::new(None)));
    let (status, body) = post_json(
        app,
        "/api/balances",
        json!({ "method": "ml", "data": [
            { "participant_id": "A", "group_size": 2, "item_count": 1, "item_sum": 10.0, "equal_share": 10.0,
              "item_share_ratio": 0.4, "total_paid_group": 20.0, "total_item_cost_group": 20.0 }
        ] }),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["kind"], "EstimatorUnavailable");
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let request = Request::builder().uri("/api-docs/openapi.json").body(Body::empty()).unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"]["/api/smart-split"].is_object());
    assert!(doc["paths"]["/api/settle"].is_object());
}
