use super::common::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::history::history_router;

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn dashboard_route_serializes_summary() {
    let service = build_service(vec![analyzed("a", 0, 50), analyzed("b", 1, 52)]);
    let router = history_router(Arc::new(service));

    let (status, body) = get_json(router, "/api/v1/producers/7/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trend"], "stable");
    assert_eq!(body["latest_score"], 52);
    assert_eq!(body["category"], "attention");
}

#[tokio::test]
async fn dashboard_route_returns_not_found_for_unknown_producer() {
    let router = history_router(Arc::new(build_service(Vec::new())));

    let (status, body) = get_json(router, "/api/v1/producers/99/dashboard").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "producer not found: 99");
}

#[tokio::test]
async fn comparison_route_reads_query_ids() {
    let service = build_service(vec![analyzed("a", 0, 40), analyzed("b", 1, 60)]);
    let router = history_router(Arc::new(service));

    let (status, body) = get_json(router, "/api/v1/comparisons?first=a&second=b").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score_delta"], 20);
    assert_eq!(body["percent_change"], 50.0);
    assert_eq!(body["improved"], true);
}

#[tokio::test]
async fn trend_route_accepts_date_bounds() {
    let service = build_service(vec![
        analyzed("a", 0, 40),
        analyzed("b", 1, 60),
        analyzed("c", 40, 90),
    ]);
    let router = history_router(Arc::new(service));

    let (status, body) = get_json(
        router,
        "/api/v1/producers/7/trends?start=2025-03-01&end=2025-03-02",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_forms"], 2);
    assert_eq!(body["points"][0]["date"], "2025-03-01");
    assert_eq!(body["trend"], "rising");
}

#[tokio::test]
async fn trend_route_rejects_inverted_bounds() {
    let router = history_router(Arc::new(build_service(Vec::new())));

    let (status, _) = get_json(
        router,
        "/api/v1/producers/7/trends?start=2025-03-10&end=2025-03-01",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
