//! API integration tests
//!
//! These tests exercise the full router against in-memory SQLite storage
//! using tower's `oneshot`, so no TCP listener is needed.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

use vidstash::api;
use vidstash::config::FrontendConfig;
use vidstash::storage::{SqliteStorage, Storage};

/// Helper to create test storage
///
/// A single pooled connection keeps every query on the same in-memory
/// database.
async fn create_test_storage() -> Arc<dyn Storage> {
    let storage = SqliteStorage::new("sqlite::memory:", 1).await.unwrap();
    storage.init().await.unwrap();
    Arc::new(storage)
}

async fn create_test_app() -> Router {
    let storage = create_test_storage().await;
    api::create_router(storage, FrontendConfig { static_dir: None })
}

fn save_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/save-url")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn list_request() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/get-urls")
        .body(Body::empty())
        .unwrap()
}

async fn response_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[tokio::test]
async fn test_save_url_round_trip() {
    let app = create_test_app().await;
    let before = now_secs();

    let response = app
        .clone()
        .oneshot(save_request(r#"{"url": "https://x.com/?v=1"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["success"], Value::Bool(true));
    let message = json["message"].as_str().unwrap_or_default();
    assert!(message.contains("saved"), "unexpected message: {message}");
    assert_eq!(json["data"]["url"], "https://x.com/?v=1");
    assert!(json["data"]["id"].as_i64().unwrap() > 0);
    assert!(json["data"]["created_at"].as_i64().unwrap() >= before);

    // The saved record shows up in a subsequent listing
    let response = app.oneshot(list_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["url"], "https://x.com/?v=1");
}

#[tokio::test]
async fn test_save_url_rejects_malformed_url() {
    let app = create_test_app().await;

    let response = app
        .oneshot(save_request(r#"{"url": "not-a-url"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    let error = json["error"].as_str().unwrap_or_default();
    assert!(error.contains("http"), "unexpected error: {error}");
}

#[tokio::test]
async fn test_save_url_rejects_wrong_scheme() {
    let app = create_test_app().await;

    let response = app
        .oneshot(save_request(r#"{"url": "ftp://example.com/file"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_save_url_rejects_non_text_value() {
    let app = create_test_app().await;

    let response = app
        .oneshot(save_request(r#"{"url": 123}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    let error = json["error"].as_str().unwrap_or_default();
    assert!(error.contains("text"), "unexpected error: {error}");
}

#[tokio::test]
async fn test_save_url_rejects_missing_field() {
    let app = create_test_app().await;

    let response = app.oneshot(save_request(r#"{}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    let error = json["error"].as_str().unwrap_or_default();
    assert!(error.contains("required"), "unexpected error: {error}");
}

#[tokio::test]
async fn test_save_url_allows_duplicates() {
    let app = create_test_app().await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(save_request(r#"{"url": "https://example.com/video"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(list_request()).await.unwrap();
    let json = response_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_urls_newest_first() {
    let app = create_test_app().await;

    // created_at has second precision, so space the saves out
    for url in [
        "https://example.com/first",
        "https://example.com/second",
        "https://example.com/third",
    ] {
        let response = app
            .clone()
            .oneshot(save_request(&format!(r#"{{"url": "{url}"}}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    }

    let response = app.oneshot(list_request()).await.unwrap();
    let json = response_json(response).await;
    let data = json["data"].as_array().unwrap();

    let urls: Vec<&str> = data.iter().map(|r| r["url"].as_str().unwrap()).collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/third",
            "https://example.com/second",
            "https://example.com/first",
        ]
    );

    let timestamps: Vec<i64> = data
        .iter()
        .map(|r| r["created_at"].as_i64().unwrap())
        .collect();
    assert!(timestamps.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_get_urls_disables_caching() {
    let app = create_test_app().await;

    let response = app.oneshot(list_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["message"], "OK");
}

#[tokio::test]
async fn test_serves_embedded_frontend() {
    let app = create_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.contains("text/html"));
}
