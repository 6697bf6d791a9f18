//! Controller tests driving the axum router directly.

mod mocks;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use client_search_service::server::{build_router, AppState};
use client_search_service::Config;
use mocks::MockSearchEngine;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

fn write_clients(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn jane_fixture() -> NamedTempFile {
    write_clients(
        r#"[
            {"id": 1, "full_name": "Jane Doe", "email": "jane@example.com"},
            {"id": 2, "full_name": "Jane Smith", "email": "jane@example.com"}
        ]"#,
    )
}

fn state_with(engine: &MockSearchEngine, fixture: &NamedTempFile) -> AppState {
    AppState {
        engine: Arc::new(engine.clone()),
        config: Arc::new(Config {
            clients_file: fixture.path().display().to_string(),
            ..Config::default()
        }),
    }
}

async fn get(state: AppState, uri: &str) -> Response {
    build_router(state)
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let engine = MockSearchEngine::new();
    let fixture = jane_fixture();

    let response = get(state_with(&engine, &fixture), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_search_requires_keyword() {
    let engine = MockSearchEngine::new();
    let fixture = jane_fixture();

    let response = get(state_with(&engine, &fixture), "/clients/search").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body, json!({"error": {"message": "Missing keyword"}}));

    // Validation happens before any service construction
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn test_search_rejects_blank_keyword() {
    let engine = MockSearchEngine::new();
    let fixture = jane_fixture();

    let response = get(state_with(&engine, &fixture), "/clients/search?keyword=%20%20").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_returns_results_envelope() {
    let engine = MockSearchEngine::new();
    let fixture = jane_fixture();
    engine.queue_search_response(json!({
        "hits": {
            "hits": [
                {"_id": "1", "_source": {"id": 1, "full_name": "Jane Doe", "email": "jane@example.com"}},
                {"_id": "2", "_source": {"id": 2, "full_name": "Jane Smith", "email": "jane@example.com"}}
            ]
        }
    }));

    let response = get(state_with(&engine, &fixture), "/clients/search?keyword=jane").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "results": [
                {"id": 1, "full_name": "Jane Doe", "email": "jane@example.com"},
                {"id": 2, "full_name": "Jane Smith", "email": "jane@example.com"}
            ]
        })
    );

    // Each request rebuilds the index before searching
    assert_eq!(engine.call_count("create_index"), 1);
    assert_eq!(engine.call_count("bulk_index"), 1);
    assert_eq!(engine.call_count("refresh"), 1);
    assert_eq!(
        engine.last_search_body().unwrap(),
        json!({"query": {"wildcard": {"full_name.keyword": {"value": "*jane*"}}}})
    );
}

#[tokio::test]
async fn test_search_forwards_field_param() {
    let engine = MockSearchEngine::new();
    let fixture = jane_fixture();

    let response = get(
        state_with(&engine, &fixture),
        "/clients/search?keyword=jane&field=email",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = engine.last_search_body().unwrap();
    assert!(body["query"]["wildcard"]
        .as_object()
        .unwrap()
        .contains_key("email.keyword"));
}

#[tokio::test]
async fn test_search_honors_path_override() {
    let engine = MockSearchEngine::new();
    let default_fixture = jane_fixture();
    let alternate =
        write_clients(r#"[{"id": 7, "full_name": "Solo Act", "email": "solo@example.com"}]"#);

    let uri = format!(
        "/clients/search?keyword=solo&path={}",
        urlencoding::encode(&alternate.path().display().to_string())
    );
    let response = get(state_with(&engine, &default_fixture), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let documents = engine.documents();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, "7");
}

#[tokio::test]
async fn test_duplicates_returns_duplicates_envelope() {
    let engine = MockSearchEngine::new();
    let fixture = jane_fixture();
    engine.queue_search_response(json!({
        "aggregations": {
            "duplicates": {
                "buckets": [
                    {"key": "jane@example.com", "doc_count": 2}
                ]
            }
        }
    }));

    let response = get(state_with(&engine, &fixture), "/clients/duplicates").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({"duplicates": [{"email": "jane@example.com", "count": 2}]})
    );
}

#[tokio::test]
async fn test_duplicates_forwards_field_param() {
    let engine = MockSearchEngine::new();
    let fixture = jane_fixture();

    let response = get(
        state_with(&engine, &fixture),
        "/clients/duplicates?field=full_name",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = engine.last_search_body().unwrap();
    assert_eq!(
        body["aggs"]["duplicates"]["terms"]["field"],
        "full_name.keyword"
    );
}

#[tokio::test]
async fn test_engine_failure_maps_to_bad_gateway() {
    let engine = MockSearchEngine::new();
    let fixture = jane_fixture();
    engine.fail_on("search");

    let response = get(state_with(&engine, &fixture), "/clients/search?keyword=jane").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert!(body["error"]["message"].as_str().unwrap().contains("search"));
}

#[tokio::test]
async fn test_unreadable_source_maps_to_internal_error() {
    let engine = MockSearchEngine::new();
    let fixture = jane_fixture();

    let response = get(
        state_with(&engine, &fixture),
        "/clients/search?keyword=jane&path=no%2Fsuch%2Ffile.json",
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert!(body["error"]["message"].as_str().unwrap().contains("no/such/file.json"));
}
