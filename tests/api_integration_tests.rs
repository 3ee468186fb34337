//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint, including the listing
//! cache and its invalidation on writes.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use noticias_api::{api::create_router, store::InMemoryNoticiaStore, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    let state = AppState::from_config(&Config::default(), Arc::new(InMemoryNoticiaStore::new()));
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn create(app: &Router, titulo: &str, descricao: &str) -> Value {
    let response = send(
        app,
        "POST",
        "/noticias",
        Some(json!({ "titulo": titulo, "descricao": descricao })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_to_json(response.into_body()).await
}

fn total_count(response: &Response) -> u64 {
    response
        .headers()
        .get("x-total-count")
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap()
}

fn assert_validation_body(json: &Value) {
    assert_eq!(json["error"], "Validation failed");
    assert!(!json["messages"].as_array().unwrap().is_empty());
}

// == Create Endpoint Tests ==

#[tokio::test]
async fn test_create_endpoint_success() {
    let app = create_test_app();

    let json = create(&app, "Teste de Notícia", "Uma descrição válida").await;

    assert!(json.get("id").is_some());
    assert_eq!(json["titulo"], "Teste de Notícia");
    assert_eq!(json["descricao"], "Uma descrição válida");
    assert!(json.get("createdAt").is_some());
    assert!(json.get("updatedAt").is_some());
}

#[tokio::test]
async fn test_create_endpoint_empty_title() {
    let app = create_test_app();

    let response = send(
        &app,
        "POST",
        "/noticias",
        Some(json!({ "titulo": "", "descricao": "Descrição válida" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    let messages = json["messages"].as_array().unwrap();
    assert!(messages
        .iter()
        .any(|m| m.as_str().unwrap().contains("Title must not be empty")));
}

#[tokio::test]
async fn test_create_endpoint_title_too_long() {
    let app = create_test_app();

    let response = send(
        &app,
        "POST",
        "/noticias",
        Some(json!({ "titulo": "A".repeat(201), "descricao": "Descrição válida" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["messages"][0]
        .as_str()
        .unwrap()
        .contains("at most 200 characters"));
}

#[tokio::test]
async fn test_create_endpoint_missing_fields() {
    let app = create_test_app();

    let response = send(&app, "POST", "/noticias", Some(json!({}))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["messages"].as_array().unwrap().len() >= 2);

    let listing = send(&app, "GET", "/noticias", None).await;
    assert_eq!(total_count(&listing), 0, "Nothing was persisted");
}

#[tokio::test]
async fn test_create_endpoint_unknown_field() {
    let app = create_test_app();

    let response = send(
        &app,
        "POST",
        "/noticias",
        Some(json!({ "titulo": "a", "descricao": "b", "autor": "c" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_validation_body(&json);
    assert!(json["messages"][0].as_str().unwrap().contains("autor"));
}

#[tokio::test]
async fn test_create_endpoint_wrong_field_type() {
    let app = create_test_app();

    let response = send(
        &app,
        "POST",
        "/noticias",
        Some(json!({ "titulo": 123, "descricao": "b" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_validation_body(&body_to_json(response.into_body()).await);

    let listing = send(&app, "GET", "/noticias", None).await;
    assert_eq!(total_count(&listing), 0, "Nothing was persisted");
}

#[tokio::test]
async fn test_update_endpoint_unknown_field() {
    let app = create_test_app();
    let created = create(&app, "Título", "Descrição").await;
    let uri = format!("/noticias/{}", created["id"]);

    let response = send(&app, "PATCH", &uri, Some(json!({ "autor": "x" }))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_validation_body(&body_to_json(response.into_body()).await);
}

// == List Endpoint Tests ==

#[tokio::test]
async fn test_list_endpoint_pagination_and_header() {
    let app = create_test_app();
    for i in 1..=3 {
        create(&app, &format!("Notícia {}", i), "Descrição").await;
    }

    let response = send(&app, "GET", "/noticias?page=1&limit=2", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(total_count(&response), 3);
    let json = body_to_json(response.into_body()).await;
    let data = json.as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["titulo"], "Notícia 3", "Newest first");
}

#[tokio::test]
async fn test_list_endpoint_search() {
    let app = create_test_app();
    create(&app, "Eleições", "Resultado final").await;
    create(&app, "Futebol", "Final do campeonato").await;
    create(&app, "Clima", "Chuva forte").await;

    let response = send(&app, "GET", "/noticias?search=FINAL", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(total_count(&response), 2);
}

#[tokio::test]
async fn test_list_endpoint_invalid_limit() {
    let app = create_test_app();

    let response = send(&app, "GET", "/noticias?limit=101", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/noticias?page=0", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/noticias?page=abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_validation_body(&body_to_json(response.into_body()).await);
}

#[tokio::test]
async fn test_list_endpoint_repeated_request_is_cached() {
    let app = create_test_app();
    create(&app, "Notícia para cache", "Descrição").await;

    let first = send(&app, "GET", "/noticias?page=1&limit=10", None).await;
    let first = body_to_json(first.into_body()).await;
    let second = send(&app, "GET", "/noticias?page=1&limit=10", None).await;
    let second = body_to_json(second.into_body()).await;

    assert_eq!(first, second);

    let stats = send(&app, "GET", "/cache/stats", None).await;
    let stats = body_to_json(stats.into_body()).await;
    assert_eq!(stats["totalEntries"], 1);
    assert_eq!(stats["validEntries"], 1);
    assert_eq!(stats["expiredEntries"], 0);
}

#[tokio::test]
async fn test_create_invalidates_cached_listing() {
    let app = create_test_app();

    let before = send(&app, "GET", "/noticias?page=1&limit=10", None).await;
    assert_eq!(total_count(&before), 0);

    create(&app, "Nova notícia", "Nova descrição").await;

    let after = send(&app, "GET", "/noticias?page=1&limit=10", None).await;
    assert_eq!(total_count(&after), 1);
    let json = body_to_json(after.into_body()).await;
    assert_eq!(json[0]["titulo"], "Nova notícia");
}

// == Single Item Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint() {
    let app = create_test_app();
    let created = create(&app, "Título", "Descrição").await;
    let id = created["id"].as_i64().unwrap();

    let response = send(&app, "GET", &format!("/noticias/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await, created);

    let response = send(&app, "GET", "/noticias/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/noticias/abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_validation_body(&body_to_json(response.into_body()).await);
}

#[tokio::test]
async fn test_update_endpoint() {
    let app = create_test_app();
    let created = create(&app, "Título", "Descrição").await;
    let uri = format!("/noticias/{}", created["id"]);

    // Populate the cache, then make sure the update shows up
    send(&app, "GET", "/noticias", None).await;

    let response = send(&app, "PATCH", &uri, Some(json!({ "titulo": "Novo título" }))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["titulo"], "Novo título");
    assert_eq!(json["descricao"], "Descrição");

    let listing = send(&app, "GET", "/noticias", None).await;
    let listing = body_to_json(listing.into_body()).await;
    assert_eq!(listing[0]["titulo"], "Novo título");

    let response = send(&app, "PATCH", &uri, Some(json!({ "descricao": "" }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "PATCH", "/noticias/999", Some(json!({ "titulo": "x" }))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_endpoint() {
    let app = create_test_app();
    let created = create(&app, "Título", "Descrição").await;
    let uri = format!("/noticias/{}", created["id"]);

    send(&app, "GET", "/noticias", None).await;

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let listing = send(&app, "GET", "/noticias", None).await;
    assert_eq!(total_count(&listing), 0);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
