//! Handler tests for the mailing-list domain
//!
//! These tests drive the HTTP router directly with `oneshot`:
//! - Request decoding (JSON bodies, including on GET/DELETE)
//! - Response encoding and status codes
//! - `{"Err": ...}` error bodies
//! - Verb restrictions and unknown paths

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_mailing_list::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::{TestDataBuilder, TestDatabase};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn sqlite_app() -> (TestDatabase, Router) {
    let db = TestDatabase::new().await;
    let service = MailingListService::new(SqliteEmailRepository::new(db.pool()));
    service.ensure_schema().await.unwrap();
    (db, handlers::router(service))
}

fn memory_app() -> Router {
    handlers::router(MailingListService::new(InMemoryEmailRepository::new()))
}

#[tokio::test]
async fn test_create_returns_fresh_entry() {
    let (_db, app) = sqlite_app().await;
    let email = TestDataBuilder::from_test_name("handler_create").email("new");

    let response = app
        .oneshot(request("POST", "/email/create", json!({ "Email": email })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let entry: EmailEntry = json_body(response.into_body()).await;
    assert_eq!(entry.email, email);
    assert_eq!(entry.confirmed_at.timestamp(), 0);
    assert!(!entry.opt_out);
}

#[tokio::test]
async fn test_duplicate_create_is_400_with_err() {
    let (_db, app) = sqlite_app().await;

    let first = app
        .clone()
        .oneshot(request("POST", "/email/create", json!({ "Email": "dup@example.com" })))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(request("POST", "/email/create", json!({ "Email": "dup@example.com" })))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(second.into_body()).await;
    assert!(body["Err"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_create_malformed_email_is_400() {
    let app = memory_app();

    let response = app
        .oneshot(request("POST", "/email/create", json!({ "Email": "nope" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["Err"].is_string());
}

#[tokio::test]
async fn test_get_unknown_returns_null() {
    let app = memory_app();

    let response = app
        .oneshot(request("GET", "/email/get", json!({ "Email": "ghost@example.com" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn test_get_batch_rejects_zero_page() {
    let app = memory_app();

    let response = app
        .oneshot(request("GET", "/email/get_batch", json!({ "Page": 0, "Count": 5 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({ "Err": "page and count fields are required and must be > 0" })
    );
}

#[tokio::test]
async fn test_get_batch_missing_fields_is_400() {
    let app = memory_app();

    let response = app
        .oneshot(request("GET", "/email/get_batch", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_then_delete_then_batch() {
    let (_db, app) = sqlite_app().await;

    for email in ["a@example.com", "b@example.com"] {
        let response = app
            .clone()
            .oneshot(request("POST", "/email/create", json!({ "Email": email })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            "/email/update",
            json!({ "Id": 999, "Email": "a@example.com", "ConfirmedAt": 10000, "OptOut": false }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: EmailEntry = json_body(response.into_body()).await;
    assert_eq!(updated.confirmed_at.timestamp(), 10_000);
    assert_ne!(updated.id, 999, "client-supplied id must be ignored");

    let response = app
        .clone()
        .oneshot(request("DELETE", "/email/delete", json!({ "Email": "b@example.com" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: EmailEntry = json_body(response.into_body()).await;
    assert!(deleted.opt_out);

    let response = app
        .oneshot(request("GET", "/email/get_batch", json!({ "Page": 1, "Count": 5 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let batch: Vec<EmailEntry> = json_body(response.into_body()).await;
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].email, "a@example.com");
}

#[tokio::test]
async fn test_delete_unknown_is_ok_null() {
    let app = memory_app();

    let response = app
        .oneshot(request("DELETE", "/email/delete", json!({ "Email": "ghost@example.com" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn test_wrong_verb_is_405() {
    let app = memory_app();

    let response = app
        .oneshot(request("GET", "/email/create", json!({ "Email": "a@example.com" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_undecodable_body_is_400() {
    let app = memory_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/email/create")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["Err"].as_str().unwrap().starts_with("invalid request body"));
}

#[tokio::test]
async fn test_body_without_content_type_is_accepted() {
    let app = memory_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/email/get")
                .body(Body::from(r#"{"Email":"a@example.com"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let app = memory_app();

    let response = app
        .oneshot(request("GET", "/email/nope", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "Err": "not found" }));
}

#[tokio::test]
async fn test_store_failure_is_500_with_error_body() {
    let (db, app) = sqlite_app().await;
    db.pool().close().await;

    let response = app
        .oneshot(request("GET", "/email/get", json!({ "Email": "a@example.com" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert!(!body["Err"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_padded_address_resolves_to_created_entry() {
    let app = memory_app();

    let response = app
        .clone()
        .oneshot(request("POST", "/email/create", json!({ "Email": " pad@example.com " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request("GET", "/email/get", json!({ "Email": "pad@example.com\t" })))
        .await
        .unwrap();

    let entry: Option<EmailEntry> = json_body(response.into_body()).await;
    assert_eq!(entry.unwrap().email, "pad@example.com");
}
