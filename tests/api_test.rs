//! HTTP-level tests for the employee endpoints.
//!
//! The router runs against the in-memory store, so no database is needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

use employee_directory::api::{create_router, AppState};
use employee_directory::config::HasherSettings;
use employee_directory::infra::InMemoryEmployeeStore;

fn app() -> Router {
    let state = AppState::with_repository(
        Arc::new(InMemoryEmployeeStore::new()),
        HasherSettings {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
    )
    .unwrap();
    create_router(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn ivanov() -> Value {
    json!({
        "firstName": "Иван",
        "lastName": "Иванов",
        "middleName": "Петрович",
        "login": "ivanov",
        "password": "secret1",
        "email": "ivanov@example.com"
    })
}

/// POST an employee and return the created body
async fn create(app: &Router, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/employees", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_returns_201_without_password() {
    let app = app();

    let created = create(&app, ivanov()).await;

    assert!(created["id"].as_i64().is_some());
    assert_eq!(created["login"], "ivanov");
    assert_eq!(created["middleName"], "Петрович");
    assert!(created.get("password").is_none());
    assert!(created.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_create_duplicate_login_is_bad_request() {
    let app = app();
    create(&app, ivanov()).await;

    let mut duplicate = ivanov();
    duplicate["email"] = json!("other@example.com");
    let response = app
        .clone()
        .oneshot(json_request("POST", "/employees", duplicate))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert!(body["error"]["message"].as_str().unwrap().contains("login"));
}

#[tokio::test]
async fn test_create_invalid_body_lists_every_field() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/employees",
            json!({ "firstName": "И", "login": "ivanov", "email": "nope" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "firstName", "lastName", "password"]);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/employees")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_employee_is_404() {
    let app = app();

    let response = app.oneshot(empty_request("GET", "/employees/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_and_list_employees() {
    let app = app();
    let first = create(&app, ivanov()).await;
    let second = create(
        &app,
        json!({
            "firstName": "Пётр",
            "lastName": "Петров",
            "login": "petrov",
            "password": "secret2",
            "email": "petrov@example.com"
        }),
    )
    .await;

    let uri = format!("/employees/{}", first["id"]);
    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await, first);

    let response = app.oneshot(empty_request("GET", "/employees")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = json_body(response.into_body()).await;
    assert_eq!(list, json!([first, second]));
}

#[tokio::test]
async fn test_update_merges_fields() {
    let app = app();
    let created = create(&app, ivanov()).await;
    let uri = format!("/employees/{}", created["id"]);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({ "firstName": "Пётр", "password": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response.into_body()).await;
    assert_eq!(updated["firstName"], "Пётр");
    assert_eq!(updated["lastName"], "Иванов");
    assert_eq!(updated["login"], "ivanov");
    // Absent middle name clears it
    assert!(updated.get("middleName").is_none());
}

#[tokio::test]
async fn test_update_email_taken_by_other_is_bad_request() {
    let app = app();
    let created = create(&app, ivanov()).await;
    create(
        &app,
        json!({
            "firstName": "Сидор",
            "lastName": "Сидоров",
            "login": "sidorov",
            "password": "secret3",
            "email": "sidorov@example.com"
        }),
    )
    .await;

    let uri = format!("/employees/{}", created["id"]);
    let response = app
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({ "email": "sidorov@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert!(body["error"]["message"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn test_update_missing_employee_is_404() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/employees/999",
            json!({ "firstName": "Пётр" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = app();
    let created = create(&app, ivanov()).await;
    let uri = format!("/employees/{}", created["id"]);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_on_memory_storage() {
    let app = app();

    let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["backend"], "memory");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();

    let response = app
        .oneshot(empty_request("GET", "/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_body(response.into_body()).await;
    assert_eq!(doc["info"]["title"], "Employee Management API");
}
