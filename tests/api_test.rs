use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rusty_library_app::api::handlers::AppState;
use rusty_library_app::api::router::create_router;
use rusty_library_app::api::types::*;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

// ============================================================================
// ヘルパー
// ============================================================================

fn setup_app() -> Router {
    let app_state = Arc::new(AppState {
        service_deps: common::in_memory_deps(),
    });
    create_router(app_state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn register_user_and_book(app: &Router) {
    let (status, _) = send(app, "POST", "/user", Some(json!({ "name": "Jung", "age": 30 }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/book",
        Some(json!({ "name": "Object", "type": "COMPUTER" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

// ============================================================================
// テスト
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_full_loan_flow() {
    let app = setup_app();
    register_user_and_book(&app).await;

    // 貸出
    let loan = json!({ "userName": "Jung", "bookName": "Object" });
    let (status, _) = send(&app, "POST", "/book/loan", Some(loan.clone())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", "/book/loan", None).await;
    assert_eq!(status, StatusCode::OK);
    let count: i64 = serde_json::from_slice(&body).unwrap();
    assert_eq!(count, 1);

    // 貸出中の書籍は再貸出できない
    let (status, body) = send(&app, "POST", "/book/loan", Some(loan.clone())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "BOOK_ALREADY_LOANED");

    // 返却
    let (status, _) = send(&app, "PUT", "/book/return", Some(loan)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/book/loan", None).await;
    let count: i64 = serde_json::from_slice(&body).unwrap();
    assert_eq!(count, 0);

    // 貸出履歴
    let (status, body) = send(&app, "GET", "/user/loan", None).await;
    assert_eq!(status, StatusCode::OK);
    let histories: Vec<UserLoanHistoryResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(histories.len(), 1);
    assert_eq!(histories[0].name, "Jung");
    assert_eq!(histories[0].books.len(), 1);
    assert_eq!(histories[0].books[0].name, "Object");
    assert!(histories[0].books[0].is_return);
}

#[tokio::test]
async fn test_loan_unknown_book_returns_not_found() {
    let app = setup_app();
    let (status, _) = send(&app, "POST", "/user", Some(json!({ "name": "Jung" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/book/loan",
        Some(json!({ "userName": "Jung", "bookName": "Missing" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "BOOK_NOT_FOUND");
}

#[tokio::test]
async fn test_return_without_loan_returns_not_found() {
    let app = setup_app();
    register_user_and_book(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/book/return",
        Some(json!({ "userName": "Jung", "bookName": "Object" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "LOAN_NOT_FOUND");
}

#[tokio::test]
async fn test_user_crud() {
    let app = setup_app();

    let (status, body) = send(&app, "POST", "/user", Some(json!({ "name": "A" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: UserResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.name, "A");
    assert_eq!(created.age, None);

    let (status, _) = send(
        &app,
        "PUT",
        "/user",
        Some(json!({ "id": created.id, "name": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", "/user", None).await;
    assert_eq!(status, StatusCode::OK);
    let users: Vec<UserResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, created.id);
    assert_eq!(users[0].name, "B");

    let (status, _) = send(&app, "DELETE", "/user?name=B", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/user", None).await;
    let users: Vec<UserResponse> = serde_json::from_slice(&body).unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_blank_user_name_is_rejected() {
    let app = setup_app();

    let (status, body) = send(&app, "POST", "/user", Some(json!({ "name": "  " }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_unknown_user_returns_not_found() {
    let app = setup_app();

    let (status, _) = send(&app, "DELETE", "/user?name=Nobody", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_book_statistics() {
    let app = setup_app();
    for (name, book_type) in [("A", "COMPUTER"), ("B", "COMPUTER"), ("C", "SCIENCE")] {
        let (status, _) = send(
            &app,
            "POST",
            "/book",
            Some(json!({ "name": name, "type": book_type })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/book/stat", None).await;
    assert_eq!(status, StatusCode::OK);

    let stats: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(stats.len(), 2);
    let count_of = |book_type: &str| {
        stats
            .iter()
            .find(|s| s["type"] == book_type)
            .and_then(|s| s["count"].as_i64())
    };
    assert_eq!(count_of("COMPUTER"), Some(2));
    assert_eq!(count_of("SCIENCE"), Some(1));
}

#[tokio::test]
async fn test_unknown_book_type_is_rejected() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/book",
        Some(json!({ "name": "Object", "type": "NOVEL" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "VALIDATION_ERROR");
    assert!(error.message.contains("NOVEL"));

    let (_, body) = send(&app, "GET", "/book/stat", None).await;
    let stats: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert!(stats.is_empty());
}

#[tokio::test]
async fn test_negative_age_is_rejected() {
    let app = setup_app();

    let (status, body) = send(&app, "POST", "/user", Some(json!({ "name": "A", "age": -1 }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_age_out_of_range_is_rejected() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/user",
        Some(json!({ "name": "A", "age": 3_000_000_000u32 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_user_without_name_is_rejected() {
    let app = setup_app();

    let (status, body) = send(&app, "DELETE", "/user", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "VALIDATION_ERROR");
}
