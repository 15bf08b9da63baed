//! Login route tests: body decoding, validation and token issuance

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use shiftboard::api::{create_router, AppState};
use shiftboard::auth::{hash_password_with_cost, LoginResponse, TokenService};
use shiftboard::config::AuthConfig;
use shiftboard::store::{MemoryShiftStore, MemoryUserStore, User};
use std::sync::Arc;
use tower::ServiceExt;

const PASSWORD: &str = "correct-horse-battery";

fn tokens() -> TokenService {
    TokenService::new(&AuthConfig {
        jwt_secret: "rota-test-secret".to_string(),
        token_max_age_hours: 2,
    })
}

fn app() -> Router {
    let hash = hash_password_with_cost(PASSWORD, 4).unwrap();
    let store = MemoryUserStore::with_users([
        User::new(7, "sam", "sam@example.com", hash),
        User::new(8, "broken", "broken@example.com", "not-a-bcrypt-hash"),
    ]);
    create_router(Arc::new(AppState::new(tokens(), Arc::new(store), Arc::new(MemoryShiftStore::new()))))
}

async fn post_login(body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_login_issues_verifiable_token() {
    let body = json!({ "email": "sam@example.com", "password": PASSWORD }).to_string();
    let (status, body) = post_login(&body).await;
    assert_eq!(status, StatusCode::OK);

    let login: LoginResponse = serde_json::from_value(body).unwrap();
    assert_eq!(login.user.id, 7);
    assert_eq!(login.expires_in, 2 * 3600);
    assert_eq!(tokens().verify(&login.token).unwrap(), 7);
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let body = json!({ "email": "SAM@example.com", "password": PASSWORD }).to_string();
    let (status, _) = post_login(&body).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let body = json!({ "email": "sam@example.com", "password": "wrong-password" }).to_string();
    let (status, body) = post_login(&body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "status": 401, "message": "invalid credentials" }));
}

#[tokio::test]
async fn test_login_unknown_email() {
    let body = json!({ "email": "nobody@example.com", "password": PASSWORD }).to_string();
    let (status, body) = post_login(&body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid credentials");
}

#[tokio::test]
async fn test_login_corrupt_stored_hash() {
    let body = json!({ "email": "broken@example.com", "password": PASSWORD }).to_string();
    let (status, _) = post_login(&body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_login_missing_field_is_validation_error() {
    let (status, body) = post_login(r#"{"password": "correct-horse-battery"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "status": 400, "message": "email is required" }));
}

#[tokio::test]
async fn test_login_invalid_email_is_validation_error() {
    let body = json!({ "email": "sam", "password": PASSWORD }).to_string();
    let (status, body) = post_login(&body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "email must be a valid email address");
}

#[tokio::test]
async fn test_login_short_password_is_validation_error() {
    let body = json!({ "email": "sam@example.com", "password": "short" }).to_string();
    let (status, body) = post_login(&body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "password must be at least 8 characters long");
}

#[tokio::test]
async fn test_login_wrong_typed_field_names_field_and_value() {
    let (status, body) = post_login(r#"{"email": "sam@example.com", "password": 12345678}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Expected password to be a string, got integer `12345678`"
    );
}

#[tokio::test]
async fn test_login_malformed_json() {
    let (status, body) = post_login(r#"{"email": "sam@exa"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "error decoding JSON request body");
}

#[tokio::test]
async fn test_login_empty_body() {
    let (status, body) = post_login("").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}
