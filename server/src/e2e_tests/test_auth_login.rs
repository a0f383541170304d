//! End-to-end tests for `POST /auth/login`.

use axum::http::StatusCode;
use serde_json::json;

use crate::e2e_tests::helpers::{TestClient, error_message};

#[test]
fn test_admin_login_returns_token_and_user() {
    let test = TestClient::new();

    let response = test.post_json(
        "/auth/login",
        &json!({ "email": "admin@example.com", "password": "admin123" }),
    );

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(
        response.body["user"],
        json!({ "id": "1", "email": "admin@example.com", "name": "Admin User" })
    );
}

#[test]
fn test_login_response_never_contains_password_material() {
    let test = TestClient::new();

    let response = test.post_json(
        "/auth/login",
        &json!({ "email": "admin@example.com", "password": "admin123" }),
    );
    let raw = response.body.to_string();

    assert!(!raw.contains("admin123"));
    assert!(!raw.contains("argon2"));
    assert!(response.body["user"].get("password_hash").is_none());
}

#[test]
fn test_wrong_password_and_unknown_email_get_identical_401() {
    let test = TestClient::new();

    let wrong_password = test.post_json(
        "/auth/login",
        &json!({ "email": "admin@example.com", "password": "wrong-password" }),
    );
    let unknown_email = test.post_json(
        "/auth/login",
        &json!({ "email": "invalid@example.com", "password": "wrong-password" }),
    );

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(error_message(&wrong_password), "Invalid credentials");
}

#[test]
fn test_login_rejects_invalid_body() {
    let test = TestClient::new();

    let not_json = test.post_raw("/auth/login", "{not json");
    assert_eq!(not_json.status, StatusCode::BAD_REQUEST);

    let missing_field = test.post_json("/auth/login", &json!({ "email": "admin@example.com" }));
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);

    let extra_field = test.post_json(
        "/auth/login",
        &json!({ "email": "admin@example.com", "password": "admin123", "role": "root" }),
    );
    assert_eq!(extra_field.status, StatusCode::BAD_REQUEST);
}

#[test]
fn test_login_validates_fields() {
    let test = TestClient::new();

    let bad_email = test.post_json(
        "/auth/login",
        &json!({ "email": "admin", "password": "admin123" }),
    );
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&bad_email), "email must be a valid email address");

    let short_password = test.post_json(
        "/auth/login",
        &json!({ "email": "admin@example.com", "password": "adm" }),
    );
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&short_password),
        "password must be at least 6 characters"
    );
}
