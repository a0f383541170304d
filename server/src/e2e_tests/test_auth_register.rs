//! End-to-end tests for `POST /auth/register`.

use axum::http::StatusCode;
use serde_json::json;

use crate::e2e_tests::helpers::{TestClient, error_message};

#[test]
fn test_register_creates_user_and_logs_in() {
    let test = TestClient::new();

    let response = test.post_json(
        "/auth/register",
        &json!({ "name": "Test User", "email": "test@example.com", "password": "test123" }),
    );

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user"]["email"], "test@example.com");
    assert_eq!(response.body["user"]["name"], "Test User");
    assert_eq!(response.body["user"]["id"], "2");

    let token = response.body["access_token"]
        .as_str()
        .expect("access_token is a string");
    let profile = test.get("/auth/profile", Some(&format!("Bearer {token}")));
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["name"], "Test User");
}

#[test]
fn test_registered_user_can_log_in() {
    let test = TestClient::new();
    test.post_json(
        "/auth/register",
        &json!({ "name": "Grace", "email": "grace@example.com", "password": "cobol-1959" }),
    );

    let token = test.login_token("grace@example.com", "cobol-1959");

    assert!(!token.is_empty());
}

#[test]
fn test_register_existing_email_is_401() {
    let test = TestClient::new();

    let response = test.post_json(
        "/auth/register",
        &json!({ "name": "Admin", "email": "admin@example.com", "password": "admin123" }),
    );

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&response), "User already exists");
}

#[test]
fn test_register_same_email_twice_with_different_details() {
    let test = TestClient::new();
    let first = test.post_json(
        "/auth/register",
        &json!({ "name": "First", "email": "dup@example.com", "password": "password-one" }),
    );
    assert_eq!(first.status, StatusCode::CREATED);

    let second = test.post_json(
        "/auth/register",
        &json!({ "name": "Second", "email": "dup@example.com", "password": "password-two" }),
    );

    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
    test.login_token("dup@example.com", "password-one");
}

#[test]
fn test_register_validates_fields() {
    let test = TestClient::new();

    let short_name = test.post_json(
        "/auth/register",
        &json!({ "name": "A", "email": "a@example.com", "password": "secret" }),
    );
    assert_eq!(short_name.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&short_name), "name must be at least 2 characters");

    let bad_email = test.post_json(
        "/auth/register",
        &json!({ "name": "Ab", "email": "not-an-email", "password": "secret" }),
    );
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let short_password = test.post_json(
        "/auth/register",
        &json!({ "name": "Ab", "email": "a@example.com", "password": "12345" }),
    );
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);

    // Nothing was stored, so the email is still free.
    let ok = test.post_json(
        "/auth/register",
        &json!({ "name": "Ab", "email": "a@example.com", "password": "123456" }),
    );
    assert_eq!(ok.status, StatusCode::CREATED);
}
