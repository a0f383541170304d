//! End-to-end tests for bearer-protected routes.

use axum::http::StatusCode;
use serde_json::json;

use crate::e2e_tests::helpers::{TestClient, error_message};
use crate::testing::TEST_TOKEN_LIFETIME_SECS;

#[test]
fn test_profile_with_valid_token() {
    let test = TestClient::new();
    let token = test.login_token("admin@example.com", "admin123");

    let response = test.get("/auth/profile", Some(&format!("Bearer {token}")));

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "id": "1", "email": "admin@example.com", "name": "Admin User" })
    );
}

#[test]
fn test_profile_without_token_is_401() {
    let test = TestClient::new();

    let response = test.get("/auth/profile", None);

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&response), "Unauthorized");
}

#[test]
fn test_profile_with_bad_tokens_is_401() {
    let test = TestClient::new();
    let token = test.login_token("admin@example.com", "admin123");

    for authorization in [
        "Bearer".to_string(),
        "Bearer not-a-token".to_string(),
        format!("Basic {token}"),
        format!("Bearer {token}x"),
        token,
    ] {
        let response = test.get("/auth/profile", Some(&authorization));
        assert_eq!(
            response.status,
            StatusCode::UNAUTHORIZED,
            "'{authorization}' should be rejected"
        );
    }
}

#[test]
fn test_profile_with_expired_token_is_401() {
    let test = TestClient::new();
    let token = test.login_token("admin@example.com", "admin123");
    let authorization = format!("Bearer {token}");

    test.clock.advance(TEST_TOKEN_LIFETIME_SECS - 1);
    assert_eq!(test.get("/auth/profile", Some(&authorization)).status, StatusCode::OK);

    test.clock.advance(1);
    assert_eq!(
        test.get("/auth/profile", Some(&authorization)).status,
        StatusCode::UNAUTHORIZED
    );
}

#[test]
fn test_health() {
    let test = TestClient::new();

    let response = test.get("/health", None);

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "ok" }));
}
