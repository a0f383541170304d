//! End-to-end tests for `POST /auth/validate`.

use axum::http::StatusCode;
use serde_json::json;

use crate::e2e_tests::helpers::TestClient;

#[test]
fn test_validate_valid_token() {
    let test = TestClient::new();
    let token = test.login_token("admin@example.com", "admin123");

    let response = test.post_json("/auth/validate", &json!({ "token": token }));

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["valid"], true);
    assert_eq!(response.body["user"]["email"], "admin@example.com");
}

#[test]
fn test_validate_invalid_token_is_negative_not_error() {
    let test = TestClient::new();

    let response = test.post_json("/auth/validate", &json!({ "token": "invalid-token" }));

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "valid": false }));
}

#[test]
fn test_validate_blank_token_is_400() {
    let test = TestClient::new();

    let response = test.post_json("/auth/validate", &json!({ "token": "" }));

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
