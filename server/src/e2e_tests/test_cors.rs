//! End-to-end tests for CORS handling.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use crate::e2e_tests::helpers::{ALLOWED_ORIGIN, TestClient};

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri("/auth/login")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .expect("valid request")
}

#[test]
fn test_preflight_from_allowed_origin() {
    let test = TestClient::new();

    let response = test.send(preflight(ALLOWED_ORIGIN));

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&header::HeaderValue::from_static(ALLOWED_ORIGIN))
    );
    assert_eq!(
        response.headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        Some(&header::HeaderValue::from_static("true"))
    );
}

#[test]
fn test_preflight_from_unknown_origin_gets_no_allow_header() {
    let test = TestClient::new();

    let response = test.send(preflight("http://evil.example.com"));

    assert!(
        response
            .headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
