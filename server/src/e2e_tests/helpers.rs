//! Common helpers for end-to-end tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::http::{AppState, build_router};
use crate::testing::{ManualTimeSource, new_seeded_test_service};

pub const ALLOWED_ORIGIN: &str = "http://localhost:4200";

/// A router over a seeded identity service, plus the runtime that drives it.
///
/// The store starts with the bootstrap admin (`admin@example.com` / `admin123`).
pub struct TestClient {
    router: Router,
    pub runtime: tokio::runtime::Runtime,
    pub clock: Arc<ManualTimeSource>,
}

/// Status and parsed JSON body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestClient {
    #[must_use]
    pub fn new() -> Self {
        let (service, clock) = new_seeded_test_service();
        let router = build_router(AppState::new(service), &[ALLOWED_ORIGIN.to_string()]);

        #[allow(clippy::expect_used)]
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create runtime");

        Self {
            router,
            runtime,
            clock,
        }
    }

    /// Send a request and collect the response.
    #[allow(clippy::expect_used)]
    pub fn send(&self, request: Request<Body>) -> TestResponse {
        self.runtime.block_on(async {
            let response = self
                .router
                .clone()
                .oneshot(request)
                .await
                .expect("router is infallible");
            let status = response.status();
            let headers = response.headers().clone();
            let bytes = response
                .into_body()
                .collect()
                .await
                .expect("read response body")
                .to_bytes();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("response body is JSON")
            };

            TestResponse {
                status,
                headers,
                body,
            }
        })
    }

    /// POST a JSON body.
    pub fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        self.send(json_request(path, body.to_string()))
    }

    /// POST a raw body declared as JSON.
    pub fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.send(json_request(path, body.to_string()))
    }

    /// GET with an optional `Authorization` header value.
    #[allow(clippy::expect_used)]
    pub fn get(&self, path: &str, authorization: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        self.send(builder.body(Body::empty()).expect("valid request"))
    }

    /// Log in and return the access token.
    #[allow(clippy::expect_used)]
    pub fn login_token(&self, email: &str, password: &str) -> String {
        let response = self.post_json(
            "/auth/login",
            &serde_json::json!({ "email": email, "password": password }),
        );
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        response.body["access_token"]
            .as_str()
            .expect("access_token is a string")
            .to_string()
    }
}

#[allow(clippy::expect_used)]
fn json_request(path: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("valid request")
}

/// The error message of a `{ "error": ... }` body.
#[must_use]
pub fn error_message(response: &TestResponse) -> &str {
    response.body["error"].as_str().unwrap_or_default()
}
