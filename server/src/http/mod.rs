//! HTTP surface of the identity server.
//!
//! # Routes
//!
//! - `POST /auth/login` → `{ access_token, user }`, 401 on bad credentials
//! - `POST /auth/register` → 201 `{ access_token, user }`, 401 if the email is taken
//! - `GET /auth/profile` (bearer) → public user, 401 without a valid token
//! - `POST /auth/validate` → `{ valid, user? }`
//! - `GET /health` → `{ status: "ok" }`
//!
//! Malformed or invalid request bodies are rejected with 400.

mod bearer;
mod dto;
mod error;
mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use bearer::AuthenticatedUser;
pub use dto::{
    LoginRequest, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH, RegisterRequest, ValidateRequest,
    ValidateResponse, ValidationError,
};
pub use error::ApiError;

use crate::identity::IdentityService;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
}

impl AppState {
    #[must_use]
    pub fn new(identity: IdentityService) -> Self {
        Self {
            identity: Arc::new(identity),
        }
    }
}

/// Build the router with CORS restricted to `cors_origins`.
///
/// Origins that are not valid header values, and the `*` wildcard, are
/// skipped with a warning.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/auth/login", post(handlers::login))
        .route("/auth/register", post(handlers::register))
        .route("/auth/profile", get(handlers::profile))
        .route("/auth/validate", post(handlers::validate))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(cors_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(_) if origin == "*" => {
                tracing::warn!("ignoring wildcard CORS origin; credentials are allowed");
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
