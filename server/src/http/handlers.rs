use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use super::AppState;
use super::bearer::AuthenticatedUser;
use super::dto::{LoginRequest, RegisterRequest, ValidateRequest, ValidateResponse};
use super::error::ApiError;
use crate::identity::{AuthError, IdentityService};
use crate::types::{AuthResponse, PublicUser};

/// POST /auth/login
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let response = run_blocking(&state, move |identity| {
        identity.login(&request.email, &request.password)
    })
    .await?;

    Ok(Json(response))
}

/// POST /auth/register
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let response = run_blocking(&state, move |identity| {
        identity.register(&request.name, &request.email, &request.password)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /auth/profile
pub async fn profile(AuthenticatedUser(user): AuthenticatedUser) -> Json<PublicUser> {
    Json(user.to_public())
}

/// POST /auth/validate
///
/// Always 200 for a well-formed body; `valid` says whether the token resolves to a user.
pub async fn validate(
    State(state): State<AppState>,
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = state.identity.validate_token(request.token.trim());

    Ok(Json(ValidateResponse {
        valid: user.is_some(),
        user: user.map(|u| u.to_public()),
    }))
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Run a password-hashing operation on the blocking pool.
#[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected
async fn run_blocking<F>(state: &AppState, operation: F) -> Result<AuthResponse, ApiError>
where
    F: FnOnce(&IdentityService) -> Result<AuthResponse, AuthError> + Send + 'static,
{
    let identity = Arc::clone(&state.identity);
    tokio::task::spawn_blocking(move || operation(&identity))
        .await
        .map_err(|e| {
            tracing::error!("identity task failed: {e}");
            ApiError::Internal
        })?
        .map_err(ApiError::from)
}
