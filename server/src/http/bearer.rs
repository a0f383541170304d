use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use super::AppState;
use super::error::{ApiError, UNAUTHORIZED_MESSAGE};
use crate::types::UserRecord;

/// Extractor that resolves an `Authorization: Bearer <token>` header to a user.
///
/// A missing header, another scheme, or a token the identity service does not
/// accept all reject the request with 401.
#[derive(Debug)]
pub struct AuthenticatedUser(pub UserRecord);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(ApiError::Unauthorized(UNAUTHORIZED_MESSAGE))?;

        state
            .identity
            .validate_token(token)
            .map(AuthenticatedUser)
            .ok_or(ApiError::Unauthorized(UNAUTHORIZED_MESSAGE))
    }
}

/// Extract the token from a `Bearer` authorization value. The scheme is
/// matched case-insensitively.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
