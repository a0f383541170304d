use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::identity::AuthError;

/// Message for every login failure, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
pub const USER_EXISTS_MESSAGE: &str = "User already exists";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error returned by HTTP handlers. Rendered as `{ "error": <message> }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request body is missing, unparsable or fails validation.
    BadRequest(String),
    /// Authentication failed. The message never names the cause.
    Unauthorized(&'static str),
    /// Something failed on our side. Details go to the log only.
    Internal,
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(message) => message.as_str(),
            Self::Unauthorized(message) => *message,
            Self::Internal => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => Self::Unauthorized(INVALID_CREDENTIALS_MESSAGE),
            AuthError::UserAlreadyExists => Self::Unauthorized(USER_EXISTS_MESSAGE),
            AuthError::Internal(reason) => {
                tracing::error!("request failed: {reason}");
                Self::Internal
            }
        }
    }
}
