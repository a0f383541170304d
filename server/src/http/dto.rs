//! Request and response bodies for the auth endpoints.
//!
//! Request bodies reject unknown fields. Each request type has a `validate`
//! method that enforces the field rules before the identity service is called.

use serde::{Deserialize, Serialize};

use crate::types::PublicUser;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;
/// Minimum display name length, in characters.
pub const MIN_NAME_LENGTH: usize = 2;

/// Error returned when a request body breaks a field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidEmail,
    PasswordTooShort,
    NameTooShort,
    EmptyToken,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
            Self::PasswordTooShort => write!(
                f,
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            ),
            Self::NameTooShort => write!(f, "name must be at least {MIN_NAME_LENGTH} characters"),
            Self::EmptyToken => write!(f, "token must not be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// # Errors
    /// Returns the first rule the request breaks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// # Errors
    /// Returns the first rule the request breaks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.chars().count() < MIN_NAME_LENGTH {
            return Err(ValidationError::NameTooShort);
        }
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidateRequest {
    pub token: String,
}

impl ValidateRequest {
    /// # Errors
    /// Returns `ValidationError::EmptyToken` for a blank token.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token.trim().is_empty() {
            return Err(ValidationError::EmptyToken);
        }
        Ok(())
    }
}

/// Result of `POST /auth/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Accepts `local@domain.tld`: one `@`, no whitespace, non-empty local part,
/// and a domain of at least two non-empty dot-separated labels.
fn validate_email(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };

    let well_formed = !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty());

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}
