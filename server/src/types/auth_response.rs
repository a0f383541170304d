use serde::Serialize;

use super::PublicUser;

/// Envelope returned by a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponse {
    /// Signed bearer token.
    pub access_token: String,
    pub user: PublicUser,
}
