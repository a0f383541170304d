//! JWT issuance and verification.
//!
//! Tokens are compact HS256 JWTs carrying the subject's ID, email and display
//! name plus `iat`/`exp` timestamps in seconds since Unix epoch.
//!
//! # Pre-conditions
//! - The signing key was created from a non-empty secret.
//!
//! # Post-conditions
//! - `verify` accepts exactly the tokens `issue` produced with the same key,
//!   until their expiry.
//! - On failure, the cause is one of `Malformed`, `BadSignature` or `Expired`.
//!
//! # Invariants
//! - The signature is checked before expiry, so a forged token is always
//!   reported as `BadSignature` even when its `exp` is in the past.
//! - A token is expired when `now >= exp`; expiry is evaluated against the
//!   issuer's `TimeSource`, not by `jsonwebtoken`, so the boundary is exact.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::SigningKey;
use crate::time::TimeSource;
use crate::types::{PublicUser, UserId};

/// Claims embedded in a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject claim containing the user ID.
    pub sub: UserId,
    pub email: String,
    pub name: String,
    /// Issued-at, seconds since Unix epoch.
    pub iat: u64,
    /// Expiry, seconds since Unix epoch.
    pub exp: u64,
}

/// Error returned when token verification fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// The token cannot be parsed into header, payload and signature, or the
    /// payload does not hold the expected claims.
    Malformed,
    /// The signature was not produced by this process's key.
    BadSignature,
    /// The token is past its expiry.
    Expired,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed token"),
            Self::BadSignature => write!(f, "invalid token signature"),
            Self::Expired => write!(f, "token has expired"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Error returned when a token cannot be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningError(String);

impl std::fmt::Display for SigningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to sign token: {}", self.0)
    }
}

impl std::error::Error for SigningError {}

/// Signs and verifies tokens with a process-wide key.
#[derive(Clone)]
pub struct TokenIssuer {
    key: SigningKey,
    lifetime_secs: u64,
    clock: Arc<dyn TimeSource>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("key", &self.key)
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create an issuer whose tokens expire `lifetime_secs` after issuance.
    #[must_use]
    pub fn new(key: SigningKey, lifetime_secs: u64, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            key,
            lifetime_secs,
            clock,
        }
    }

    /// Issue a token for the given user, valid from now for the configured lifetime.
    ///
    /// # Errors
    /// Returns `SigningError` if the claims cannot be encoded or signed.
    pub fn issue(&self, user: &PublicUser) -> Result<String, SigningError> {
        let iat = self.clock.now_secs();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            iat,
            exp: iat.saturating_add(self.lifetime_secs),
        };

        self.sign(&claims)
    }

    /// Sign the given claims as they are.
    ///
    /// # Errors
    /// Returns `SigningError` if the claims cannot be encoded or signed.
    pub fn sign(&self, claims: &Claims) -> Result<String, SigningError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, self.key.encoding_key()).map_err(|e| SigningError(e.to_string()))
    }

    /// Verify a token and return its claims unchanged.
    ///
    /// # Errors
    /// Returns `TokenError::Malformed`, `TokenError::BadSignature` or
    /// `TokenError::Expired`, checked in that order.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        if token.split('.').count() != 3 {
            return Err(TokenError::Malformed);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against our own clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, self.key.decoding_key(), &validation)
            .map_err(map_jwt_error)?
            .claims;

        if claims.sub.as_str().is_empty() {
            return Err(TokenError::Malformed);
        }

        if self.clock.now_secs() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

/// Maps jsonwebtoken errors to our TokenError type.
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}
