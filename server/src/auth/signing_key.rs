//! Token signing key material.
//!
//! # Pre-conditions
//! - The secret must be non-empty.
//!
//! # Post-conditions
//! - `SigningKey` instances are immutable once created.
//!
//! # Invariants
//! - The encoding and decoding keys are always derived from the same secret.
//! - The secret is never printed, not even by `Debug`.

use jsonwebtoken::{DecodingKey, EncodingKey};

/// Secrets shorter than this are accepted but logged as weak.
pub const RECOMMENDED_SECRET_LENGTH: usize = 32;

/// Error returned when key material is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningKeyError {
    /// The HS256 secret is empty.
    EmptySecret,
}

impl std::fmt::Display for SigningKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "HS256 secret must not be empty"),
        }
    }
}

impl std::error::Error for SigningKeyError {}

/// HMAC-SHA256 key used to both sign and verify tokens.
///
/// One key is created per process at startup and shared by every request.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
    secret_length: usize,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("secret_length", &self.secret_length)
            .finish_non_exhaustive()
    }
}

impl SigningKey {
    /// Create a new HS256 signing key.
    ///
    /// # Errors
    /// Returns `SigningKeyError::EmptySecret` if the secret is empty.
    pub fn new_hs256(secret: &[u8]) -> Result<Self, SigningKeyError> {
        if secret.is_empty() {
            return Err(SigningKeyError::EmptySecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            secret_length: secret.len(),
        })
    }

    /// Whether the secret is shorter than `RECOMMENDED_SECRET_LENGTH`.
    #[must_use]
    pub const fn is_weak(&self) -> bool {
        self.secret_length < RECOMMENDED_SECRET_LENGTH
    }

    pub(crate) const fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) const fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }
}
