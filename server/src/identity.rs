//! Identity service: login, registration, token validation and profile lookup.
//!
//! The service is stateless between requests; every piece of mutable state
//! lives in the `CredentialStore`. All methods are synchronous and CPU-bound
//! (password hashing dominates), so async callers should run `login` and
//! `register` on a blocking thread.
//!
//! # Invariants
//! - An unknown email and a wrong password produce the same `InvalidCredentials`
//!   error. Which check failed is only visible in debug logs.
//! - Token verification failures never surface as errors; `validate_token`
//!   returns `None`.

use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::store::{CredentialStore, StoreError};
use crate::time::TimeSource;
use crate::types::{AuthResponse, NewUser, UserId, UserRecord};

/// ID of the bootstrap admin record.
pub const ADMIN_USER_ID: &str = "1";

/// Display name of the bootstrap admin record.
pub const ADMIN_USER_NAME: &str = "Admin User";

const DECOY_PASSWORD: &str = "decoy-password";

/// Error returned by login and registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately does not say which.
    InvalidCredentials,
    /// Registration with an email that is already taken.
    UserAlreadyExists,
    /// Hashing, signing or store failure. Not caused by the caller.
    Internal(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::UserAlreadyExists => write!(f, "user already exists"),
            Self::Internal(reason) => write!(f, "internal error: {reason}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail(_) => Self::UserAlreadyExists,
            StoreError::LockPoisoned => Self::Internal(e.to_string()),
        }
    }
}

/// Orchestrates the credential store, password hasher and token issuer.
pub struct IdentityService {
    store: CredentialStore,
    hasher: PasswordHasher,
    issuer: TokenIssuer,
    clock: Arc<dyn TimeSource>,
    /// Digest checked against when the email is unknown, so both login
    /// failure paths cost one hash verification. Computed at construction.
    decoy_digest: String,
}

impl std::fmt::Debug for IdentityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityService")
            .field("store", &self.store)
            .field("hasher", &self.hasher)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl IdentityService {
    /// Create the service and precompute the decoy digest used for unknown
    /// emails.
    ///
    /// # Errors
    /// Returns `AuthError::Internal` if the decoy digest cannot be hashed.
    pub fn new(
        store: CredentialStore,
        hasher: PasswordHasher,
        issuer: TokenIssuer,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, AuthError> {
        let decoy_digest = hasher
            .hash(DECOY_PASSWORD)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(Self {
            store,
            hasher,
            issuer,
            clock,
            decoy_digest,
        })
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Authenticate with email and password and issue a token.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or the
    /// password does not match, `AuthError::Internal` otherwise.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let Some(user) = self.store.find_by_email(email)? else {
            self.burn_decoy_verification(password);
            tracing::debug!("login rejected: no account for the given email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "user logged in");
        self.auth_response(&user)
    }

    /// Create an account and log it in.
    ///
    /// # Errors
    /// Returns `AuthError::UserAlreadyExists` if the email is taken,
    /// `AuthError::Internal` if hashing, storing or signing fails.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError> {
        let password_hash = self
            .hasher
            .hash(password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = self
            .store
            .insert(NewUser {
                email: email.to_string(),
                name: name.to_string(),
                password_hash,
                created_at: self.clock.now_secs(),
            })
            .inspect_err(|e| {
                if matches!(e, StoreError::DuplicateEmail(_)) {
                    tracing::debug!("registration rejected: email already registered");
                }
            })?;

        tracing::info!(user_id = %user.id, "user registered");
        self.auth_response(&user)
    }

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// Returns `None` for malformed, forged or expired tokens and for subjects
    /// that are not in the store.
    #[must_use]
    pub fn validate_token(&self, token: &str) -> Option<UserRecord> {
        let claims = match self.issuer.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(reason = %e, "token rejected");
                return None;
            }
        };

        let user = self.get_user_by_id(&claims.sub);
        if user.is_none() {
            tracing::debug!(user_id = %claims.sub, "token rejected: unknown subject");
        }
        user
    }

    /// Look up a user for an already-authenticated caller.
    #[must_use]
    pub fn get_user_by_id(&self, id: &UserId) -> Option<UserRecord> {
        match self.store.find_by_id(id) {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("user lookup failed: {e}");
                None
            }
        }
    }

    /// Seed the bootstrap admin record with a freshly generated hash.
    ///
    /// # Errors
    /// Returns `AuthError::Internal` if hashing or seeding fails.
    pub fn seed_admin(&self, email: &str, password: &str) -> Result<UserRecord, AuthError> {
        let password_hash = self
            .hasher
            .hash(password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let admin = UserRecord {
            id: UserId::new(ADMIN_USER_ID),
            email: email.to_string(),
            name: ADMIN_USER_NAME.to_string(),
            password_hash,
            created_at: self.clock.now_secs(),
        };
        self.store.seed([admin.clone()])?;

        tracing::info!(user_id = %admin.id, "seeded bootstrap admin");
        Ok(admin)
    }

    fn auth_response(&self, user: &UserRecord) -> Result<AuthResponse, AuthError> {
        let public = user.to_public();
        let access_token = self
            .issuer
            .issue(&public)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(AuthResponse {
            access_token,
            user: public,
        })
    }

    fn burn_decoy_verification(&self, password: &str) {
        let _ = self.hasher.verify(password, &self.decoy_digest);
    }
}
