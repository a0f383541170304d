//! Password hashing.
//!
//! Passwords are stored as Argon2id PHC strings
//! (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`). Every digest carries
//! its own salt and cost parameters, so digests produced under an older cost
//! configuration still verify after the configuration changes.
//!
//! # Invariants
//! - Hashing the same password twice yields two different digests.
//! - `verify` never panics and never returns an error; anything that is not
//!   a matching digest is `false`.

use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

/// Salt length in bytes.
const SALT_LENGTH: usize = 16;

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

impl HashCost {
    /// The Argon2 crate's recommended defaults (19 MiB, 2 passes, 1 lane).
    pub const DEFAULT: Self = Self {
        memory_kib: Params::DEFAULT_M_COST,
        iterations: Params::DEFAULT_T_COST,
        parallelism: Params::DEFAULT_P_COST,
    };
}

impl Default for HashCost {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Error returned when hashing fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The cost parameters are outside what Argon2 accepts.
    InvalidCost(String),
    /// The hash computation itself failed.
    Hashing(String),
}

impl std::fmt::Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCost(reason) => write!(f, "invalid password hash cost: {reason}"),
            Self::Hashing(reason) => write!(f, "failed to hash password: {reason}"),
        }
    }
}

impl std::error::Error for HashError {}

/// One-way salted password hasher.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    cost: HashCost,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

impl PasswordHasher {
    /// Create a hasher with the given cost.
    ///
    /// # Errors
    /// Returns `HashError::InvalidCost` if Argon2 rejects the parameters
    /// (for example, memory below 8 KiB per lane or zero iterations).
    pub fn new(cost: HashCost) -> Result<Self, HashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| HashError::InvalidCost(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            cost,
        })
    }

    /// The cost new digests are produced with.
    #[must_use]
    pub const fn cost(&self) -> HashCost {
        self.cost
    }

    /// Hash a password under a fresh random salt.
    ///
    /// # Errors
    /// Returns `HashError::Hashing` if Argon2 fails to produce a digest.
    pub fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let mut salt_bytes = [0u8; SALT_LENGTH];
        rand::rng().fill_bytes(&mut salt_bytes);
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| HashError::Hashing(e.to_string()))?;

        let digest = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| HashError::Hashing(e.to_string()))?;

        Ok(digest.to_string())
    }

    /// Check a password against a stored digest.
    ///
    /// Uses the salt and parameters embedded in `digest`; the final comparison
    /// is constant time. Malformed digests yield `false`.
    #[must_use]
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
