//! Authentication primitives.
//!
//! This module provides password hashing and token issuance/verification for
//! the identity service.
//!
//! # Pre-conditions
//! - The signing key must be created from a non-empty secret.
//!
//! # Post-conditions
//! - Key material and hash cost are immutable once loaded.
//!
//! # Invariants
//! - Neither raw passwords nor signing secrets are ever logged or displayed.

pub mod jwt;
pub mod password;
pub mod signing_key;

pub use jwt::{Claims, SigningError, TokenError, TokenIssuer};
pub use password::{HashCost, HashError, PasswordHasher};
pub use signing_key::{SigningKey, SigningKeyError};
