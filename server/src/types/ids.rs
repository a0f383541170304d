//! ID types for user records.
//!
//! This module provides a newtype wrapper for user IDs so that an ID can
//! never be confused with an email or a display name at a call site.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a user record.
///
/// IDs are opaque strings. Registered users receive decimal sequence numbers
/// assigned by the credential store; seeded records may carry any string.
///
/// # Invariants
///
/// - An ID is never reused within the lifetime of a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user ID from a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use identity_server::types::UserId;
    /// let id = UserId::new("42");
    /// assert_eq!(id.as_str(), "42");
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a user ID from a sequence number.
    #[must_use]
    pub fn from_sequence(n: u64) -> Self {
        Self(n.to_string())
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The sequence number encoded in this ID, if it is a decimal number.
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
