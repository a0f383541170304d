//! User records and their public projection.

use serde::Serialize;

use super::UserId;

/// A stored user.
///
/// # Invariants
///
/// - `password_hash` is always output of the password hasher, never a raw password.
/// - `email` is unique within a credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    /// Case-sensitive unique key.
    pub email: String,
    /// Display name.
    pub name: String,
    pub password_hash: String,
    /// Seconds since Unix epoch.
    pub created_at: u64,
}

impl UserRecord {
    /// The fields of this record that may leave the process.
    #[must_use]
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// A user that has not been stored yet. The store assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: u64,
}

impl NewUser {
    #[must_use]
    pub(crate) fn into_record(self, id: UserId) -> UserRecord {
        UserRecord {
            id,
            email: self.email,
            name: self.name,
            password_hash: self.password_hash,
            created_at: self.created_at,
        }
    }
}

/// Public view of a user, safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
}
