//! In-memory credential store.
//!
//! Holds every known `UserRecord`, keyed by ID, with a secondary index keyed
//! by email.
//!
//! # Thread Safety
//!
//! All state sits behind a single `RwLock`:
//! - Lookups take the read lock and may run concurrently with each other
//! - `insert` and `seed` take the write lock, so the uniqueness check and the
//!   append happen as one step and readers never see a half-inserted record
//!
//! # Invariants
//!
//! - Exactly one record per email
//! - Every email index entry points at a stored record with that email
//! - Assigned IDs are never reused

use std::collections::HashMap;
use std::sync::RwLock;

use crate::types::{NewUser, UserId, UserRecord};

/// Error returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this email already exists.
    DuplicateEmail(String),
    /// The store lock was poisoned by a panicking writer.
    LockPoisoned,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail(email) => write!(f, "a user with email '{email}' already exists"),
            Self::LockPoisoned => write!(f, "credential store lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug)]
struct StoreState {
    users: HashMap<UserId, UserRecord>,
    ids_by_email: HashMap<String, UserId>,
    /// Next sequence number handed out by `insert`.
    next_sequence: u64,
}

impl StoreState {
    fn remove(&mut self, id: &UserId) {
        if let Some(previous) = self.users.remove(id)
            && self.ids_by_email.get(&previous.email) == Some(id)
        {
            self.ids_by_email.remove(&previous.email);
        }
    }
}

/// Thread-safe store of user records.
#[derive(Debug)]
pub struct CredentialStore {
    state: RwLock<StoreState>,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Create an empty store. The first assigned ID is `"1"`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                users: HashMap::new(),
                ids_by_email: HashMap::new(),
                next_sequence: 1,
            }),
        }
    }

    /// Look up a record by exact, case-sensitive email.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LockPoisoned` if the lock is poisoned.
    pub fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state
            .ids_by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    /// Look up a record by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LockPoisoned` if the lock is poisoned.
    pub fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.users.get(id).cloned())
    }

    /// Store a new user under a freshly assigned ID.
    ///
    /// # Post-conditions
    ///
    /// - On success the returned record is visible to every later lookup.
    /// - Of several concurrent inserts sharing an email, exactly one succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateEmail` if a record already uses the email,
    /// or `StoreError::LockPoisoned` if the lock is poisoned.
    #[allow(clippy::significant_drop_tightening)] // The check and the append share one write lock
    pub fn insert(&self, new_user: NewUser) -> Result<UserRecord, StoreError> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;

        if state.ids_by_email.contains_key(&new_user.email) {
            return Err(StoreError::DuplicateEmail(new_user.email));
        }

        let id = UserId::from_sequence(state.next_sequence);
        state.next_sequence += 1;

        let record = new_user.into_record(id.clone());
        state.ids_by_email.insert(record.email.clone(), id.clone());
        state.users.insert(id, record.clone());

        Ok(record)
    }

    /// Load trusted bootstrap records.
    ///
    /// Bypasses the uniqueness check: a seeded record replaces any existing
    /// record with the same ID or the same email. The ID counter is moved past
    /// every numeric seeded ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LockPoisoned` if the lock is poisoned.
    pub fn seed(&self, records: impl IntoIterator<Item = UserRecord>) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;

        for record in records {
            state.remove(&record.id);
            if let Some(existing) = state.ids_by_email.get(&record.email).cloned() {
                state.remove(&existing);
            }

            if let Some(sequence) = record.id.sequence() {
                state.next_sequence = state.next_sequence.max(sequence.saturating_add(1));
            }

            state
                .ids_by_email
                .insert(record.email.clone(), record.id.clone());
            state.users.insert(record.id.clone(), record);
        }
        drop(state);

        Ok(())
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LockPoisoned` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.users.len())
    }

    /// Whether the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LockPoisoned` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
impl CredentialStore {
    /// Poison the lock by panicking on another thread while holding the write guard.
    pub(crate) fn poison_lock(&self) {
        let result = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = self.state.write();
                    panic!("poisoning credential store lock");
                })
                .join()
        });
        assert!(result.is_err());
        assert!(self.state.is_poisoned());
    }
}
