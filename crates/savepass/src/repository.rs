//! Per-user login lists on top of a [`KeyValueStore`].
//!
//! Each user owns one storage slot, `"{prefix}{user_id}"`, holding a JSON
//! array of [`LoginData`] in insertion order.

use tracing::debug;

use crate::error::{Error, Result};
use crate::login::LoginData;
use crate::storage::KeyValueStore;

/// Default prefix for per-user storage keys.
pub const DEFAULT_KEY_PREFIX: &str = "@savepass:logins_user:";

/// Reads and appends login records for a user.
#[derive(Debug)]
pub struct LoginDataRepository<S> {
    store: S,
    key_prefix: String,
}

impl<S: KeyValueStore> LoginDataRepository<S> {
    /// Create a repository using [`DEFAULT_KEY_PREFIX`].
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_prefix(store, DEFAULT_KEY_PREFIX)
    }

    /// Create a repository with a custom key prefix.
    #[must_use]
    pub fn with_prefix(store: S, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The storage key holding `user_id`'s records.
    #[must_use]
    pub fn data_key(&self, user_id: &str) -> String {
        format!("{}{user_id}", self.key_prefix)
    }

    /// All records for a user, oldest first.
    ///
    /// An absent slot is an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the slot does not hold
    /// a list of login records.
    pub async fn list(&self, user_id: &str) -> Result<Vec<LoginData>> {
        let key = self.data_key(user_id);
        self.read_slot(&key).await
    }

    /// Records whose service name contains `query`, ignoring case.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list`].
    pub async fn search(&self, user_id: &str, query: &str) -> Result<Vec<LoginData>> {
        let needle = query.to_lowercase();
        let records = self.list(user_id).await?;
        Ok(records
            .into_iter()
            .filter(|r| r.service_name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Append `record` to the end of a user's list and return the new list.
    ///
    /// This is a single read followed by a single write. Nothing is written
    /// if the read fails; a failed write leaves the previous value in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read, parsed, or written.
    pub async fn append(&self, user_id: &str, record: LoginData) -> Result<Vec<LoginData>> {
        let key = self.data_key(user_id);
        let mut records = self.read_slot(&key).await?;
        records.push(record);

        let serialized = serde_json::to_string(&records)?;
        self.store.set_item(&key, &serialized).await?;

        debug!("Slot {} now holds {} records", key, records.len());
        Ok(records)
    }

    async fn read_slot(&self, key: &str) -> Result<Vec<LoginData>> {
        match self.store.get_item(key).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| Error::corrupt_slot(key, e)),
            None => Ok(Vec::new()),
        }
    }
}
