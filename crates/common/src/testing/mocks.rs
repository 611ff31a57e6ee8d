//! Mock implementations of common traits
//!
//! Provides mock objects for testing purposes.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::storage::{SecureStore, StoreError};

/// In-memory secure store for deterministic tests
///
/// # Examples
///
/// ```
/// use gatekit_common::storage::SecureStore;
/// use gatekit_common::testing::MemorySecureStore;
///
/// # tokio_test::block_on(async {
/// let store = MemorySecureStore::new();
/// store.set_secret("key", "value").await.unwrap();
/// assert_eq!(store.get_secret("key").await.unwrap(), "value");
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemorySecureStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySecureStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries (test inspection helper).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl SecureStore for MemorySecureStore {
    async fn set_secret(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_secret(&self, key: &str) -> Result<String, StoreError> {
        self.entries.lock().get(key).cloned().ok_or(StoreError::NotFound)
    }

    async fn delete_secret(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(key);
        Ok(())
    }

    async fn secret_exists(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }
}

/// Secure store whose every operation fails
///
/// Used to verify that callers treat an unreadable store as an absent
/// cache instead of an error.
#[derive(Debug, Default)]
pub struct FailingSecureStore;

impl FailingSecureStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SecureStore for FailingSecureStore {
    async fn set_secret(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Access("store unavailable".to_string()))
    }

    async fn get_secret(&self, _key: &str) -> Result<String, StoreError> {
        Err(StoreError::Access("store unavailable".to_string()))
    }

    async fn delete_secret(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Access("store unavailable".to_string()))
    }

    async fn secret_exists(&self, _key: &str) -> bool {
        false
    }
}
