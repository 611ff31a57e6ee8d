//! Platform keychain provider
//!
//! Thin wrapper over the platform keychain for storing token blobs across
//! macOS (Keychain Access), Windows (Credential Manager), and Linux (Secret
//! Service API).

use async_trait::async_trait;
use keyring::Entry;
use tracing::debug;

use super::{SecureStore, StoreError};

/// Keychain-backed secure store
///
/// All entries are namespaced under one service name so an application's
/// secrets stay grouped in the platform credential UI.
pub struct KeychainStore {
    service_name: String,
}

impl KeychainStore {
    /// Create a provider for a specific service.
    ///
    /// # Arguments
    /// * `service_name` - Service identifier (e.g., "GateKit.tokens")
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    fn entry(&self, key: &str) -> Result<Entry, StoreError> {
        Entry::new(&self.service_name, key).map_err(|e| {
            StoreError::Access(format!("failed to open keychain entry for {key}: {e}"))
        })
    }
}

#[async_trait]
impl SecureStore for KeychainStore {
    async fn set_secret(&self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!(service = %self.service_name, key = %key, "Storing secret in keychain");

        let entry = self.entry(key)?;
        entry.set_password(value).map_err(|e| {
            StoreError::Access(format!("failed to store secret for {key}: {e}"))
        })
    }

    async fn get_secret(&self, key: &str) -> Result<String, StoreError> {
        debug!(service = %self.service_name, key = %key, "Retrieving secret from keychain");

        let entry = self.entry(key)?;
        entry.get_password().map_err(|e| {
            if matches!(e, keyring::Error::NoEntry) {
                StoreError::NotFound
            } else {
                StoreError::Access(format!("failed to retrieve secret for {key}: {e}"))
            }
        })
    }

    async fn delete_secret(&self, key: &str) -> Result<(), StoreError> {
        debug!(service = %self.service_name, key = %key, "Deleting secret from keychain");

        let entry = self.entry(key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StoreError::Access(format!("failed to delete secret for {key}: {e}"))),
        }
    }

    async fn secret_exists(&self, key: &str) -> bool {
        self.entry(key).and_then(|entry| {
            entry.get_password().map_err(|e| StoreError::Access(e.to_string()))
        }).is_ok()
    }
}
