//! Keyed secure-store abstraction
//!
//! The engine persists token blobs through this trait and never talks to a
//! platform keychain directly. [`KeychainStore`] is the production provider;
//! the in-memory doubles live in [`crate::testing`].

use async_trait::async_trait;
use thiserror::Error;

pub mod keychain;

pub use keychain::KeychainStore;

/// Error type for secure-store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// No entry exists under the requested key
    #[error("entry not found")]
    NotFound,

    /// The backing store rejected the operation
    #[error("secure store access failed: {0}")]
    Access(String),

    /// A stored blob could not be encoded or decoded
    #[error("stored entry serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Trait for keyed secret storage
///
/// Abstracts the platform keychain so services can be tested with in-memory
/// implementations and so storage backends stay swappable.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Persist a secret value under a key.
    ///
    /// # Errors
    /// Returns an error if the backing store rejects the write.
    async fn set_secret(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Retrieve a secret value.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no entry exists under `key`.
    async fn get_secret(&self, key: &str) -> Result<String, StoreError>;

    /// Delete a secret value (idempotent).
    ///
    /// # Errors
    /// Returns an error only if the backing store fails; deleting a missing
    /// entry succeeds.
    async fn delete_secret(&self, key: &str) -> Result<(), StoreError>;

    /// Determine whether a secret exists under `key`.
    async fn secret_exists(&self, key: &str) -> bool;
}
