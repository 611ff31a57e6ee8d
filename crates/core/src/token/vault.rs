//! Typed token persistence over the secure store
//!
//! Sessions and the anonymous token are mirrored to the keyed secure store
//! as JSON blobs. Loading is forgiving: a missing or unreadable entry is an
//! absent cache, never an error.

use std::sync::Arc;

use gatekit_common::storage::{SecureStore, StoreError};
use gatekit_domain::types::{AnonymousToken, UserId, UserSessionData};
use tracing::{debug, warn};

const SESSION_KEY_PREFIX: &str = "session.";
const ANONYMOUS_KEY: &str = "anonymous";

/// Secure-store-backed persistence for token state
pub struct TokenVault {
    store: Arc<dyn SecureStore>,
}

impl TokenVault {
    #[must_use]
    pub fn new(store: Arc<dyn SecureStore>) -> Self {
        Self { store }
    }

    fn session_key(user_id: UserId) -> String {
        format!("{SESSION_KEY_PREFIX}{user_id}")
    }

    /// Persist a session blob.
    ///
    /// # Errors
    /// Returns an error if serialization or the store write fails.
    pub async fn store_session(&self, data: &UserSessionData) -> Result<(), StoreError> {
        let blob = serde_json::to_string(data)?;
        self.store.set_secret(&Self::session_key(data.user_id()), &blob).await?;
        debug!(user_id = %data.user_id(), "Session persisted");
        Ok(())
    }

    /// Load a persisted session, treating missing or unreadable entries as
    /// absent.
    pub async fn load_session(&self, user_id: UserId) -> Option<UserSessionData> {
        match self.store.get_secret(&Self::session_key(user_id)).await {
            Ok(blob) => match serde_json::from_str(&blob) {
                Ok(data) => Some(data),
                Err(err) => {
                    warn!(user_id = %user_id, error = %err, "Discarding unreadable session blob");
                    None
                }
            },
            Err(StoreError::NotFound) => None,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "Session load failed, treating as absent");
                None
            }
        }
    }

    /// Remove a persisted session (idempotent).
    ///
    /// # Errors
    /// Returns an error only if the store itself fails.
    pub async fn remove_session(&self, user_id: UserId) -> Result<(), StoreError> {
        self.store.delete_secret(&Self::session_key(user_id)).await
    }

    /// Persist the anonymous token.
    ///
    /// # Errors
    /// Returns an error if serialization or the store write fails.
    pub async fn store_anonymous(&self, token: &AnonymousToken) -> Result<(), StoreError> {
        let blob = serde_json::to_string(token)?;
        self.store.set_secret(ANONYMOUS_KEY, &blob).await?;
        debug!("Anonymous token persisted");
        Ok(())
    }

    /// Load the persisted anonymous token, treating missing or unreadable
    /// entries as absent.
    pub async fn load_anonymous(&self) -> Option<AnonymousToken> {
        match self.store.get_secret(ANONYMOUS_KEY).await {
            Ok(blob) => match serde_json::from_str(&blob) {
                Ok(token) => Some(token),
                Err(err) => {
                    warn!(error = %err, "Discarding unreadable anonymous token blob");
                    None
                }
            },
            Err(StoreError::NotFound) => None,
            Err(err) => {
                warn!(error = %err, "Anonymous token load failed, treating as absent");
                None
            }
        }
    }

    /// Remove the persisted anonymous token (idempotent).
    ///
    /// # Errors
    /// Returns an error only if the store itself fails.
    pub async fn remove_anonymous(&self) -> Result<(), StoreError> {
        self.store.delete_secret(ANONYMOUS_KEY).await
    }
}
