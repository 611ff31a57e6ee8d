//! Registry of live sessions keyed by user id

use std::collections::HashMap;
use std::sync::Arc;

use gatekit_domain::types::{UserId, UserSessionData};
use parking_lot::RwLock;
use tracing::{debug, info};

use super::session::UserSession;

/// Holds the live [`UserSession`] objects
///
/// Sessions are created on first successful authorization and removed
/// synchronously on logout. Removal does not wait for in-flight refreshes:
/// callers holding the session's `Arc` keep operating on it, the registry
/// just stops handing it out.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<UserId, Arc<UserSession>>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session for its user, replacing any previous one.
    pub fn insert(&self, data: UserSessionData) -> Arc<UserSession> {
        let user_id = data.user_id();
        let session = Arc::new(UserSession::new(data));
        self.sessions.write().insert(user_id, session.clone());
        info!(user_id = %user_id, "Session registered");
        session
    }

    /// Look up the live session for a user.
    #[must_use]
    pub fn get(&self, user_id: UserId) -> Option<Arc<UserSession>> {
        self.sessions.read().get(&user_id).cloned()
    }

    /// Remove a user's session synchronously.
    ///
    /// Returns the removed session so callers can finish tearing it down.
    pub fn remove(&self, user_id: UserId) -> Option<Arc<UserSession>> {
        let removed = self.sessions.write().remove(&user_id);
        if removed.is_some() {
            debug!(user_id = %user_id, "Session removed from registry");
        }
        removed
    }

    /// Whether a session exists for the user.
    #[must_use]
    pub fn contains(&self, user_id: UserId) -> bool {
        self.sessions.read().contains_key(&user_id)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether the registry holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Ids of all users with a live session.
    #[must_use]
    pub fn user_ids(&self) -> Vec<UserId> {
        self.sessions.read().keys().copied().collect()
    }
}
