//! User and session data types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::tokens::{AccessToken, RefreshToken};

/// Identifier of a user at the identity service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User profile as returned by the identity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Aggregate state of one authenticated session
///
/// The token pair is replaced as a whole on refresh; the cached `User` is
/// filled in by user-fetch and may lag behind the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSessionData {
    /// Stable identifier of this session instance
    pub session_id: Uuid,

    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,

    /// Cached user profile, absent until the first user-fetch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl UserSessionData {
    /// Create session data for a freshly exchanged token pair.
    #[must_use]
    pub fn new(access_token: AccessToken, refresh_token: RefreshToken) -> Self {
        Self { session_id: Uuid::new_v4(), access_token, refresh_token, user: None }
    }

    /// Owner of the session.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.access_token.user_id
    }
}
