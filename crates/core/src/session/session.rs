//! One live authenticated session

use std::sync::Arc;

use gatekit_domain::types::{AccessToken, RefreshToken, User, UserId, UserSessionData};
use parking_lot::RwLock;
use uuid::Uuid;

/// Live wrapper around one session's data
///
/// Multiple API calls may share one session. The token pair is replaced as
/// a whole under the data lock; the lock is never held across an await.
/// Refresh issuance is serialized by a separate per-session gate so at most
/// one refresh is in flight at a time.
pub struct UserSession {
    data: RwLock<UserSessionData>,
    refresh_gate: tokio::sync::Mutex<()>,
}

impl UserSession {
    #[must_use]
    pub fn new(data: UserSessionData) -> Self {
        Self { data: RwLock::new(data), refresh_gate: tokio::sync::Mutex::new(()) }
    }

    /// Owner of the session.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.data.read().user_id()
    }

    /// Stable identifier of this session instance.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.data.read().session_id
    }

    /// Current access token.
    #[must_use]
    pub fn access_token(&self) -> AccessToken {
        self.data.read().access_token.clone()
    }

    /// Current token pair, read consistently under one lock.
    #[must_use]
    pub fn token_pair(&self) -> (AccessToken, RefreshToken) {
        let data = self.data.read();
        (data.access_token.clone(), data.refresh_token.clone())
    }

    /// Cached user profile, if fetched.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.data.read().user.clone()
    }

    /// Full copy of the session data (for persistence).
    #[must_use]
    pub fn snapshot(&self) -> UserSessionData {
        self.data.read().clone()
    }

    /// Atomically replace the token pair.
    pub fn replace_tokens(&self, access_token: AccessToken, refresh_token: RefreshToken) {
        let mut data = self.data.write();
        data.access_token = access_token;
        data.refresh_token = refresh_token;
    }

    /// Update the cached user profile.
    pub fn set_user(&self, user: User) {
        self.data.write().user = Some(user);
    }

    /// Per-session gate serializing refresh issuance.
    pub(crate) fn refresh_gate(&self) -> &tokio::sync::Mutex<()> {
        &self.refresh_gate
    }
}

impl std::fmt::Debug for UserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSession")
            .field("user_id", &self.user_id())
            .field("session_id", &self.session_id())
            .finish()
    }
}

/// The two ways a caller can present credentials to downstream services
#[derive(Debug, Clone)]
pub enum Authorization {
    /// A bare token obtained outside the session machinery; cannot refresh
    ExternalAccessToken(String),

    /// A live session; expired tokens refresh through the interceptor
    UserSession(Arc<UserSession>),
}

impl Authorization {
    /// Bearer value to attach to the next request.
    #[must_use]
    pub fn bearer(&self) -> String {
        match self {
            Self::ExternalAccessToken(token) => token.clone(),
            Self::UserSession(session) => session.access_token().value,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the live session wrapper.
    use super::*;

    fn sample_session() -> UserSession {
        let access = AccessToken::new("access-1", UserId(1), 3600, None);
        let refresh = RefreshToken::new("refresh-1", UserId(1), None);
        UserSession::new(UserSessionData::new(access, refresh))
    }

    /// Validates `UserSession::replace_tokens` behavior for the atomic
    /// replacement scenario.
    ///
    /// Assertions:
    /// - Confirms both halves of the pair change together.
    #[test]
    fn test_replace_tokens() {
        let session = sample_session();

        session.replace_tokens(
            AccessToken::new("access-2", UserId(1), 3600, None),
            RefreshToken::new("refresh-2", UserId(1), None),
        );

        let (access, refresh) = session.token_pair();
        assert_eq!(access.value, "access-2");
        assert_eq!(refresh.value, "refresh-2");
    }

    /// Validates `Authorization::bearer` behavior for both credential kinds.
    ///
    /// Assertions:
    /// - Confirms an external token is returned verbatim.
    /// - Confirms a session authorization reads the current access token.
    #[test]
    fn test_authorization_bearer() {
        let external = Authorization::ExternalAccessToken("ext".to_string());
        assert_eq!(external.bearer(), "ext");

        let session = Arc::new(sample_session());
        let auth = Authorization::UserSession(session.clone());
        assert_eq!(auth.bearer(), "access-1");

        session.replace_tokens(
            AccessToken::new("access-2", UserId(1), 3600, None),
            RefreshToken::new("refresh-2", UserId(1), None),
        );
        assert_eq!(auth.bearer(), "access-2");
    }
}
