//! Credentials and token types
//!
//! Tokens are immutable values: a refresh produces a brand-new pair that
//! replaces the old one atomically at the owning session, never a mutation
//! of an existing token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::user::UserId;

/// Immutable, process-wide application credentials
#[derive(Debug, Clone)]
pub struct AppCredentials {
    /// OAuth client id issued by the identity service
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
}

impl AppCredentials {
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: client_secret.into() }
    }
}

/// Opaque installation identifier sent on token calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceId(pub String);

impl DeviceId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User-scoped access token with absolute expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// Bearer token value
    pub value: String,

    /// Owner of the token
    pub user_id: UserId,

    /// Absolute expiration timestamp (UTC)
    pub expires_at: DateTime<Utc>,

    /// Granted scopes (space-separated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl AccessToken {
    /// Create a token whose `expires_at` is calculated from a lifetime in
    /// seconds.
    #[must_use]
    pub fn new(
        value: impl Into<String>,
        user_id: UserId,
        expires_in: i64,
        scope: Option<String>,
    ) -> Self {
        Self {
            value: value.into(),
            user_id,
            expires_at: Utc::now() + chrono::Duration::seconds(expires_in),
            scope,
        }
    }

    /// Check if the token is expired or will expire within the given margin.
    ///
    /// # Arguments
    /// * `margin_seconds` - Seconds before expiry at which the token already
    ///   counts as expired
    #[must_use]
    pub fn is_expired(&self, margin_seconds: i64) -> bool {
        Utc::now() + chrono::Duration::seconds(margin_seconds) >= self.expires_at
    }

    /// Get seconds until token expiration (negative when already expired).
    #[must_use]
    pub fn seconds_until_expiry(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds()
    }

    /// Whether the granted scopes contain `scope`.
    #[must_use]
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope
            .as_deref()
            .is_some_and(|granted| granted.split_whitespace().any(|s| s == scope))
    }
}

/// User-scoped refresh token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Token value presented on refresh calls
    pub value: String,

    /// Owner of the token
    pub user_id: UserId,

    /// Scopes the refreshed access tokens will carry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl RefreshToken {
    #[must_use]
    pub fn new(value: impl Into<String>, user_id: UserId, scope: Option<String>) -> Self {
        Self { value: value.into(), user_id, scope }
    }
}

/// Client-level (non-user) token shared process-wide
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymousToken {
    /// Token value
    pub value: String,

    /// Absolute expiration timestamp (UTC)
    pub expires_at: DateTime<Utc>,
}

impl AnonymousToken {
    /// Create a token whose `expires_at` is calculated from a lifetime in
    /// seconds.
    #[must_use]
    pub fn new(value: impl Into<String>, expires_in: i64) -> Self {
        Self {
            value: value.into(),
            expires_at: Utc::now() + chrono::Duration::seconds(expires_in),
        }
    }

    /// Check if the token is expired or will expire within the given margin.
    #[must_use]
    pub fn is_expired(&self, margin_seconds: i64) -> bool {
        Utc::now() + chrono::Duration::seconds(margin_seconds) >= self.expires_at
    }
}
