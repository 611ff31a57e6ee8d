//! Error types used throughout the SDK

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    OAUTH_ERROR_EXPIRED_TOKEN, OAUTH_ERROR_INVALID_GRANT, OAUTH_ERROR_INVALID_REFRESH_TOKEN,
    OAUTH_ERROR_INVALID_TOKEN,
};
use crate::types::UserId;

/// OAuth error response from the identity service
///
/// Standard OAuth 2.0 error response format (RFC 6749 §5.2).
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthErrorBody {
    pub error: String,
    pub error_description: Option<String>,
}

impl fmt::Display for OAuthErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_description {
            Some(desc) => write!(f, "{}: {}", self.error, desc),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for OAuthErrorBody {}

/// Typed transport-level failure surfaced by the network gateways
///
/// Gateways translate HTTP/transport outcomes into this enum so the core
/// services never see raw client errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request never produced a response (DNS, TLS, connection reset, ...)
    #[error("network error: {0}")]
    Network(String),

    /// Response arrived with a non-success status and no OAuth error body
    #[error("unexpected status {code}: {body}")]
    Status { code: u16, body: String },

    /// Identity service rejected the call with an OAuth error body
    #[error("identity service error: {0}")]
    OAuth(OAuthErrorBody),

    /// Response body could not be decoded
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Whether this failure signals an invalid or expired access token.
    ///
    /// This is the classification the expired-token interceptor keys on:
    /// a 401 status or an OAuth `invalid_token`/`expired_token` code.
    #[must_use]
    pub fn is_invalid_access_token(&self) -> bool {
        match self {
            Self::Status { code: 401, .. } => true,
            Self::OAuth(body) => {
                body.error == OAUTH_ERROR_INVALID_TOKEN || body.error == OAUTH_ERROR_EXPIRED_TOKEN
            }
            _ => false,
        }
    }

    /// Whether this failure signals a revoked or otherwise unusable refresh
    /// token.
    #[must_use]
    pub fn is_invalid_refresh_token(&self) -> bool {
        matches!(
            self,
            Self::OAuth(body)
                if body.error == OAUTH_ERROR_INVALID_GRANT
                    || body.error == OAUTH_ERROR_INVALID_REFRESH_TOKEN
        )
    }
}

/// Error type for the authorization flow (provider handoff + code exchange)
#[derive(Error, Debug)]
pub enum AuthFlowError {
    /// State parameter round-trip failed (possible CSRF / code injection)
    #[error("state mismatch: expected {expected}, received {received}")]
    StateMismatch { expected: String, received: String },

    /// Authorization code exchange failed at the transport level
    #[error("authorization code exchange failed")]
    AuthCodeExchangingFailed(#[source] ApiError),

    /// The presenting surface was dismissed before the attempt completed
    #[error("authorization was cancelled")]
    Cancelled,

    /// Anything the taxonomy does not name specifically
    #[error("authorization failed: {0}")]
    Unknown(String),
}

/// Error type for token refresh operations
///
/// `InvalidRefreshToken` is kept distinct from `Unknown` so callers can
/// decide whether to force re-authentication.
#[derive(Error, Debug)]
pub enum TokenRefreshError {
    /// The refresh token was rejected by the identity service
    #[error("refresh token is invalid or revoked")]
    InvalidRefreshToken,

    /// State parameter round-trip failed
    #[error("state mismatch: expected {expected}, received {received}")]
    StateMismatch { expected: String, received: String },

    /// No live session exists for the user
    #[error("no session for user {0}")]
    NoSession(UserId),

    /// Refresh failed for an unclassified reason
    #[error("token refresh failed: {0}")]
    Unknown(String),
}

/// Error surfaced by an intercepted authenticated call
///
/// When the interceptor's forced refresh fails, the refresh error is
/// surfaced instead of the original request's error.
#[derive(Error, Debug)]
pub enum AuthorizedCallError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Refresh(#[from] TokenRefreshError),
}

/// Error type for group-subscription eligibility
#[derive(Error, Debug)]
pub enum EligibilityError {
    /// The user is already a member of the group
    #[error("user is already a member of the group")]
    AlreadyMember,

    /// The group does not accept direct subscriptions
    #[error("the group is closed")]
    GroupClosed,

    /// Service accounts are not eligible for subscription prompts
    #[error("the group is a service account")]
    IsServiceAccount,

    /// The access token lacks the scope required for group operations
    #[error("access token is missing the groups scope")]
    ScopeMissing,

    /// The rolling-window display limit for this user has been reached
    #[error("local subscription display limit reached")]
    LocalLimitReached,

    /// Subscription is disallowed for reasons other than the above
    #[error("subscription is not allowed for this group")]
    SubscriptionNotAllowed,

    /// One of the aggregate's network calls failed
    #[error(transparent)]
    Fetch(#[from] AuthorizedCallError),
}

impl From<ApiError> for EligibilityError {
    fn from(err: ApiError) -> Self {
        Self::Fetch(AuthorizedCallError::Api(err))
    }
}
