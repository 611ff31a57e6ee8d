//! Wire DTOs for the identity service token endpoints
//!
//! Requests carry `client_id`, `device_id`, and `state`; responses echo the
//! `state` so callers can validate the round-trip. The transport itself is
//! opaque to the core services.

use serde::{Deserialize, Serialize};

use crate::types::user::UserId;

/// Request body for exchanging an authorization code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCodeExchangeRequest {
    pub client_id: String,
    pub device_id: String,
    pub state: String,
    pub code: String,
    pub code_verifier: String,
    pub redirect_uri: String,
}

/// Response carrying the freshly issued token pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCodeExchangeResponse {
    /// Echo of the request's `state`; must match exactly
    pub state: String,
    pub user_id: UserId,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Request body for refreshing an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRefreshRequest {
    pub client_id: String,
    pub device_id: String,
    pub state: String,
    pub refresh_token: String,
}

/// Response carrying the replacement token pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRefreshResponse {
    /// Echo of the request's `state`; must match exactly
    pub state: String,
    pub user_id: UserId,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Request body for the client-level anonymous token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymousTokenRequest {
    pub client_id: String,
    pub device_id: String,
}

/// Response carrying the anonymous token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymousTokenResponse {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}
