//! Authorization code exchange and token refresh calls
//!
//! Every call in this service generates its own `state` value, sends it to
//! the identity service, and requires the response to echo it exactly. The
//! call-scoped `state` is independent of the PKCE `state` that started the
//! authorization flow.

use std::sync::Arc;

use gatekit_common::pkce::generate_state;
use gatekit_domain::errors::{AuthFlowError, TokenRefreshError};
use gatekit_domain::types::wire::{AuthCodeExchangeRequest, TokenRefreshRequest};
use gatekit_domain::types::{AccessToken, RefreshToken};
use tracing::{debug, info, warn};

use super::ports::IdentityGateway;
use crate::config::AuthConfig;

/// Result of a successful authorization code exchange
#[derive(Debug, Clone)]
pub struct AuthFlowData {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

/// Result of a successful token refresh
#[derive(Debug, Clone)]
pub struct RefreshTokenData {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

/// Service for the identity service's token endpoints
pub struct TokenExchangeService {
    gateway: Arc<dyn IdentityGateway>,
    config: Arc<AuthConfig>,
}

impl TokenExchangeService {
    /// Create a new exchange service
    #[must_use]
    pub fn new(gateway: Arc<dyn IdentityGateway>, config: Arc<AuthConfig>) -> Self {
        Self { gateway, config }
    }

    /// Exchange an authorization code for a token pair.
    ///
    /// # Arguments
    /// * `code` - Authorization code from the provider or web callback
    /// * `code_verifier` - PKCE verifier generated for the attempt
    /// * `redirect_uri` - Redirect URI the code was issued for
    ///
    /// # Errors
    /// Returns `AuthFlowError::StateMismatch` if the response does not echo
    /// this call's `state`; nothing is cached in that case. Transport
    /// failures are wrapped in `AuthCodeExchangingFailed`.
    pub async fn exchange_auth_code(
        &self,
        code: &str,
        code_verifier: &str,
        redirect_uri: &str,
    ) -> Result<AuthFlowData, AuthFlowError> {
        let state = generate_state();

        debug!("Exchanging authorization code");

        let request = AuthCodeExchangeRequest {
            client_id: self.config.credentials.client_id.clone(),
            device_id: self.config.device_id.0.clone(),
            state: state.clone(),
            code: code.to_string(),
            code_verifier: code_verifier.to_string(),
            redirect_uri: redirect_uri.to_string(),
        };

        let response = self
            .gateway
            .exchange_auth_code(request)
            .await
            .map_err(AuthFlowError::AuthCodeExchangingFailed)?;

        if response.state != state {
            warn!("Authorization code exchange response failed state validation");
            return Err(AuthFlowError::StateMismatch {
                expected: state,
                received: response.state,
            });
        }

        info!(user_id = %response.user_id, "Authorization code exchanged");

        Ok(AuthFlowData {
            access_token: AccessToken::new(
                response.access_token,
                response.user_id,
                response.expires_in,
                response.scope.clone(),
            ),
            refresh_token: RefreshToken::new(
                response.refresh_token,
                response.user_id,
                response.scope,
            ),
        })
    }

    /// Trade a refresh token for a replacement token pair.
    ///
    /// # Errors
    /// Returns `TokenRefreshError::InvalidRefreshToken` when the identity
    /// service rejects the token (so callers can force re-authentication),
    /// `StateMismatch` on a failed `state` echo, and `Unknown` otherwise.
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<RefreshTokenData, TokenRefreshError> {
        let state = generate_state();

        debug!("Refreshing access token");

        let request = TokenRefreshRequest {
            client_id: self.config.credentials.client_id.clone(),
            device_id: self.config.device_id.0.clone(),
            state: state.clone(),
            refresh_token: refresh_token.to_string(),
        };

        let response = self.gateway.refresh_access_token(request).await.map_err(|err| {
            if err.is_invalid_refresh_token() {
                TokenRefreshError::InvalidRefreshToken
            } else {
                TokenRefreshError::Unknown(err.to_string())
            }
        })?;

        if response.state != state {
            warn!("Token refresh response failed state validation");
            return Err(TokenRefreshError::StateMismatch {
                expected: state,
                received: response.state,
            });
        }

        info!(user_id = %response.user_id, "Access token refreshed");

        Ok(RefreshTokenData {
            access_token: AccessToken::new(
                response.access_token,
                response.user_id,
                response.expires_in,
                response.scope.clone(),
            ),
            refresh_token: RefreshToken::new(
                response.refresh_token,
                response.user_id,
                response.scope,
            ),
        })
    }
}
