//! Port interfaces for identity service access
//!
//! These traits define the boundary between the token services and the
//! network transport. Infrastructure provides the HTTP-backed
//! implementation; tests provide in-memory ones.

use async_trait::async_trait;
use gatekit_domain::errors::ApiError;
use gatekit_domain::types::wire::{
    AnonymousTokenRequest, AnonymousTokenResponse, AuthCodeExchangeRequest,
    AuthCodeExchangeResponse, TokenRefreshRequest, TokenRefreshResponse,
};
use gatekit_domain::types::User;

/// Trait for the identity service token and user endpoints
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Exchange an authorization code for a token pair.
    ///
    /// # Errors
    /// Returns a typed transport error; the caller validates the response's
    /// `state` echo.
    async fn exchange_auth_code(
        &self,
        request: AuthCodeExchangeRequest,
    ) -> Result<AuthCodeExchangeResponse, ApiError>;

    /// Trade a refresh token for a replacement token pair.
    ///
    /// # Errors
    /// Returns a typed transport error; OAuth `invalid_grant` bodies signal
    /// a revoked refresh token.
    async fn refresh_access_token(
        &self,
        request: TokenRefreshRequest,
    ) -> Result<TokenRefreshResponse, ApiError>;

    /// Fetch a client-level (non-user) token.
    ///
    /// # Errors
    /// Returns a typed transport error.
    async fn fetch_anonymous_token(
        &self,
        request: AnonymousTokenRequest,
    ) -> Result<AnonymousTokenResponse, ApiError>;

    /// Fetch the profile of the user the access token belongs to.
    ///
    /// # Errors
    /// Returns a typed transport error; expired tokens classify via
    /// [`ApiError::is_invalid_access_token`].
    async fn fetch_user(&self, access_token: &str) -> Result<User, ApiError>;
}
