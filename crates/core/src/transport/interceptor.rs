//! Expired-token interceptor
//!
//! Wraps authenticated requests so an invalid/expired-token response
//! triggers one forced refresh followed by one replay with the new token.
//! Purely reactive: a request that succeeds first try never touches the
//! refresh machinery, and no request is replayed more than once.

use std::future::Future;
use std::sync::Arc;

use gatekit_domain::errors::{ApiError, AuthorizedCallError};
use tracing::{debug, warn};

use crate::session::Authorization;
use crate::token::refresh::TokenRefreshCoordinator;

/// Retries an authenticated request once after refreshing an expired token
pub struct ExpiredTokenInterceptor {
    refresher: Arc<TokenRefreshCoordinator>,
}

impl ExpiredTokenInterceptor {
    #[must_use]
    pub fn new(refresher: Arc<TokenRefreshCoordinator>) -> Self {
        Self { refresher }
    }

    /// Execute `send` with the current bearer token, refreshing and
    /// replaying exactly once on an expired-token failure.
    ///
    /// `send` receives the bearer value and performs the actual request; it
    /// is invoked at most twice.
    ///
    /// # Errors
    /// - First response not classified as an expired token: surfaced as-is.
    /// - Refresh failure: the refresh's error is surfaced, not the original
    ///   request's.
    /// - Replay failure: the replay's error is surfaced without further
    ///   retries.
    pub async fn execute<T, F, Fut>(
        &self,
        authorization: &Authorization,
        send: F,
    ) -> Result<T, AuthorizedCallError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let token = authorization.bearer();

        match send(token).await {
            Ok(value) => Ok(value),
            Err(err) if err.is_invalid_access_token() => match authorization {
                Authorization::UserSession(session) => {
                    debug!(
                        user_id = %session.user_id(),
                        "Access token rejected, refreshing and replaying once"
                    );
                    let (access, _) =
                        self.refresher.get_fresh_access_token(session, true).await?;
                    send(access.value).await.map_err(AuthorizedCallError::Api)
                }
                Authorization::ExternalAccessToken(_) => {
                    warn!("External access token rejected; no refresh path available");
                    Err(AuthorizedCallError::Api(err))
                }
            },
            Err(err) => Err(AuthorizedCallError::Api(err)),
        }
    }
}
