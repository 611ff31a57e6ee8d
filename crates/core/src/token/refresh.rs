//! Expiry-aware access token refresh
//!
//! Decides whether a session's cached access token is fresh enough to hand
//! out and, when it is not, issues a refresh. Refresh issuance is
//! single-flight per session: concurrent callers for the same stale session
//! produce exactly one network call, and everyone observes the replacement
//! pair.

use std::sync::Arc;

use gatekit_domain::constants::TOKEN_EXPIRY_MARGIN_SECS;
use gatekit_domain::errors::TokenRefreshError;
use gatekit_domain::types::{AccessToken, RefreshToken};
use tracing::{debug, info, warn};

use super::exchange::TokenExchangeService;
use super::vault::TokenVault;
use crate::session::UserSession;

/// Coordinates cached-token freshness checks and refresh issuance
pub struct TokenRefreshCoordinator {
    exchange: Arc<TokenExchangeService>,
    vault: Arc<TokenVault>,
}

impl TokenRefreshCoordinator {
    #[must_use]
    pub fn new(exchange: Arc<TokenExchangeService>, vault: Arc<TokenVault>) -> Self {
        Self { exchange, vault }
    }

    /// Get a token pair guaranteed fresh at the time of return.
    ///
    /// With `force_refresh == false`, a cached access token expiring more
    /// than [`TOKEN_EXPIRY_MARGIN_SECS`] away is returned without a network
    /// call. Otherwise a refresh is issued under the session's gate, the
    /// cached pair is replaced atomically, and the result is persisted.
    ///
    /// With `force_refresh == true`, a network refresh always happens.
    ///
    /// # Errors
    /// Returns the refresh failure; the cached pair is left untouched.
    pub async fn get_fresh_access_token(
        &self,
        session: &Arc<UserSession>,
        force_refresh: bool,
    ) -> Result<(AccessToken, RefreshToken), TokenRefreshError> {
        if !force_refresh {
            let (access, refresh) = session.token_pair();
            if !access.is_expired(TOKEN_EXPIRY_MARGIN_SECS) {
                return Ok((access, refresh));
            }
        }

        // Single-flight: one in-flight refresh per session. Callers queued
        // here re-check the cache once the holder finishes.
        let _gate = session.refresh_gate().lock().await;

        if !force_refresh {
            let (access, refresh) = session.token_pair();
            if !access.is_expired(TOKEN_EXPIRY_MARGIN_SECS) {
                debug!(user_id = %session.user_id(), "Token refreshed by concurrent caller");
                return Ok((access, refresh));
            }
        }

        let (_, current_refresh) = session.token_pair();
        let refreshed = self.exchange.refresh_access_token(&current_refresh.value).await?;

        session.replace_tokens(refreshed.access_token.clone(), refreshed.refresh_token.clone());

        if let Err(err) = self.vault.store_session(&session.snapshot()).await {
            warn!(user_id = %session.user_id(), error = %err, "Failed to persist refreshed session");
        }

        info!(user_id = %session.user_id(), "Session token pair replaced");

        Ok((refreshed.access_token, refreshed.refresh_token))
    }
}
