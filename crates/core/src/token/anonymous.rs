//! Client-level anonymous token service
//!
//! Caches one non-user token process-wide, lazily loads it from the secure
//! store, and refreshes it with the same expiry margin as user tokens. A
//! missing or unreadable store entry is an absent cache, never an error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gatekit_domain::constants::TOKEN_EXPIRY_MARGIN_SECS;
use gatekit_domain::errors::ApiError;
use gatekit_domain::types::wire::AnonymousTokenRequest;
use gatekit_domain::types::AnonymousToken;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::ports::IdentityGateway;
use super::vault::TokenVault;
use crate::config::AuthConfig;

/// Caches and refreshes the client-level anonymous token
pub struct AnonymousTokenService {
    gateway: Arc<dyn IdentityGateway>,
    config: Arc<AuthConfig>,
    vault: Arc<TokenVault>,
    cached: RwLock<Option<AnonymousToken>>,
    gate: Mutex<()>,
    loaded: AtomicBool,
}

impl AnonymousTokenService {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn IdentityGateway>,
        config: Arc<AuthConfig>,
        vault: Arc<TokenVault>,
    ) -> Self {
        Self {
            gateway,
            config,
            vault,
            cached: RwLock::new(None),
            gate: Mutex::new(()),
            loaded: AtomicBool::new(false),
        }
    }

    /// Get a token guaranteed fresh at the time of return.
    ///
    /// With `force_refresh == false`, a cached token expiring more than
    /// [`TOKEN_EXPIRY_MARGIN_SECS`] away is returned without a network
    /// call. Fetch issuance is single-flight: concurrent callers share one
    /// network call.
    ///
    /// # Errors
    /// Returns the gateway's error when the fetch fails.
    pub async fn get_fresh_token(&self, force_refresh: bool) -> Result<AnonymousToken, ApiError> {
        if !force_refresh {
            if let Some(token) = self.fresh_cached().await {
                return Ok(token);
            }
        }

        let _gate = self.gate.lock().await;

        // First caller through the gate pulls the persisted token, if any
        self.ensure_loaded().await;

        if !force_refresh {
            if let Some(token) = self.fresh_cached().await {
                return Ok(token);
            }
        }

        let request = AnonymousTokenRequest {
            client_id: self.config.credentials.client_id.clone(),
            device_id: self.config.device_id.0.clone(),
        };

        let response = self.gateway.fetch_anonymous_token(request).await?;
        let token = AnonymousToken::new(response.token, response.expires_in);

        *self.cached.write().await = Some(token.clone());

        if let Err(err) = self.vault.store_anonymous(&token).await {
            warn!(error = %err, "Failed to persist anonymous token");
        }

        info!("Anonymous token refreshed");

        Ok(token)
    }

    /// Drop the cached token and its persisted mirror.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
        if let Err(err) = self.vault.remove_anonymous().await {
            warn!(error = %err, "Failed to remove persisted anonymous token");
        }
        debug!("Anonymous token invalidated");
    }

    async fn fresh_cached(&self) -> Option<AnonymousToken> {
        let cached = self.cached.read().await;
        cached.as_ref().filter(|t| !t.is_expired(TOKEN_EXPIRY_MARGIN_SECS)).cloned()
    }

    async fn ensure_loaded(&self) {
        if self.loaded.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(token) = self.vault.load_anonymous().await {
            debug!("Loaded persisted anonymous token");
            *self.cached.write().await = Some(token);
        }
    }
}
