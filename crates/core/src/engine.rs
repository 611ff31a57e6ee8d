//! High-level engine facade
//!
//! Wires the coordinator, token services, registry, and vault into one
//! entry point for host applications: authorize, hand out fresh tokens,
//! refresh user data, restore persisted sessions, and log out.

use std::sync::Arc;

use gatekit_common::pkce::PkceSecrets;
use gatekit_common::storage::{SecureStore, StoreError};
use gatekit_domain::errors::{AuthFlowError, AuthorizedCallError, TokenRefreshError};
use gatekit_domain::types::{AccessToken, OAuthProvider, User, UserId, UserSessionData};
use tracing::{info, warn};

use crate::authorize::{InteropOpener, ProviderAuthorizationCoordinator, WebAuthorizer};
use crate::config::AuthConfig;
use crate::eligibility::{GroupEligibilityAggregator, GroupGateway};
use crate::session::{Authorization, SessionRegistry, UserSession};
use crate::token::{
    AnonymousTokenService, IdentityGateway, TokenExchangeService, TokenRefreshCoordinator,
    TokenVault,
};
use crate::transport::ExpiredTokenInterceptor;

/// Authorization and session-lifecycle engine
///
/// One instance per application. Holds no UI; the host feeds it provider
/// lists, deep-link callbacks, and focus notifications through the
/// coordinator it exposes.
pub struct AuthEngine {
    config: Arc<AuthConfig>,
    gateway: Arc<dyn IdentityGateway>,
    exchange: Arc<TokenExchangeService>,
    refresher: Arc<TokenRefreshCoordinator>,
    anonymous: Arc<AnonymousTokenService>,
    coordinator: Arc<ProviderAuthorizationCoordinator>,
    interceptor: Arc<ExpiredTokenInterceptor>,
    eligibility: Arc<GroupEligibilityAggregator>,
    registry: Arc<SessionRegistry>,
    vault: Arc<TokenVault>,
}

impl AuthEngine {
    /// Wire up the engine from its collaborators.
    #[must_use]
    pub fn new(
        config: AuthConfig,
        gateway: Arc<dyn IdentityGateway>,
        group_gateway: Arc<dyn GroupGateway>,
        opener: Arc<dyn InteropOpener>,
        web: Arc<dyn WebAuthorizer>,
        store: Arc<dyn SecureStore>,
    ) -> Self {
        let config = Arc::new(config);
        let vault = Arc::new(TokenVault::new(store));
        let exchange = Arc::new(TokenExchangeService::new(gateway.clone(), config.clone()));
        let refresher = Arc::new(TokenRefreshCoordinator::new(exchange.clone(), vault.clone()));
        let anonymous =
            Arc::new(AnonymousTokenService::new(gateway.clone(), config.clone(), vault.clone()));
        let coordinator =
            Arc::new(ProviderAuthorizationCoordinator::new(opener, web, config.clone()));
        let interceptor = Arc::new(ExpiredTokenInterceptor::new(refresher.clone()));
        let eligibility =
            Arc::new(GroupEligibilityAggregator::new(group_gateway, interceptor.clone()));

        Self {
            config,
            gateway,
            exchange,
            refresher,
            anonymous,
            coordinator,
            interceptor,
            eligibility,
            registry: Arc::new(SessionRegistry::new()),
            vault,
        }
    }

    /// Coordinator handle for the host's callback and focus plumbing.
    #[must_use]
    pub fn coordinator(&self) -> Arc<ProviderAuthorizationCoordinator> {
        self.coordinator.clone()
    }

    /// Live session registry.
    #[must_use]
    pub fn registry(&self) -> Arc<SessionRegistry> {
        self.registry.clone()
    }

    /// Interceptor for wrapping authenticated API calls.
    #[must_use]
    pub fn interceptor(&self) -> Arc<ExpiredTokenInterceptor> {
        self.interceptor.clone()
    }

    /// Client-level anonymous token service.
    #[must_use]
    pub fn anonymous_tokens(&self) -> Arc<AnonymousTokenService> {
        self.anonymous.clone()
    }

    /// Group eligibility aggregator.
    #[must_use]
    pub fn eligibility(&self) -> Arc<GroupEligibilityAggregator> {
        self.eligibility.clone()
    }

    /// Run the full authorization flow to a registered session.
    ///
    /// Generates the attempt's PKCE secrets, drives the provider handoff
    /// sequence (with web fallback), exchanges the code, persists the new
    /// session, and registers it.
    ///
    /// # Errors
    /// Surfaces `AuthFlowError` from the flow or the exchange; nothing is
    /// cached on failure.
    pub async fn authorize(
        &self,
        providers: &[OAuthProvider],
    ) -> Result<Arc<UserSession>, AuthFlowError> {
        let secrets = PkceSecrets::generate();

        let grant = self.coordinator.authorize(providers, &secrets).await?;
        let flow = self
            .exchange
            .exchange_auth_code(&grant.code, &secrets.code_verifier, &self.config.redirect_uri)
            .await?;

        let data = UserSessionData::new(flow.access_token, flow.refresh_token);
        if let Err(err) = self.vault.store_session(&data).await {
            warn!(user_id = %data.user_id(), error = %err, "Failed to persist new session");
        }

        let session = self.registry.insert(data);
        info!(user_id = %session.user_id(), "Authorization flow completed");
        Ok(session)
    }

    /// Get an access token for a user, refreshing it when needed.
    ///
    /// # Errors
    /// Returns `TokenRefreshError::NoSession` when no live session exists,
    /// or the underlying refresh failure.
    pub async fn fresh_access_token(
        &self,
        user_id: UserId,
        force_refresh: bool,
    ) -> Result<AccessToken, TokenRefreshError> {
        let session =
            self.registry.get(user_id).ok_or(TokenRefreshError::NoSession(user_id))?;
        let (access, _) = self.refresher.get_fresh_access_token(&session, force_refresh).await?;
        Ok(access)
    }

    /// Fetch the user's profile and update the session's cached copy.
    ///
    /// Runs through the interceptor, so an expired token refreshes and
    /// replays once.
    ///
    /// # Errors
    /// Surfaces the intercepted call's error.
    pub async fn refresh_user(&self, user_id: UserId) -> Result<User, AuthorizedCallError> {
        let session = self
            .registry
            .get(user_id)
            .ok_or(AuthorizedCallError::Refresh(TokenRefreshError::NoSession(user_id)))?;

        let authorization = Authorization::UserSession(session.clone());
        let gateway = self.gateway.clone();

        let user = self
            .interceptor
            .execute(&authorization, move |token| {
                let gateway = gateway.clone();
                async move { gateway.fetch_user(&token).await }
            })
            .await?;

        session.set_user(user.clone());
        if let Err(err) = self.vault.store_session(&session.snapshot()).await {
            warn!(user_id = %user_id, error = %err, "Failed to persist refreshed user data");
        }

        Ok(user)
    }

    /// Bring a persisted session back into the registry at startup.
    ///
    /// Returns the already-live session when one exists; a missing or
    /// unreadable persisted entry yields `None`.
    pub async fn restore_session(&self, user_id: UserId) -> Option<Arc<UserSession>> {
        if let Some(existing) = self.registry.get(user_id) {
            return Some(existing);
        }
        let data = self.vault.load_session(user_id).await?;
        info!(user_id = %user_id, "Restored persisted session");
        Some(self.registry.insert(data))
    }

    /// Log a user out: remove the session synchronously and wipe its
    /// persisted mirror.
    ///
    /// An in-flight refresh for the session keeps running on its own `Arc`;
    /// the registry simply stops handing the session out.
    ///
    /// # Errors
    /// Returns the store failure when wiping the persisted entry fails.
    pub async fn logout(&self, user_id: UserId) -> Result<(), StoreError> {
        self.registry.remove(user_id);
        self.vault.remove_session(user_id).await?;
        info!(user_id = %user_id, "Logged out");
        Ok(())
    }
}
