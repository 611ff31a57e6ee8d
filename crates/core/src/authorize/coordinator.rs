//! Provider authorization coordinator
//!
//! Attempts external-app handoff for each server-supplied provider,
//! most-preferred first, and falls back to the embedded web flow when no
//! provider completes. While waiting for a return from an external app the
//! flow suspends; resumption is driven by two independent signals (the
//! deep-link callback and the app-refocus notification), of which only the
//! first one counts.

use std::sync::Arc;

use gatekit_common::pkce::PkceSecrets;
use gatekit_domain::errors::AuthFlowError;
use gatekit_domain::types::{order_by_weight, OAuthProvider, ProviderKind};
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::handoff;
use super::ports::{AuthCallback, CallbackResult, InteropOpener, WebAuthRequest, WebAuthorizer};
use crate::config::AuthConfig;

/// Authorization code granted by a completed provider or web flow
#[derive(Debug, Clone)]
pub struct AuthorizationGrant {
    pub code: String,
}

enum ResumeSignal {
    Callback(AuthCallback),
    Refocused,
    Cancelled,
}

struct PendingAttempt {
    tx: oneshot::Sender<ResumeSignal>,
}

/// Orders provider candidates and drives the attempt sequence
pub struct ProviderAuthorizationCoordinator {
    opener: Arc<dyn InteropOpener>,
    web: Arc<dyn WebAuthorizer>,
    config: Arc<AuthConfig>,
    // One pending attempt at most; take() on first resume makes later
    // signals for the same attempt no-ops.
    pending: Mutex<Option<PendingAttempt>>,
}

impl ProviderAuthorizationCoordinator {
    #[must_use]
    pub fn new(
        opener: Arc<dyn InteropOpener>,
        web: Arc<dyn WebAuthorizer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self { opener, web, config, pending: Mutex::new(None) }
    }

    /// Deliver a deep-link callback for the waiting attempt.
    ///
    /// Ignored when no attempt is waiting (e.g. the refocus signal already
    /// resolved it).
    pub fn resume_with_callback(&self, callback: AuthCallback) {
        if let Some(attempt) = self.pending.lock().take() {
            let _ = attempt.tx.send(ResumeSignal::Callback(callback));
        } else {
            debug!("Ignoring callback with no pending provider attempt");
        }
    }

    /// Report that the app regained focus without a completion callback.
    ///
    /// The waiting attempt is treated as abandoned and falls back to the
    /// web flow. The focus notification can fire more than once per resume;
    /// signals after the first are ignored.
    pub fn notify_refocused(&self) {
        if let Some(attempt) = self.pending.lock().take() {
            let _ = attempt.tx.send(ResumeSignal::Refocused);
        } else {
            debug!("Ignoring refocus with no pending provider attempt");
        }
    }

    /// Resolve the waiting attempt as cancelled (surface dismissed).
    pub fn cancel(&self) {
        if let Some(attempt) = self.pending.lock().take() {
            let _ = attempt.tx.send(ResumeSignal::Cancelled);
        }
    }

    /// Whether an attempt is currently waiting for a resume signal.
    #[must_use]
    pub fn has_pending_attempt(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// Run the attempt sequence to an authorization code.
    ///
    /// Candidates are ordered by descending weight (stable on ties). The
    /// handoff path only runs when the top candidate is the first-party
    /// provider; otherwise, and whenever every handoff attempt is abandoned
    /// or refused, the embedded web flow takes over.
    ///
    /// # Errors
    /// - `StateMismatch` when a callback's `state` does not round-trip
    /// - `Cancelled` when the surface is dismissed mid-attempt
    /// - `Unknown` when the web fallback itself reports an error
    pub async fn authorize(
        &self,
        providers: &[OAuthProvider],
        secrets: &PkceSecrets,
    ) -> Result<AuthorizationGrant, AuthFlowError> {
        let ordered = order_by_weight(providers);

        let handoff_eligible =
            matches!(ordered.first(), Some(p) if p.kind == ProviderKind::FirstParty);

        if handoff_eligible {
            for provider in &ordered {
                let url = handoff::build_handoff_url(provider, &self.config, secrets)?;

                if !self.opener.open(&url).await {
                    debug!(
                        link = %provider.universal_link,
                        "Provider application unavailable, trying next candidate"
                    );
                    continue;
                }

                let (tx, rx) = oneshot::channel();
                *self.pending.lock() = Some(PendingAttempt { tx });
                info!(link = %provider.universal_link, "Waiting for return from provider");

                match rx.await {
                    Ok(ResumeSignal::Callback(callback)) => {
                        if callback.state != secrets.state {
                            return Err(AuthFlowError::StateMismatch {
                                expected: secrets.state.clone(),
                                received: callback.state,
                            });
                        }
                        match callback.result {
                            CallbackResult::Code(code) => {
                                info!("Provider handoff completed");
                                return Ok(AuthorizationGrant { code });
                            }
                            CallbackResult::Error(error) => {
                                // Recovered locally: the web flow takes over
                                warn!(error = %error, "Provider returned an error, falling back");
                                break;
                            }
                        }
                    }
                    Ok(ResumeSignal::Refocused) => {
                        info!("App refocused without a callback, treating attempt as abandoned");
                        break;
                    }
                    Ok(ResumeSignal::Cancelled) | Err(_) => {
                        return Err(AuthFlowError::Cancelled);
                    }
                }
            }
        } else if ordered.is_empty() {
            debug!("No provider candidates supplied");
        } else {
            debug!("Primary candidate is not first-party, skipping handoff");
        }

        self.web_fallback(secrets).await
    }

    async fn web_fallback(
        &self,
        secrets: &PkceSecrets,
    ) -> Result<AuthorizationGrant, AuthFlowError> {
        info!("Starting embedded web authorization flow");

        let url = handoff::build_web_authorize_url(&self.config, secrets)?;
        let callback = self.web.authorize(WebAuthRequest { url }).await?;

        if callback.state != secrets.state {
            return Err(AuthFlowError::StateMismatch {
                expected: secrets.state.clone(),
                received: callback.state,
            });
        }

        match callback.result {
            CallbackResult::Code(code) => {
                info!("Web authorization completed");
                Ok(AuthorizationGrant { code })
            }
            CallbackResult::Error(error) => {
                Err(AuthFlowError::Unknown(format!("web authorization failed: {error}")))
            }
        }
    }
}
