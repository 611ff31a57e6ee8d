//! Port interfaces for the authorization flow
//!
//! The coordinator talks to the platform through these seams: one opener
//! for external-app handoff and one embedded web surface for the fallback
//! flow.

use async_trait::async_trait;
use gatekit_domain::errors::AuthFlowError;

/// Payload of a return/callback URL
///
/// Carries the `state` generated for the attempt and either an
/// authorization code or an error indicator.
#[derive(Debug, Clone)]
pub struct AuthCallback {
    pub state: String,
    pub result: CallbackResult,
}

/// What the callback reported
#[derive(Debug, Clone)]
pub enum CallbackResult {
    /// Authorization code ready for exchange
    Code(String),
    /// Provider-side error indicator
    Error(String),
}

impl AuthCallback {
    /// Convenience constructor for a successful callback.
    #[must_use]
    pub fn code(state: impl Into<String>, code: impl Into<String>) -> Self {
        Self { state: state.into(), result: CallbackResult::Code(code.into()) }
    }

    /// Convenience constructor for an error callback.
    #[must_use]
    pub fn error(state: impl Into<String>, error: impl Into<String>) -> Self {
        Self { state: state.into(), result: CallbackResult::Error(error.into()) }
    }
}

/// Trait for handing a URL to the platform
///
/// The implementation attempts to open the URL in the provider's installed
/// application and reports whether anything handled it.
#[async_trait]
pub trait InteropOpener: Send + Sync {
    /// Open `url` externally; `false` means nothing could handle it.
    async fn open(&self, url: &str) -> bool;
}

/// Request for the embedded web authorization surface
#[derive(Debug, Clone)]
pub struct WebAuthRequest {
    /// Full authorization URL to load
    pub url: String,
}

/// Trait for the embedded web-based authorization flow
#[async_trait]
pub trait WebAuthorizer: Send + Sync {
    /// Run the web flow to completion and return the final callback.
    ///
    /// # Errors
    /// Returns `AuthFlowError::Cancelled` when the surface is dismissed
    /// before the flow completes.
    async fn authorize(&self, request: WebAuthRequest) -> Result<AuthCallback, AuthFlowError>;
}
