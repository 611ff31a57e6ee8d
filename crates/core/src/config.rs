//! Engine configuration
//!
//! One immutable configuration value shared by every service the engine
//! wires together. Supplied by the host application at startup.

use gatekit_domain::types::{AppCredentials, DeviceId};

/// Configuration for the authorization engine
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Application credentials issued by the identity service
    pub credentials: AppCredentials,

    /// Installation identifier sent on token calls
    pub device_id: DeviceId,

    /// Identity service domain (e.g., "id.example.com")
    pub domain: String,

    /// Redirect URI the callbacks come back on (deep link for mobile)
    pub redirect_uri: String,

    /// OAuth scopes to request
    pub scopes: Vec<String>,
}

impl AuthConfig {
    /// Create a new engine configuration
    #[must_use]
    pub fn new(
        credentials: AppCredentials,
        device_id: DeviceId,
        domain: impl Into<String>,
        redirect_uri: impl Into<String>,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            credentials,
            device_id,
            domain: domain.into(),
            redirect_uri: redirect_uri.into(),
            scopes,
        }
    }

    /// Get the web authorization URL
    ///
    /// For most deployments this is `https://{domain}/authorize`.
    #[must_use]
    pub fn authorize_url(&self) -> String {
        format!("https://{}/authorize", self.domain)
    }

    /// Get scopes as space-separated string
    #[must_use]
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}
