//! HTTP API adapters
//!
//! Shared configuration plus the identity and group gateway clients.

use std::time::Duration;

use gatekit_domain::errors::{ApiError, OAuthErrorBody};

pub mod group;
pub mod identity;

/// Configuration shared by the API clients
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the identity service (e.g., "https://id.example.com")
    pub base_url: String,
    /// Timeout applied to every request
    pub timeout: Duration,
}

impl ApiClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: Duration::from_secs(30) }
    }
}

/// Build the shared HTTP client.
pub(crate) fn http_client(config: &ApiClientConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Translate a non-success response into a typed error.
///
/// OAuth error bodies take priority; anything else keeps its status and
/// raw body.
pub(crate) async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<OAuthErrorBody>(&body) {
        Ok(oauth) => ApiError::OAuth(oauth),
        Err(_) => ApiError::Status { code: status, body },
    }
}

/// Translate a transport failure into a typed error.
pub(crate) fn network_error(err: &reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}
