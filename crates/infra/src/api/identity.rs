//! Identity service gateway over HTTP
//!
//! Token calls are form-encoded POSTs against the token endpoint; the user
//! fetch is a bearer-authorized GET. Responses decode into the wire DTOs,
//! leaving `state` validation to the core services.

use async_trait::async_trait;
use gatekit_core::IdentityGateway;
use gatekit_domain::constants::{GRANT_TYPE_AUTH_CODE, GRANT_TYPE_REFRESH_TOKEN};
use gatekit_domain::errors::ApiError;
use gatekit_domain::types::wire::{
    AnonymousTokenRequest, AnonymousTokenResponse, AuthCodeExchangeRequest,
    AuthCodeExchangeResponse, TokenRefreshRequest, TokenRefreshResponse,
};
use gatekit_domain::types::User;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{error_from_response, http_client, network_error, ApiClientConfig};

/// `reqwest`-backed implementation of [`IdentityGateway`]
pub struct IdentityApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl IdentityApiClient {
    #[must_use]
    pub fn new(config: ApiClientConfig) -> Self {
        let client = http_client(&config);
        Self { client, config }
    }

    fn token_url(&self) -> String {
        format!("{}/oauth/token", self.config.base_url)
    }

    fn anonymous_token_url(&self) -> String {
        format!("{}/oauth/anonymous_token", self.config.base_url)
    }

    fn user_url(&self) -> String {
        format!("{}/users/me", self.config.base_url)
    }

    async fn post_form<R: DeserializeOwned>(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        debug!(url = %url, "POST token request");

        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl IdentityGateway for IdentityApiClient {
    async fn exchange_auth_code(
        &self,
        request: AuthCodeExchangeRequest,
    ) -> Result<AuthCodeExchangeResponse, ApiError> {
        let form = [
            ("grant_type", GRANT_TYPE_AUTH_CODE),
            ("client_id", request.client_id.as_str()),
            ("device_id", request.device_id.as_str()),
            ("state", request.state.as_str()),
            ("code", request.code.as_str()),
            ("code_verifier", request.code_verifier.as_str()),
            ("redirect_uri", request.redirect_uri.as_str()),
        ];

        self.post_form(&self.token_url(), &form).await
    }

    async fn refresh_access_token(
        &self,
        request: TokenRefreshRequest,
    ) -> Result<TokenRefreshResponse, ApiError> {
        let form = [
            ("grant_type", GRANT_TYPE_REFRESH_TOKEN),
            ("client_id", request.client_id.as_str()),
            ("device_id", request.device_id.as_str()),
            ("state", request.state.as_str()),
            ("refresh_token", request.refresh_token.as_str()),
        ];

        self.post_form(&self.token_url(), &form).await
    }

    async fn fetch_anonymous_token(
        &self,
        request: AnonymousTokenRequest,
    ) -> Result<AnonymousTokenResponse, ApiError> {
        let form = [
            ("client_id", request.client_id.as_str()),
            ("device_id", request.device_id.as_str()),
        ];

        self.post_form(&self.anonymous_token_url(), &form).await
    }

    async fn fetch_user(&self, access_token: &str) -> Result<User, ApiError> {
        let url = self.user_url();
        debug!(url = %url, "GET user profile");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use gatekit_domain::errors::OAuthErrorBody;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn exchange_request(state: &str) -> AuthCodeExchangeRequest {
        AuthCodeExchangeRequest {
            client_id: "client123".to_string(),
            device_id: "device-1".to_string(),
            state: state.to_string(),
            code: "code-42".to_string(),
            code_verifier: "verifier".to_string(),
            redirect_uri: "https://app.example.com/cb".to_string(),
        }
    }

    #[tokio::test]
    async fn test_exchange_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=code-42"))
            .and(body_string_contains("code_verifier=verifier"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "state": "s1",
                "user_id": 7,
                "access_token": "at",
                "refresh_token": "rt",
                "expires_in": 3600,
                "scope": "openid groups"
            })))
            .mount(&mock_server)
            .await;

        let client = IdentityApiClient::new(ApiClientConfig::new(mock_server.uri()));

        let response = client.exchange_auth_code(exchange_request("s1")).await.unwrap();
        assert_eq!(response.state, "s1");
        assert_eq!(response.access_token, "at");
        assert_eq!(response.expires_in, 3600);
    }

    #[tokio::test]
    async fn test_refresh_sends_refresh_grant() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=rt-old"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "state": "s2",
                "user_id": 7,
                "access_token": "at-new",
                "refresh_token": "rt-new",
                "expires_in": 3600
            })))
            .mount(&mock_server)
            .await;

        let client = IdentityApiClient::new(ApiClientConfig::new(mock_server.uri()));

        let request = TokenRefreshRequest {
            client_id: "client123".to_string(),
            device_id: "device-1".to_string(),
            state: "s2".to_string(),
            refresh_token: "rt-old".to_string(),
        };

        let response = client.refresh_access_token(request).await.unwrap();
        assert_eq!(response.access_token, "at-new");
        assert_eq!(response.refresh_token, "rt-new");
    }

    #[tokio::test]
    async fn test_oauth_error_body_is_typed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "The refresh token is invalid"
            })))
            .mount(&mock_server)
            .await;

        let client = IdentityApiClient::new(ApiClientConfig::new(mock_server.uri()));

        let request = TokenRefreshRequest {
            client_id: "client123".to_string(),
            device_id: "device-1".to_string(),
            state: "s".to_string(),
            refresh_token: "revoked".to_string(),
        };

        let err = client.refresh_access_token(request).await.unwrap_err();
        assert!(matches!(err, ApiError::OAuth(OAuthErrorBody { ref error, .. }) if error == "invalid_grant"));
        assert!(err.is_invalid_refresh_token());
    }

    #[tokio::test]
    async fn test_plain_status_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let client = IdentityApiClient::new(ApiClientConfig::new(mock_server.uri()));

        let err = client.exchange_auth_code(exchange_request("s")).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { code: 503, ref body } if body == "maintenance"));
    }

    #[tokio::test]
    async fn test_fetch_user_sends_bearer() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("Authorization", "Bearer token-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 7,
                "first_name": "Grace",
                "last_name": "Hopper"
            })))
            .mount(&mock_server)
            .await;

        let client = IdentityApiClient::new(ApiClientConfig::new(mock_server.uri()));

        let user = client.fetch_user("token-1").await.unwrap();
        assert_eq!(user.first_name, "Grace");
        assert!(user.avatar_url.is_none());
    }

    #[tokio::test]
    async fn test_expired_token_classification_from_wire() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "expired_token"
            })))
            .mount(&mock_server)
            .await;

        let client = IdentityApiClient::new(ApiClientConfig::new(mock_server.uri()));

        let err = client.fetch_user("stale").await.unwrap_err();
        assert!(err.is_invalid_access_token());
    }
}
