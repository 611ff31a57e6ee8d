//! Handoff and web authorization link construction
//!
//! The handoff link is the provider's universal link augmented with the
//! OAuth query parameters; the redirect URI itself carries a nested
//! `oauth2_params` query item with the base64url-encoded request scopes.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use gatekit_common::pkce::PkceSecrets;
use gatekit_domain::constants::OAUTH2_PARAMS_QUERY_KEY;
use gatekit_domain::errors::AuthFlowError;
use gatekit_domain::types::OAuthProvider;
use url::Url;

use crate::config::AuthConfig;

/// Build the external-app handoff link for one provider candidate.
///
/// # Errors
/// Returns `AuthFlowError::Unknown` when the provider's universal link or
/// the configured redirect URI cannot be parsed.
pub fn build_handoff_url(
    provider: &OAuthProvider,
    config: &AuthConfig,
    secrets: &PkceSecrets,
) -> Result<String, AuthFlowError> {
    let mut url = Url::parse(&provider.universal_link)
        .map_err(|e| AuthFlowError::Unknown(format!("invalid universal link: {e}")))?;

    let redirect_uri = redirect_uri_with_oauth2_params(config)?;

    url.query_pairs_mut()
        .append_pair("client_id", &config.credentials.client_id)
        .append_pair("redirect_uri", &redirect_uri)
        .append_pair("code_challenge", &secrets.code_challenge)
        .append_pair("code_challenge_method", secrets.challenge_method())
        .append_pair("state", &secrets.state);

    Ok(url.into())
}

/// Build the authorization URL for the embedded web fallback flow.
///
/// # Errors
/// Returns `AuthFlowError::Unknown` when the configured endpoints cannot be
/// parsed.
pub fn build_web_authorize_url(
    config: &AuthConfig,
    secrets: &PkceSecrets,
) -> Result<String, AuthFlowError> {
    let mut url = Url::parse(&config.authorize_url())
        .map_err(|e| AuthFlowError::Unknown(format!("invalid authorize endpoint: {e}")))?;

    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &config.credentials.client_id)
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("scope", &config.scope_string())
        .append_pair("code_challenge", &secrets.code_challenge)
        .append_pair("code_challenge_method", secrets.challenge_method())
        .append_pair("state", &secrets.state);

    Ok(url.into())
}

/// Append the nested `oauth2_params` item to the configured redirect URI.
fn redirect_uri_with_oauth2_params(config: &AuthConfig) -> Result<String, AuthFlowError> {
    let params = serde_json::json!({ "scope": config.scope_string() });
    let encoded = URL_SAFE_NO_PAD.encode(params.to_string());

    let mut url = Url::parse(&config.redirect_uri)
        .map_err(|e| AuthFlowError::Unknown(format!("invalid redirect uri: {e}")))?;
    url.query_pairs_mut().append_pair(OAUTH2_PARAMS_QUERY_KEY, &encoded);

    Ok(url.into())
}
