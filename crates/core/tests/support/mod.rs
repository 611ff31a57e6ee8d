//! Shared test doubles for the engine integration tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use gatekit_core::authorize::{AuthCallback, InteropOpener, WebAuthRequest, WebAuthorizer};
use gatekit_core::eligibility::{GroupGateway, MemberFilter};
use gatekit_core::AuthConfig;
use gatekit_domain::errors::{ApiError, AuthFlowError};
use gatekit_domain::types::wire::{
    AnonymousTokenRequest, AnonymousTokenResponse, AuthCodeExchangeRequest,
    AuthCodeExchangeResponse, TokenRefreshRequest, TokenRefreshResponse,
};
use gatekit_domain::types::{
    AppCredentials, DeviceId, GroupId, GroupInfo, MembersPage, User, UserId,
};
use parking_lot::Mutex;

/// Engine configuration used across the integration tests.
pub fn test_config() -> AuthConfig {
    AuthConfig::new(
        AppCredentials::new("client123", "secret456"),
        DeviceId("device-1".to_string()),
        "id.example.com",
        "https://app.example.com/auth/callback",
        vec!["openid".to_string(), "groups".to_string()],
    )
}

/// Identity gateway double with call counters and a switchable state echo.
pub struct MockIdentityGateway {
    pub exchange_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
    pub echo_state: bool,
}

impl MockIdentityGateway {
    pub fn new() -> Self {
        Self {
            exchange_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            user_calls: AtomicUsize::new(0),
            echo_state: true,
        }
    }

    pub fn with_tampered_state() -> Self {
        Self { echo_state: false, ..Self::new() }
    }

    fn state_for(&self, request_state: &str) -> String {
        if self.echo_state {
            request_state.to_string()
        } else {
            "tampered".to_string()
        }
    }
}

#[async_trait]
impl gatekit_core::IdentityGateway for MockIdentityGateway {
    async fn exchange_auth_code(
        &self,
        request: AuthCodeExchangeRequest,
    ) -> Result<AuthCodeExchangeResponse, ApiError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        Ok(AuthCodeExchangeResponse {
            state: self.state_for(&request.state),
            user_id: UserId(7),
            access_token: format!("access-for-{}", request.code),
            refresh_token: "refresh-1".to_string(),
            expires_in: 3600,
            scope: Some("openid groups".to_string()),
        })
    }

    async fn refresh_access_token(
        &self,
        request: TokenRefreshRequest,
    ) -> Result<TokenRefreshResponse, ApiError> {
        let call = self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        Ok(TokenRefreshResponse {
            state: self.state_for(&request.state),
            user_id: UserId(7),
            access_token: format!("refreshed-{}", call + 1),
            refresh_token: format!("refresh-{}", call + 2),
            expires_in: 3600,
            scope: Some("openid groups".to_string()),
        })
    }

    async fn fetch_anonymous_token(
        &self,
        _request: AnonymousTokenRequest,
    ) -> Result<AnonymousTokenResponse, ApiError> {
        Ok(AnonymousTokenResponse { token: "anon-token".to_string(), expires_in: 600 })
    }

    async fn fetch_user(&self, _access_token: &str) -> Result<User, ApiError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        Ok(User {
            id: UserId(7),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            avatar_url: Some("https://cdn.example.com/7.png".to_string()),
        })
    }
}

/// Opener double that records opened URLs and answers from a script.
pub struct ScriptedOpener {
    answers: Mutex<Vec<bool>>,
    opened: Mutex<Vec<String>>,
}

impl ScriptedOpener {
    pub fn new(answers: Vec<bool>) -> Self {
        Self { answers: Mutex::new(answers), opened: Mutex::new(Vec::new()) }
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.opened.lock().clone()
    }

    /// State query parameter of the most recently opened URL.
    pub fn last_state(&self) -> Option<String> {
        let urls = self.opened.lock();
        let url = url::Url::parse(urls.last()?).ok()?;
        url.query_pairs().find(|(k, _)| k == "state").map(|(_, v)| v.into_owned())
    }
}

#[async_trait]
impl InteropOpener for ScriptedOpener {
    async fn open(&self, url: &str) -> bool {
        self.opened.lock().push(url.to_string());
        let mut answers = self.answers.lock();
        if answers.is_empty() {
            false
        } else {
            answers.remove(0)
        }
    }
}

/// Web surface double that completes immediately, echoing the URL's state.
pub struct EchoWebAuthorizer {
    pub calls: AtomicUsize,
}

impl EchoWebAuthorizer {
    pub fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebAuthorizer for EchoWebAuthorizer {
    async fn authorize(&self, request: WebAuthRequest) -> Result<AuthCallback, AuthFlowError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let url =
            url::Url::parse(&request.url).map_err(|e| AuthFlowError::Unknown(e.to_string()))?;
        let state = url
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();
        Ok(AuthCallback::code(state, "web-code"))
    }
}

/// Group gateway double serving a small fixed group.
pub struct MockGroupGateway {
    pub fail_service_flag: bool,
}

impl MockGroupGateway {
    pub fn new() -> Self {
        Self { fail_service_flag: false }
    }
}

#[async_trait]
impl GroupGateway for MockGroupGateway {
    async fn group_info(&self, group_id: GroupId, _bearer: &str) -> Result<GroupInfo, ApiError> {
        Ok(GroupInfo {
            id: group_id,
            name: "Rustaceans".to_string(),
            is_closed: false,
            is_member: false,
            can_subscribe: true,
        })
    }

    async fn members_page(
        &self,
        _group_id: GroupId,
        filter: MemberFilter,
        _bearer: &str,
    ) -> Result<MembersPage, ApiError> {
        match filter {
            MemberFilter::Friends => {
                Ok(MembersPage { user_ids: vec![UserId(10)], total_count: 1 })
            }
            MemberFilter::Any => {
                Ok(MembersPage { user_ids: vec![UserId(20), UserId(21)], total_count: 12 })
            }
        }
    }

    async fn is_service_account(
        &self,
        _group_id: GroupId,
        _bearer: &str,
    ) -> Result<bool, ApiError> {
        if self.fail_service_flag {
            return Err(ApiError::Status { code: 500, body: "flag lookup failed".to_string() });
        }
        Ok(false)
    }
}

/// Poll until the opener has seen `count` URLs.
pub async fn wait_for_opens(opener: &ScriptedOpener, count: usize) {
    for _ in 0..500 {
        if opener.opened_urls().len() >= count {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    panic!("opener never reached {count} opens");
}
