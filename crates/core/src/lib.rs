//! # GateKit Core
//!
//! The authorization and session-lifecycle engine.
//!
//! This crate contains:
//! - The provider authorization coordinator with web-flow fallback
//! - Token exchange, refresh, and anonymous-token services
//! - The expired-token interceptor and the group eligibility aggregator
//! - The session registry and the engine facade
//!
//! ## Architecture Principles
//! - Only depends on `gatekit-common` and `gatekit-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod authorize;
pub mod config;
pub mod eligibility;
pub mod engine;
pub mod session;
pub mod token;
pub mod transport;

// Re-export specific items to avoid ambiguity
pub use authorize::{
    AuthCallback, AuthorizationGrant, CallbackResult, InteropOpener,
    ProviderAuthorizationCoordinator, WebAuthRequest, WebAuthorizer,
};
pub use config::AuthConfig;
pub use eligibility::{
    GroupEligibilityAggregator, GroupGateway, LocalShowPolicy, MemberFilter, SubscriptionGate,
};
pub use engine::AuthEngine;
pub use session::{Authorization, SessionRegistry, UserSession};
pub use token::{
    AnonymousTokenService, AuthFlowData, IdentityGateway, RefreshTokenData, TokenExchangeService,
    TokenRefreshCoordinator, TokenVault,
};
pub use transport::ExpiredTokenInterceptor;
