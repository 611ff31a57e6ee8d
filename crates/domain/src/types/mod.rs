//! Domain data types
//!
//! Split by area the same way the services consume them: credentials and
//! tokens, providers, users, group data, and the wire DTOs exchanged with
//! the identity service.

pub mod group;
pub mod provider;
pub mod tokens;
pub mod user;
pub mod wire;

pub use group::{GroupEligibilityContext, GroupId, GroupInfo, GroupSubscriptionRecord, MembersPage};
pub use provider::{order_by_weight, OAuthProvider, ProviderKind};
pub use tokens::{AccessToken, AnonymousToken, AppCredentials, DeviceId, RefreshToken};
pub use user::{User, UserId, UserSessionData};
pub use wire::{
    AnonymousTokenRequest, AnonymousTokenResponse, AuthCodeExchangeRequest,
    AuthCodeExchangeResponse, TokenRefreshRequest, TokenRefreshResponse,
};
