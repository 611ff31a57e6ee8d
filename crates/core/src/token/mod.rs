//! Token lifecycle services
//!
//! Code exchange, expiry-aware refresh, the client-level anonymous token,
//! and the secure-store-backed token vault.

pub mod anonymous;
pub mod exchange;
pub mod ports;
pub mod refresh;
pub mod vault;

pub use anonymous::AnonymousTokenService;
pub use exchange::{AuthFlowData, RefreshTokenData, TokenExchangeService};
pub use ports::IdentityGateway;
pub use refresh::TokenRefreshCoordinator;
pub use vault::TokenVault;
