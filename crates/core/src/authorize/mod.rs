//! Provider authorization flow
//!
//! Ordered external-app handoff attempts with an embedded web-flow
//! fallback, driven by externally supplied resume signals.

pub mod coordinator;
pub mod handoff;
pub mod ports;

pub use coordinator::{AuthorizationGrant, ProviderAuthorizationCoordinator};
pub use ports::{AuthCallback, CallbackResult, InteropOpener, WebAuthRequest, WebAuthorizer};
