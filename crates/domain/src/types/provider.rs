//! OAuth provider descriptors
//!
//! Providers are supplied by the identity service per request and never
//! edited locally.

use serde::{Deserialize, Serialize};

/// Which party operates the provider application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// The identity service's own application
    FirstParty,
    /// A partner application able to complete the handoff
    Alternative,
}

/// One candidate application for external-app authorization handoff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthProvider {
    pub kind: ProviderKind,

    /// Ordering priority, higher attempted first
    pub weight: i32,

    /// Base universal link opened for the handoff
    pub universal_link: String,
}

impl OAuthProvider {
    #[must_use]
    pub fn new(kind: ProviderKind, weight: i32, universal_link: impl Into<String>) -> Self {
        Self { kind, weight, universal_link: universal_link.into() }
    }
}

/// Order candidates most-preferred first.
///
/// The sort is stable: candidates with equal weight keep the
/// server-supplied order.
#[must_use]
pub fn order_by_weight(providers: &[OAuthProvider]) -> Vec<OAuthProvider> {
    let mut ordered = providers.to_vec();
    ordered.sort_by_key(|p| std::cmp::Reverse(p.weight));
    ordered
}
