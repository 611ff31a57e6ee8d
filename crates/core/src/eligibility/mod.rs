//! Group-subscription eligibility
//!
//! Four-way fan-out/fan-in over the group API plus the local gating rules
//! that consume the composite result.

pub mod aggregator;
pub mod ports;
pub mod rules;

pub use aggregator::GroupEligibilityAggregator;
pub use ports::{GroupGateway, MemberFilter};
pub use rules::{LocalShowPolicy, SubscriptionGate};
