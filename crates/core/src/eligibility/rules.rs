//! Subscription gating rules
//!
//! Consumes the composite eligibility context and the local show record to
//! decide whether the subscription prompt may be presented.

use chrono::{DateTime, Duration, Utc};
use gatekit_domain::constants::GROUPS_SCOPE;
use gatekit_domain::errors::EligibilityError;
use gatekit_domain::types::{AccessToken, GroupEligibilityContext, GroupSubscriptionRecord};
use tracing::debug;

/// Rolling-window limit on how often the prompt may be shown per user
#[derive(Debug, Clone)]
pub struct LocalShowPolicy {
    /// Maximum number of shows inside the window
    pub max_shows: usize,
    /// Window the shows are counted over
    pub window: Duration,
}

impl Default for LocalShowPolicy {
    fn default() -> Self {
        Self { max_shows: 2, window: Duration::days(30) }
    }
}

/// Evaluates the gating checks in a fixed order
pub struct SubscriptionGate {
    policy: LocalShowPolicy,
}

impl SubscriptionGate {
    #[must_use]
    pub fn new(policy: LocalShowPolicy) -> Self {
        Self { policy }
    }

    /// Decide whether the subscription prompt may be shown.
    ///
    /// # Errors
    /// Returns the first failing check: `IsServiceAccount`, `AlreadyMember`,
    /// `GroupClosed`, `ScopeMissing`, `SubscriptionNotAllowed`, then
    /// `LocalLimitReached`.
    pub fn evaluate(
        &self,
        context: &GroupEligibilityContext,
        access_token: &AccessToken,
        record: &GroupSubscriptionRecord,
        now: DateTime<Utc>,
    ) -> Result<(), EligibilityError> {
        if context.is_service_account {
            return Err(EligibilityError::IsServiceAccount);
        }
        if context.info.is_member {
            return Err(EligibilityError::AlreadyMember);
        }
        if context.info.is_closed {
            return Err(EligibilityError::GroupClosed);
        }
        if !access_token.has_scope(GROUPS_SCOPE) {
            return Err(EligibilityError::ScopeMissing);
        }
        if !context.info.can_subscribe {
            return Err(EligibilityError::SubscriptionNotAllowed);
        }
        if record.shows_within(now, self.policy.window) >= self.policy.max_shows {
            return Err(EligibilityError::LocalLimitReached);
        }

        debug!(group_id = %context.info.id, "Subscription prompt allowed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the subscription gate.
    use gatekit_domain::types::{GroupId, GroupInfo, UserId};

    use super::*;

    fn context() -> GroupEligibilityContext {
        GroupEligibilityContext {
            info: GroupInfo {
                id: GroupId(1),
                name: "Rustaceans".to_string(),
                is_closed: false,
                is_member: false,
                can_subscribe: true,
            },
            members: vec![],
            friends_count: 0,
            members_count: 10,
            is_service_account: false,
        }
    }

    fn token_with_groups_scope() -> AccessToken {
        AccessToken::new("t", UserId(1), 3600, Some("openid groups".to_string()))
    }

    fn gate() -> SubscriptionGate {
        SubscriptionGate::new(LocalShowPolicy::default())
    }

    /// Validates `SubscriptionGate::evaluate` behavior for the eligible
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures a clean context with a scoped token passes every check.
    #[test]
    fn test_eligible() {
        let record = GroupSubscriptionRecord::new(UserId(1));
        let result = gate().evaluate(&context(), &token_with_groups_scope(), &record, Utc::now());
        assert!(result.is_ok());
    }

    /// Validates `SubscriptionGate::evaluate` behavior for each gating
    /// check.
    ///
    /// Assertions:
    /// - Confirms each doctored context maps to its taxonomy member.
    #[test]
    fn test_gating_taxonomy() {
        let record = GroupSubscriptionRecord::new(UserId(1));
        let token = token_with_groups_scope();
        let now = Utc::now();

        let mut service = context();
        service.is_service_account = true;
        assert!(matches!(
            gate().evaluate(&service, &token, &record, now),
            Err(EligibilityError::IsServiceAccount)
        ));

        let mut member = context();
        member.info.is_member = true;
        assert!(matches!(
            gate().evaluate(&member, &token, &record, now),
            Err(EligibilityError::AlreadyMember)
        ));

        let mut closed = context();
        closed.info.is_closed = true;
        assert!(matches!(
            gate().evaluate(&closed, &token, &record, now),
            Err(EligibilityError::GroupClosed)
        ));

        let unscoped = AccessToken::new("t", UserId(1), 3600, Some("openid".to_string()));
        assert!(matches!(
            gate().evaluate(&context(), &unscoped, &record, now),
            Err(EligibilityError::ScopeMissing)
        ));

        let mut disallowed = context();
        disallowed.info.can_subscribe = false;
        assert!(matches!(
            gate().evaluate(&disallowed, &token, &record, now),
            Err(EligibilityError::SubscriptionNotAllowed)
        ));
    }

    /// Validates `SubscriptionGate::evaluate` behavior for the local limit
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures the window limit trips after `max_shows` recent shows.
    /// - Ensures shows outside the window do not count.
    #[test]
    fn test_local_limit() {
        let gate = SubscriptionGate::new(LocalShowPolicy {
            max_shows: 2,
            window: Duration::days(30),
        });
        let token = token_with_groups_scope();
        let now = Utc::now();

        let mut record = GroupSubscriptionRecord::new(UserId(1));
        record.record_shown(now - Duration::days(40));
        record.record_shown(now - Duration::days(2));
        assert!(gate.evaluate(&context(), &token, &record, now).is_ok());

        record.record_shown(now - Duration::days(1));
        assert!(matches!(
            gate.evaluate(&context(), &token, &record, now),
            Err(EligibilityError::LocalLimitReached)
        ));
    }
}
