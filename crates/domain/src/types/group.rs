//! Group metadata and subscription-eligibility data

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::user::UserId;

/// Identifier of a group at the identity service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub i64);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group metadata returned by the group-info call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupInfo {
    pub id: GroupId,
    pub name: String,

    /// Closed groups do not accept direct subscriptions
    pub is_closed: bool,

    /// Whether the calling user is already a member
    pub is_member: bool,

    /// Server-side toggle for the subscription prompt
    pub can_subscribe: bool,
}

/// One page of a membership listing plus the total count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersPage {
    pub user_ids: Vec<UserId>,
    pub total_count: i64,
}

/// Composite result of the four-way eligibility fan-out
///
/// Built only when every underlying call succeeded; there is no partial
/// variant.
#[derive(Debug, Clone)]
pub struct GroupEligibilityContext {
    pub info: GroupInfo,

    /// Friend members first, then general members, in listing order
    pub members: Vec<UserId>,

    pub friends_count: i64,
    pub members_count: i64,
    pub is_service_account: bool,
}

/// Append-only record of when the subscription prompt was shown to a user
///
/// Drives the local rolling-window display limit: callers prune to their
/// configured window before counting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSubscriptionRecord {
    pub user_id: UserId,
    pub shown_at: Vec<DateTime<Utc>>,
}

impl GroupSubscriptionRecord {
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self { user_id, shown_at: Vec::new() }
    }

    /// Append a show timestamp.
    pub fn record_shown(&mut self, at: DateTime<Utc>) {
        self.shown_at.push(at);
    }

    /// Drop timestamps older than `window` relative to `now`.
    pub fn prune(&mut self, now: DateTime<Utc>, window: Duration) {
        let cutoff = now - window;
        self.shown_at.retain(|t| *t >= cutoff);
    }

    /// How many shows fall within `window` relative to `now`.
    #[must_use]
    pub fn shows_within(&self, now: DateTime<Utc>, window: Duration) -> usize {
        let cutoff = now - window;
        self.shown_at.iter().filter(|t| **t >= cutoff).count()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the subscription show record.
    use super::*;

    /// Validates `GroupSubscriptionRecord` behavior for the rolling window
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms only timestamps inside the window are counted.
    /// - Confirms `prune` removes the ones outside it.
    #[test]
    fn test_rolling_window_counting_and_pruning() {
        let now = Utc::now();
        let mut record = GroupSubscriptionRecord::new(UserId(1));
        record.record_shown(now - Duration::hours(30));
        record.record_shown(now - Duration::hours(10));
        record.record_shown(now - Duration::minutes(5));

        let window = Duration::hours(24);
        assert_eq!(record.shows_within(now, window), 2);

        record.prune(now, window);
        assert_eq!(record.shown_at.len(), 2);
        assert_eq!(record.shows_within(now, window), 2);
    }

    /// Validates `GroupSubscriptionRecord::new` behavior for the empty record
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures a new record counts zero shows.
    #[test]
    fn test_empty_record() {
        let record = GroupSubscriptionRecord::new(UserId(1));
        assert_eq!(record.shows_within(Utc::now(), Duration::hours(24)), 0);
    }
}
