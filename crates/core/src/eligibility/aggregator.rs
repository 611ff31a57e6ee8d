//! Group eligibility fan-out/fan-in
//!
//! Issues the four independent group calls concurrently and merges them
//! into one composite result after every branch has reported. There are no
//! shared mutable locals: the join produces the four results as one tuple,
//! and the merge runs at a single completion point.

use std::sync::Arc;

use gatekit_domain::errors::EligibilityError;
use gatekit_domain::types::{GroupEligibilityContext, GroupId};
use tracing::{debug, info};

use super::ports::{GroupGateway, MemberFilter};
use crate::session::Authorization;
use crate::transport::ExpiredTokenInterceptor;

/// Merges four concurrent group calls into one eligibility context
pub struct GroupEligibilityAggregator {
    gateway: Arc<dyn GroupGateway>,
    interceptor: Arc<ExpiredTokenInterceptor>,
}

impl GroupEligibilityAggregator {
    #[must_use]
    pub fn new(gateway: Arc<dyn GroupGateway>, interceptor: Arc<ExpiredTokenInterceptor>) -> Self {
        Self { gateway, interceptor }
    }

    /// Fetch the composite group context for an eligibility decision.
    ///
    /// All four calls (group metadata, friend-member page, member page,
    /// service-account flag) run concurrently through the expired-token
    /// interceptor and all run to completion before the merge. On success,
    /// friend members are concatenated before general members.
    ///
    /// # Errors
    /// If any call fails the aggregate fails with the error of the first
    /// failed call in request-declaration order (info, friends, members,
    /// service-account flag); no partial context is returned.
    pub async fn fetch_group_info(
        &self,
        group_id: GroupId,
        authorization: &Authorization,
    ) -> Result<GroupEligibilityContext, EligibilityError> {
        debug!(group_id = %group_id, "Fetching group eligibility context");

        let info_gw = self.gateway.clone();
        let friends_gw = self.gateway.clone();
        let members_gw = self.gateway.clone();
        let flag_gw = self.gateway.clone();

        let (info, friends, members, is_service_account) = tokio::join!(
            self.interceptor.execute(authorization, move |token| {
                let gateway = info_gw.clone();
                async move { gateway.group_info(group_id, &token).await }
            }),
            self.interceptor.execute(authorization, move |token| {
                let gateway = friends_gw.clone();
                async move { gateway.members_page(group_id, MemberFilter::Friends, &token).await }
            }),
            self.interceptor.execute(authorization, move |token| {
                let gateway = members_gw.clone();
                async move { gateway.members_page(group_id, MemberFilter::Any, &token).await }
            }),
            self.interceptor.execute(authorization, move |token| {
                let gateway = flag_gw.clone();
                async move { gateway.is_service_account(group_id, &token).await }
            }),
        );

        // Declaration-order error priority keeps multi-failure outcomes
        // deterministic regardless of completion timing.
        let info = info?;
        let friends = friends?;
        let members = members?;
        let is_service_account = is_service_account?;

        let mut merged = friends.user_ids.clone();
        merged.extend(members.user_ids.iter().copied());

        info!(
            group_id = %group_id,
            friends = friends.total_count,
            members = members.total_count,
            "Group eligibility context assembled"
        );

        Ok(GroupEligibilityContext {
            info,
            members: merged,
            friends_count: friends.total_count,
            members_count: members.total_count,
            is_service_account,
        })
    }
}
