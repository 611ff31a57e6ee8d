//! Port interfaces for group API access

use async_trait::async_trait;
use gatekit_domain::errors::ApiError;
use gatekit_domain::types::{GroupId, GroupInfo, MembersPage};

/// Which membership slice a listing call returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberFilter {
    /// Members who are friends of the calling user
    Friends,
    /// All members
    Any,
}

/// Trait for the group endpoints of the identity service
#[async_trait]
pub trait GroupGateway: Send + Sync {
    /// Fetch group metadata.
    ///
    /// # Errors
    /// Returns a typed transport error.
    async fn group_info(&self, group_id: GroupId, bearer: &str) -> Result<GroupInfo, ApiError>;

    /// Fetch one membership page plus the total count for the filter.
    ///
    /// # Errors
    /// Returns a typed transport error.
    async fn members_page(
        &self,
        group_id: GroupId,
        filter: MemberFilter,
        bearer: &str,
    ) -> Result<MembersPage, ApiError>;

    /// Whether the group is a service account.
    ///
    /// # Errors
    /// Returns a typed transport error.
    async fn is_service_account(&self, group_id: GroupId, bearer: &str) -> Result<bool, ApiError>;
}
