//! Group service gateway over HTTP
//!
//! Bearer-authorized GETs against the group endpoints. The caller decides
//! which bearer to present; expired-token retries happen upstream in the
//! core interceptor.

use async_trait::async_trait;
use gatekit_core::{GroupGateway, MemberFilter};
use gatekit_domain::errors::ApiError;
use gatekit_domain::types::{GroupId, GroupInfo, MembersPage};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{error_from_response, http_client, network_error, ApiClientConfig};

#[derive(Debug, Deserialize)]
struct ServiceAccountFlag {
    is_service_account: bool,
}

/// `reqwest`-backed implementation of [`GroupGateway`]
pub struct GroupApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl GroupApiClient {
    #[must_use]
    pub fn new(config: ApiClientConfig) -> Self {
        let client = http_client(&config);
        Self { client, config }
    }

    async fn get_json<R: DeserializeOwned>(&self, url: &str, bearer: &str) -> Result<R, ApiError> {
        debug!(url = %url, "GET group request");

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {bearer}"))
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl GroupGateway for GroupApiClient {
    async fn group_info(&self, group_id: GroupId, bearer: &str) -> Result<GroupInfo, ApiError> {
        let url = format!("{}/groups/{}", self.config.base_url, group_id);
        self.get_json(&url, bearer).await
    }

    async fn members_page(
        &self,
        group_id: GroupId,
        filter: MemberFilter,
        bearer: &str,
    ) -> Result<MembersPage, ApiError> {
        let filter_param = match filter {
            MemberFilter::Friends => "friends",
            MemberFilter::Any => "all",
        };
        let url = format!(
            "{}/groups/{}/members?filter={}",
            self.config.base_url, group_id, filter_param
        );
        self.get_json(&url, bearer).await
    }

    async fn is_service_account(&self, group_id: GroupId, bearer: &str) -> Result<bool, ApiError> {
        let url = format!("{}/groups/{}/service_account", self.config.base_url, group_id);
        let flag: ServiceAccountFlag = self.get_json(&url, bearer).await?;
        Ok(flag.is_service_account)
    }
}
