use serde_json::json;

use super::{logged, or_empty, resource};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::http::ApiClient;
use crate::query::QueryString;
use crate::types::{Campaign, CampaignFilters, CampaignPage, CampaignStatus, Id};

/// Campaign endpoints
pub struct CampaignsApi {
    client: ApiClient,
}

impl CampaignsApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// `GET /campaigns`, filtered and paginated
    ///
    /// Only the filters that are set end up in the query string; with none
    /// set the bare path is requested.
    pub async fn get_all_campaigns(
        &self,
        filters: &CampaignFilters,
    ) -> Result<Envelope<CampaignPage>> {
        let mut query = QueryString::new();
        query
            .push("page", filters.page)
            .push("limit", filters.limit)
            .push("status", filters.status)
            .push_text("type", filters.campaign_type.as_deref())
            .push_text("search", filters.search.as_deref());

        logged(
            "get_all_campaigns",
            self.client.get(&query.append_to("/campaigns"), None, None).await,
        )
    }

    pub async fn get_campaign(&self, id: &Id) -> Result<Envelope<Campaign>> {
        let path = resource("/campaigns", id, "")?;
        logged("get_campaign", self.client.get(&path, None, None).await)
    }

    /// `PATCH /campaigns/{id}/status` with `{ "status": ... }`
    pub async fn update_campaign_status(
        &self,
        id: &Id,
        status: CampaignStatus,
    ) -> Result<Envelope<Campaign>> {
        let path = resource("/campaigns", id, "/status")?;
        logged(
            "update_campaign_status",
            self.client
                .patch(&path, Some(json!({ "status": status })), None)
                .await,
        )
    }

    pub async fn delete_campaign(&self, id: &Id) -> Result<Envelope<serde_json::Value>> {
        let path = resource("/campaigns", id, "")?;
        let envelope = logged("delete_campaign", self.client.delete(&path, None, None).await)?;
        Ok(or_empty(envelope))
    }
}
