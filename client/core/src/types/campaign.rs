use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Active,
    Paused,
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 7] = [
        CampaignStatus::Draft,
        CampaignStatus::Scheduled,
        CampaignStatus::Active,
        CampaignStatus::Paused,
        CampaignStatus::Completed,
        CampaignStatus::Failed,
        CampaignStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Scheduled => "scheduled",
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Failed => "failed",
            CampaignStatus::Cancelled => "cancelled",
            CampaignStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        CampaignStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == lowered)
            .ok_or_else(|| format!("unknown campaign status: {}", s))
    }
}

/// RCS campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type", default)]
    pub campaign_type: String,
    pub status: CampaignStatus,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_recipients: u64,
    #[serde(default)]
    pub messages_sent: u64,
    #[serde(default)]
    pub messages_delivered: u64,
    #[serde(default)]
    pub messages_failed: u64,
    #[serde(default)]
    pub messages_read: u64,
    #[serde(default)]
    pub brand_id: Option<Id>,
    #[serde(default)]
    pub agent_id: Option<Id>,
    #[serde(default)]
    pub template_id: Option<Id>,
}

impl Campaign {
    /// Delivered share of sent messages, `None` before anything was sent
    pub fn delivery_rate(&self) -> Option<f64> {
        (self.messages_sent > 0)
            .then(|| self.messages_delivered as f64 / self.messages_sent as f64)
    }
}

/// `data` payload of the campaign list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignPage {
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

/// Filters for the campaign list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignFilters {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<CampaignStatus>,
    pub campaign_type: Option<String>,
    pub search: Option<String>,
}

impl CampaignFilters {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn status(mut self, status: CampaignStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn campaign_type(mut self, campaign_type: impl Into<String>) -> Self {
        self.campaign_type = Some(campaign_type.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}
