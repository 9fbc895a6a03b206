use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// Opt-in status of a customer for one brand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Unsubscribed,
    Pending,
    #[serde(other)]
    Unknown,
}

/// A customer's subscription to a brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Id,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub subscribed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub brand_id: Option<Id>,
}

/// Audience member reachable over RCS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Id,
    pub phone_number: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub subscription_count: Option<u64>,
}

impl Customer {
    /// Reported subscription count, or the length of the embedded list
    pub fn subscription_total(&self) -> u64 {
        self.subscription_count
            .unwrap_or(self.subscriptions.len() as u64)
    }

    pub fn active_subscriptions(&self) -> impl Iterator<Item = &Subscription> {
        self.subscriptions
            .iter()
            .filter(|s| s.status == SubscriptionStatus::Active)
    }

    /// Name if known, phone number otherwise
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(self.phone_number.as_str())
    }
}

/// `data` payload of the customer list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPage {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

/// Filters for the customer list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilters {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl CustomerFilters {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_customer_keeps_subscription_order() {
        let customer: Customer = serde_json::from_value(json!({
            "id": 5,
            "phoneNumber": "+919800000001",
            "countryCode": "IN",
            "subscriptions": [
                {"id": 1, "status": "active", "brandId": 2, "subscribedAt": "2024-01-02T00:00:00Z"},
                {"id": 2, "status": "unsubscribed", "brandId": 3},
                {"id": 3, "status": "blocked"}
            ]
        }))
        .unwrap();

        let ids: Vec<_> = customer.subscriptions.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec![Id::Num(1), Id::Num(2), Id::Num(3)]);
        assert_eq!(customer.subscriptions[2].status, SubscriptionStatus::Unknown);
        assert_eq!(customer.active_subscriptions().count(), 1);
        assert_eq!(customer.subscription_total(), 3);
        assert_eq!(customer.display_name(), "+919800000001");
    }

    #[test]
    fn test_reported_count_wins() {
        let customer: Customer = serde_json::from_value(json!({
            "id": "c", "phoneNumber": "1", "name": "Asha", "subscriptionCount": 9
        }))
        .unwrap();
        assert_eq!(customer.subscription_total(), 9);
        assert_eq!(customer.display_name(), "Asha");
    }
}
