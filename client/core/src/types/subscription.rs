use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// Billing interval of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Monthly,
    Quarterly,
    Yearly,
    #[serde(other)]
    Unknown,
}

impl BillingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Monthly => "monthly",
            BillingInterval::Quarterly => "quarterly",
            BillingInterval::Yearly => "yearly",
            BillingInterval::Unknown => "unknown",
        }
    }
}

/// Subscription plan offered to brands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub billing_interval: BillingInterval,
    #[serde(default)]
    pub message_quota: Option<u64>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Lifecycle of a brand's subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandSubscriptionStatus {
    Active,
    Pending,
    Cancelled,
    Expired,
    PastDue,
    #[serde(other)]
    Unknown,
}

impl BrandSubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrandSubscriptionStatus::Active => "active",
            BrandSubscriptionStatus::Pending => "pending",
            BrandSubscriptionStatus::Cancelled => "cancelled",
            BrandSubscriptionStatus::Expired => "expired",
            BrandSubscriptionStatus::PastDue => "past_due",
            BrandSubscriptionStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BrandSubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A brand's subscription to a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSubscription {
    pub id: Id,
    pub brand_id: Id,
    pub plan_id: Id,
    #[serde(default)]
    pub plan: Option<SubscriptionPlan>,
    pub status: BrandSubscriptionStatus,
    #[serde(default)]
    pub current_period_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_period_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancel_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub auto_renew: bool,
}

/// Payment state as reported by the billing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
    Refunded,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Unknown => "unknown",
        }
    }

    /// No further transitions expected
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Succeeded | PaymentStatus::Failed | PaymentStatus::Refunded
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Id,
    #[serde(default)]
    pub subscription_id: Option<Id>,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub status: PaymentStatus,
    #[serde(default)]
    pub provider_reference: Option<String>,
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

/// `data` payload of the payment history endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPage {
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

/// `data` payload of the payment status endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusReport {
    pub payment_id: Id,
    pub status: PaymentStatus,
    #[serde(default)]
    pub subscription_status: Option<BrandSubscriptionStatus>,
}

/// Body of the subscribe call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub brand_id: Id,
    pub plan_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
}

/// Body of the create-payment call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub subscription_id: Id,
    pub amount: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

impl CreatePaymentRequest {
    pub fn new(subscription_id: impl Into<Id>, amount: f64, currency: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            amount,
            currency: currency.into(),
            return_url: None,
        }
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_defaults() {
        let plan: SubscriptionPlan = serde_json::from_value(json!({
            "id": 1, "name": "Starter", "price": 4999.0, "billingInterval": "monthly"
        }))
        .unwrap();
        assert_eq!(plan.currency, "INR");
        assert!(plan.is_active);
        assert!(plan.features.is_empty());
    }

    #[test]
    fn test_past_due_status() {
        let status: BrandSubscriptionStatus = serde_json::from_value(json!("past_due")).unwrap();
        assert_eq!(status, BrandSubscriptionStatus::PastDue);
    }

    #[test]
    fn test_subscribe_request_is_camel_case() {
        let body = serde_json::to_value(SubscribeRequest {
            brand_id: Id::Num(4),
            plan_id: "plan_pro".into(),
            auto_renew: None,
        })
        .unwrap();
        assert_eq!(body, json!({"brandId": 4, "planId": "plan_pro"}));
    }

    #[test]
    fn test_payment_finality() {
        assert!(!PaymentStatus::Pending.is_final());
        assert!(PaymentStatus::Refunded.is_final());
    }
}
