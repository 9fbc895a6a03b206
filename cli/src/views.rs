//! Dashboard views: stat cards and list rows

use colored::Colorize;
use rcs_client::{
    BrandSubscription, BrandSubscriptionStatus, Campaign, CampaignPage, CampaignStatus, Customer,
    CustomerPage, Payment, PaymentStatus, SubscriptionPlan,
};
use serde::Serialize;
use tabled::Tabled;

/// Labelled figure shown at the top of a dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct StatCard {
    #[tabled(rename = "Metric")]
    pub label: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl StatCard {
    fn new(label: &str, value: impl ToString) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

pub fn campaign_stats(page: &CampaignPage) -> Vec<StatCard> {
    let active = page
        .campaigns
        .iter()
        .filter(|c| c.status == CampaignStatus::Active)
        .count();
    let sent: u64 = page.campaigns.iter().map(|c| c.messages_sent).sum();
    let delivered: u64 = page.campaigns.iter().map(|c| c.messages_delivered).sum();

    vec![
        StatCard::new("Total campaigns", page.total),
        StatCard::new("Active campaigns", active),
        StatCard::new("Messages sent", sent),
        StatCard::new("Delivery rate", percent(delivered, sent)),
    ]
}

pub fn customer_stats(page: &CustomerPage) -> Vec<StatCard> {
    let subscribed = page
        .customers
        .iter()
        .filter(|c| c.active_subscriptions().next().is_some())
        .count();

    vec![
        StatCard::new("Total customers", page.total),
        StatCard::new("Subscribed on this page", subscribed),
    ]
}

fn percent(part: u64, whole: u64) -> String {
    if whole == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / whole as f64)
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CampaignRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub campaign_type: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Recipients")]
    pub recipients: u64,
    #[tabled(rename = "Sent")]
    pub sent: u64,
    #[tabled(rename = "Delivered")]
    pub delivered: String,
    #[tabled(rename = "Scheduled")]
    pub scheduled: String,
}

impl From<&Campaign> for CampaignRow {
    fn from(c: &Campaign) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            campaign_type: dash_if_empty(&c.campaign_type),
            status: campaign_badge(c.status),
            recipients: c.total_recipients,
            sent: c.messages_sent,
            delivered: percent(c.messages_delivered, c.messages_sent),
            scheduled: c
                .scheduled_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CustomerRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Phone")]
    pub phone: String,
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "Subscriptions")]
    pub subscriptions: u64,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.display_name().to_string(),
            phone: c.phone_number.clone(),
            country: c.country_code.clone().unwrap_or_else(|| "-".into()),
            subscriptions: c.subscription_total(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PlanRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Plan")]
    pub name: String,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Interval")]
    pub interval: String,
    #[tabled(rename = "Quota")]
    pub quota: String,
    #[tabled(rename = "Available")]
    pub available: bool,
}

impl From<&SubscriptionPlan> for PlanRow {
    fn from(p: &SubscriptionPlan) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            price: format!("{:.2} {}", p.price, p.currency),
            interval: p.billing_interval.as_str().to_string(),
            quota: p
                .message_quota
                .map(|q| q.to_string())
                .unwrap_or_else(|| "unlimited".into()),
            available: p.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SubscriptionRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Plan")]
    pub plan: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Period ends")]
    pub period_end: String,
    #[tabled(rename = "Auto-renew")]
    pub auto_renew: bool,
}

impl From<&BrandSubscription> for SubscriptionRow {
    fn from(s: &BrandSubscription) -> Self {
        Self {
            id: s.id.to_string(),
            plan: s
                .plan
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_else(|| s.plan_id.to_string()),
            status: subscription_badge(s.status),
            period_end: s
                .current_period_end
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".into()),
            auto_renew: s.auto_renew,
        }
    }
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PaymentRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Created")]
    pub created: String,
    #[tabled(rename = "Checkout")]
    pub checkout: String,
}

impl From<&Payment> for PaymentRow {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id.to_string(),
            amount: format!("{:.2} {}", p.amount, p.currency),
            status: payment_badge(p.status),
            created: p
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".into()),
            checkout: p.checkout_url.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

pub fn rows<'a, T, R>(items: &'a [T]) -> Vec<R>
where
    R: From<&'a T>,
{
    items.iter().map(R::from).collect()
}

pub fn campaign_badge(status: CampaignStatus) -> String {
    let text = status.as_str();
    match status {
        CampaignStatus::Active => text.green().to_string(),
        CampaignStatus::Scheduled => text.cyan().to_string(),
        CampaignStatus::Paused => text.yellow().to_string(),
        CampaignStatus::Failed | CampaignStatus::Cancelled => text.red().to_string(),
        CampaignStatus::Completed => text.blue().to_string(),
        CampaignStatus::Draft | CampaignStatus::Unknown => text.dimmed().to_string(),
    }
}

fn subscription_badge(status: BrandSubscriptionStatus) -> String {
    let text = status.as_str();
    match status {
        BrandSubscriptionStatus::Active => text.green().to_string(),
        BrandSubscriptionStatus::Pending => text.yellow().to_string(),
        BrandSubscriptionStatus::PastDue => text.red().bold().to_string(),
        _ => text.dimmed().to_string(),
    }
}

fn payment_badge(status: PaymentStatus) -> String {
    let text = status.as_str();
    match status {
        PaymentStatus::Succeeded => text.green().to_string(),
        PaymentStatus::Pending => text.yellow().to_string(),
        PaymentStatus::Failed => text.red().to_string(),
        _ => text.dimmed().to_string(),
    }
}

fn dash_if_empty(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
