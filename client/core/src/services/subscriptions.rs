use serde_json::json;

use super::{logged, resource};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::http::ApiClient;
use crate::query::QueryString;
use crate::types::{
    BrandSubscription, CreatePaymentRequest, Id, Pagination, Payment, PaymentPage,
    PaymentStatusReport, SubscribeRequest, SubscriptionPlan,
};

/// Plan, brand-subscription and payment endpoints
///
/// Bound to the subscription base URL, which may differ from the main API.
pub struct SubscriptionsApi {
    client: ApiClient,
}

impl SubscriptionsApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn list_plans(&self) -> Result<Envelope<Vec<SubscriptionPlan>>> {
        logged(
            "list_plans",
            self.client.get("/subscription-plans", None, None).await,
        )
    }

    pub async fn get_plan(&self, id: &Id) -> Result<Envelope<SubscriptionPlan>> {
        let path = resource("/subscription-plans", id, "")?;
        logged("get_plan", self.client.get(&path, None, None).await)
    }

    pub async fn subscribe(
        &self,
        request: &SubscribeRequest,
    ) -> Result<Envelope<BrandSubscription>> {
        let body = serde_json::to_value(request)?;
        logged(
            "subscribe",
            self.client
                .post("/brand-subscriptions/subscribe", Some(body), None)
                .await,
        )
    }

    /// Active subscription of a brand; `data` is absent when there is none
    pub async fn current_subscription(
        &self,
        brand_id: &Id,
    ) -> Result<Envelope<BrandSubscription>> {
        let mut query = QueryString::new();
        query.push("brandId", Some(brand_id));
        logged(
            "current_subscription",
            self.client
                .get(&query.append_to("/brand-subscriptions/current"), None, None)
                .await,
        )
    }

    pub async fn subscription_history(
        &self,
        brand_id: &Id,
    ) -> Result<Envelope<Vec<BrandSubscription>>> {
        let mut query = QueryString::new();
        query.push("brandId", Some(brand_id));
        logged(
            "subscription_history",
            self.client
                .get(&query.append_to("/brand-subscriptions/history"), None, None)
                .await,
        )
    }

    pub async fn cancel_subscription(
        &self,
        id: &Id,
        reason: Option<&str>,
    ) -> Result<Envelope<BrandSubscription>> {
        let body = match reason.map(str::trim).filter(|r| !r.is_empty()) {
            Some(reason) => json!({ "reason": reason }),
            None => json!({}),
        };
        let path = resource("/brand-subscriptions", id, "/cancel")?;
        logged(
            "cancel_subscription",
            self.client.post(&path, Some(body), None).await,
        )
    }

    pub async fn change_plan(
        &self,
        id: &Id,
        plan_id: &Id,
    ) -> Result<Envelope<BrandSubscription>> {
        let path = resource("/brand-subscriptions", id, "/change-plan")?;
        logged(
            "change_plan",
            self.client
                .post(&path, Some(json!({ "planId": plan_id })), None)
                .await,
        )
    }

    /// Start a payment; the returned payment may carry a checkout URL
    pub async fn create_payment(&self, request: &CreatePaymentRequest) -> Result<Envelope<Payment>> {
        let body = serde_json::to_value(request)?;
        logged(
            "create_payment",
            self.client
                .post("/brand-subscriptions/payments", Some(body), None)
                .await,
        )
    }

    pub async fn payment_history(
        &self,
        brand_id: &Id,
        pagination: Pagination,
    ) -> Result<Envelope<PaymentPage>> {
        let mut query = QueryString::new();
        query
            .push("brandId", Some(brand_id))
            .push("page", pagination.page)
            .push("limit", pagination.limit);
        logged(
            "payment_history",
            self.client
                .get(
                    &query.append_to("/brand-subscriptions/payment-history"),
                    None,
                    None,
                )
                .await,
        )
    }

    pub async fn payment_status(&self, payment_id: &Id) -> Result<Envelope<PaymentStatusReport>> {
        let path = resource("/brand-subscriptions/payments", payment_id, "/status")?;
        logged("payment_status", self.client.get(&path, None, None).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::config::ClientConfig;
    use crate::mock::MockTransport;
    use crate::session::{Role, Session, StaticSession};
    use crate::types::PaymentStatus;

    fn api(mock: &MockTransport) -> SubscriptionsApi {
        let session = Session::new(3u64, Role::User, "tok_brand");
        ApiClient::builder(
            ClientConfig::new("http://backend.test/api")
                .with_subscription_base_url("http://billing.test/api"),
        )
        .transport(Arc::new(mock.clone()))
        .token_provider(Arc::new(StaticSession::signed_in(session)))
        .build()
        .unwrap()
        .subscriptions()
    }

    #[tokio::test]
    async fn test_plans_use_subscription_base_and_same_token() {
        let mock = MockTransport::new();
        mock.respond_json(
            200,
            json!({"success": true, "data": [
                {"id": 1, "name": "Starter", "price": 999.0, "billingInterval": "monthly"}
            ]}),
        );

        let plans = api(&mock).list_plans().await.unwrap().into_data().unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.url.as_str(), "http://billing.test/api/subscription-plans");
        assert_eq!(request.authorization(), Some("Bearer tok_brand"));
        assert_eq!(plans[0].name, "Starter");
    }

    #[tokio::test]
    async fn test_current_subscription_query() {
        let mock = MockTransport::new();

        let envelope = api(&mock).current_subscription(&Id::Num(12)).await.unwrap();

        assert_eq!(
            mock.last_request().unwrap().path_and_query(),
            "/api/brand-subscriptions/current?brandId=12"
        );
        assert_eq!(envelope.into_optional().unwrap(), None);
    }

    #[tokio::test]
    async fn test_cancel_with_and_without_reason() {
        let mock = MockTransport::new();
        let api = api(&mock);

        api.cancel_subscription(&Id::Num(5), Some("too expensive")).await.unwrap();
        api.cancel_subscription(&Id::Num(5), Some("  ")).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url.path(), "/api/brand-subscriptions/5/cancel");
        assert_eq!(requests[0].body, Some(json!({"reason": "too expensive"})));
        assert_eq!(requests[1].body, Some(json!({})));
    }

    #[tokio::test]
    async fn test_change_plan_body() {
        let mock = MockTransport::new();

        api(&mock)
            .change_plan(&Id::Num(5), &"plan_pro".into())
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.url.path(), "/api/brand-subscriptions/5/change-plan");
        assert_eq!(request.body, Some(json!({"planId": "plan_pro"})));
    }

    #[tokio::test]
    async fn test_payment_flow() {
        let mock = MockTransport::new();
        mock.respond_json(
            201,
            json!({"success": true, "data": {
                "id": "pay_1", "amount": 999.0, "status": "pending",
                "checkoutUrl": "https://pay.test/c/pay_1"
            }}),
        );
        mock.respond_json(
            200,
            json!({"success": true, "data": {
                "paymentId": "pay_1", "status": "succeeded", "subscriptionStatus": "active"
            }}),
        );
        let api = api(&mock);

        let payment = api
            .create_payment(&CreatePaymentRequest::new(5u64, 999.0, "INR"))
            .await
            .unwrap()
            .into_data()
            .unwrap();
        let report = api
            .payment_status(&payment.id)
            .await
            .unwrap()
            .into_data()
            .unwrap();

        let requests = mock.requests();
        assert_eq!(
            requests[0].body,
            Some(json!({"subscriptionId": 5, "amount": 999.0, "currency": "INR"}))
        );
        assert_eq!(requests[1].url.path(), "/api/brand-subscriptions/payments/pay_1/status");
        assert_eq!(payment.checkout_url.as_deref(), Some("https://pay.test/c/pay_1"));
        assert_eq!(report.status, PaymentStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_payment_status_id_is_encoded() {
        let mock = MockTransport::new();

        api(&mock)
            .payment_status(&Id::Str("../../admin".into()))
            .await
            .unwrap();

        assert_eq!(
            mock.last_request().unwrap().url.path(),
            "/api/brand-subscriptions/payments/..%2F..%2Fadmin/status"
        );
    }

    #[tokio::test]
    async fn test_payment_history_query() {
        let mock = MockTransport::new();

        api(&mock)
            .payment_history(
                &Id::Num(12),
                Pagination {
                    page: Some(2),
                    limit: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(
            mock.last_request().unwrap().path_and_query(),
            "/api/brand-subscriptions/payment-history?brandId=12&page=2"
        );
    }
}
