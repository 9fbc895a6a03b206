//! HTTP Client Core
//!
//! [`ApiClient`] is the single point of network egress. Every call goes
//! through the same two steps:
//!
//! * outgoing: default headers are applied and, when a [`TokenProvider`] is
//!   configured, `Authorization: Bearer <token>` is attached. A provider that
//!   fails is logged and the request goes out unauthenticated.
//! * incoming: a 2xx body is decoded and returned as-is. Anything else is
//!   logged with its body (401 gets an extra notice) and returned as
//!   [`Error::Api`].

use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::services::{CampaignsApi, CustomersApi, SubscriptionsApi};
use crate::session::TokenProvider;
use crate::status::is_request_successful;
use crate::transport::{ApiRequest, RawResponse, ReqwestTransport, Transport};

/// JSON request payload
pub type Payload = serde_json::Value;

/// Configured API client
///
/// Cheap to clone; clones share the transport and token provider.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    base_url: String,
    transport: Arc<dyn Transport>,
    tokens: Option<Arc<dyn TokenProvider>>,
    default_headers: HeaderMap,
}

/// Builder for [`ApiClient`]
pub struct ApiClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    tokens: Option<Arc<dyn TokenProvider>>,
}

impl ApiClientBuilder {
    /// Replace the network layer (defaults to [`ReqwestTransport`])
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Source of bearer tokens; without one no `Authorization` header is sent
    pub fn token_provider(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        self.config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&self.config.user_agent)
                .map_err(|_| Error::Config(format!("invalid user agent: {}", self.config.user_agent)))?,
        );

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.config.timeout)?),
        };

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                base_url: self.config.base_url.clone(),
                config: self.config,
                transport,
                tokens: self.tokens,
                default_headers,
            }),
        })
    }
}

impl ApiClient {
    pub fn builder(config: ClientConfig) -> ApiClientBuilder {
        ApiClientBuilder {
            config,
            transport: None,
            tokens: None,
        }
    }

    /// Client with the reqwest transport and no token provider
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Base URL this handle sends to
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Campaign endpoints
    pub fn campaigns(&self) -> CampaignsApi {
        CampaignsApi::new(self.clone())
    }

    /// Customer endpoints
    pub fn customers(&self) -> CustomersApi {
        CustomersApi::new(self.clone())
    }

    /// Subscription, plan and payment endpoints, sent to the subscription base URL
    pub fn subscriptions(&self) -> SubscriptionsApi {
        SubscriptionsApi::new(self.rebased(self.inner.config.subscription_base()))
    }

    /// Same transport and token provider, different base URL
    pub fn rebased(&self, base_url: &str) -> ApiClient {
        if base_url == self.inner.base_url {
            return self.clone();
        }
        ApiClient {
            inner: Arc::new(ClientInner {
                config: self.inner.config.clone(),
                base_url: base_url.to_string(),
                transport: Arc::clone(&self.inner.transport),
                tokens: self.inner.tokens.clone(),
                default_headers: self.inner.default_headers.clone(),
            }),
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: Option<Payload>,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        self.request(Method::GET, path, payload, headers).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: Option<Payload>,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        self.request(Method::POST, path, payload, headers).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: Option<Payload>,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        self.request(Method::PUT, path, payload, headers).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: Option<Payload>,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        self.request(Method::PATCH, path, payload, headers).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: Option<Payload>,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        self.request(Method::DELETE, path, payload, headers).await
    }

    /// Send one request and decode the 2xx body into `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Option<Payload>,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        let url = self.url_for(path)?;

        let mut request_headers = self.inner.default_headers.clone();
        if let Some(extra) = headers {
            for (name, value) in extra.iter() {
                request_headers.insert(name.clone(), value.clone());
            }
        }
        self.attach_token(&mut request_headers).await;

        tracing::debug!(%method, %url, "sending request");

        let request = ApiRequest {
            method: method.clone(),
            url,
            headers: request_headers,
            body: payload,
        };

        let response = match self.inner.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(%method, path, error = %e, "request failed before a response arrived");
                return Err(e);
            }
        };

        decode_response(&method, path, response)
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        let base = self.inner.base_url.trim_end_matches('/');
        let url = if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        };
        Ok(Url::parse(&url)?)
    }

    async fn attach_token(&self, headers: &mut HeaderMap) {
        let Some(tokens) = &self.inner.tokens else {
            return;
        };

        match tokens.bearer_token().await {
            Ok(Some(token)) => match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(header::AUTHORIZATION, value);
                }
                Err(_) => {
                    tracing::warn!("bearer token is not a valid header value; sending unauthenticated");
                }
            },
            Ok(None) => {
                tracing::debug!("no session; sending unauthenticated");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to resolve session; sending unauthenticated");
            }
        }
    }
}

fn decode_response<T: DeserializeOwned>(
    method: &Method,
    path: &str,
    response: RawResponse,
) -> Result<T> {
    let status = response.status;

    if is_request_successful(&response) {
        let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &response.body
        };
        return serde_json::from_slice(body).map_err(|e| {
            tracing::error!(%method, path, status = status.as_u16(), error = %e, "response body did not match the expected shape");
            Error::Json(e)
        });
    }

    let body = response.body_text();
    tracing::error!(%method, path, status = status.as_u16(), body = %body, "request failed");

    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!(path, "unauthorized response; the session may have expired or been revoked");
    }

    let message = error_message(&body)
        .or_else(|| status.canonical_reason().map(String::from))
        .unwrap_or_else(|| "request failed".to_string());

    Err(Error::Api {
        status: status.as_u16(),
        message,
        body,
    })
}

/// `message` (or `error`) field of a JSON error body
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .into_iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .filter(|m| !m.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::session::{Role, Session, SessionError, StaticSession};
    use async_trait::async_trait;
    use serde_json::json;

    struct BrokenTokens;

    #[async_trait]
    impl TokenProvider for BrokenTokens {
        async fn bearer_token(&self) -> std::result::Result<Option<String>, SessionError> {
            Err(SessionError::Invalid("corrupt session".into()))
        }
    }

    fn client_with(mock: &MockTransport, tokens: Option<Arc<dyn TokenProvider>>) -> ApiClient {
        let mut builder = ApiClient::builder(ClientConfig::new("http://backend.test/api"))
            .transport(Arc::new(mock.clone()));
        if let Some(tokens) = tokens {
            builder = builder.token_provider(tokens);
        }
        builder.build().unwrap()
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_signed_in() {
        let mock = MockTransport::new();
        let session = Session::new(1u64, Role::User, "tok_abc");
        let client = client_with(&mock, Some(Arc::new(StaticSession::signed_in(session))));

        let _: serde_json::Value = client.get("/campaigns", None, None).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.authorization(), Some("Bearer tok_abc"));
        assert_eq!(request.url.as_str(), "http://backend.test/api/campaigns");
    }

    #[tokio::test]
    async fn test_anonymous_request_is_still_sent() {
        let mock = MockTransport::new();
        let client = client_with(&mock, Some(Arc::new(StaticSession::anonymous())));

        let _: serde_json::Value = client.get("/campaigns", None, None).await.unwrap();

        assert_eq!(mock.request_count(), 1);
        assert!(mock.last_request().unwrap().authorization().is_none());
    }

    #[tokio::test]
    async fn test_token_failure_does_not_block_request() {
        let mock = MockTransport::new();
        mock.respond_json(200, json!({"success": true, "data": 1}));
        let client = client_with(&mock, Some(Arc::new(BrokenTokens)));

        let body: serde_json::Value = client.get("/customers", None, None).await.unwrap();

        assert_eq!(body["data"], 1);
        assert!(mock.last_request().unwrap().authorization().is_none());
    }

    #[tokio::test]
    async fn test_default_and_extra_headers() {
        let mock = MockTransport::new();
        let client = client_with(&mock, None);
        let mut extra = HeaderMap::new();
        extra.insert("x-request-id", HeaderValue::from_static("req-1"));

        let _: serde_json::Value = client
            .post("campaigns", Some(json!({"name": "x"})), Some(extra))
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(request.headers["x-request-id"], "req-1");
        assert_eq!(request.body, Some(json!({"name": "x"})));
        assert_eq!(request.url.path(), "/api/campaigns");
    }

    #[tokio::test]
    async fn test_unauthorized_is_returned_as_api_error() {
        let mock = MockTransport::new();
        mock.respond_json(401, json!({"success": false, "message": "Token expired"}));
        let client = client_with(&mock, None);

        let err = client
            .get::<serde_json::Value>("/campaigns", None, None)
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        match err {
            Error::Api { message, body, .. } => {
                assert_eq!(message, "Token expired");
                assert!(body.contains("Token expired"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_without_json_body_uses_reason_phrase() {
        let mock = MockTransport::new();
        mock.respond(RawResponse::new(StatusCode::BAD_GATEWAY, "upstream down"));
        let client = client_with(&mock, None);

        let err = client
            .delete::<serde_json::Value>("/campaigns/4", None, None)
            .await
            .unwrap_err();

        match err {
            Error::Api { status, message, .. } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_success_body_decodes_as_null() {
        let mock = MockTransport::new();
        mock.respond(RawResponse::new(StatusCode::NO_CONTENT, Vec::new()));
        let client = client_with(&mock, None);

        let body: Option<serde_json::Value> = client.delete("/campaigns/4", None, None).await.unwrap();
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let mock = MockTransport::new();
        mock.fail("connection refused");
        let client = client_with(&mock, None);

        let err = client
            .put::<serde_json::Value>("/campaigns/4", Some(json!({})), None)
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_subscriptions_use_their_own_base_url() {
        let mock = MockTransport::new();
        let config = ClientConfig::new("http://backend.test/api")
            .with_subscription_base_url("http://billing.test/v2/");
        let client = ApiClient::builder(config)
            .transport(Arc::new(mock.clone()))
            .build()
            .unwrap();

        assert_eq!(client.subscriptions().client().base_url(), "http://billing.test/v2/");
        let _: serde_json::Value = client
            .subscriptions()
            .client()
            .get("/subscription-plans", None, None)
            .await
            .unwrap();
        assert_eq!(
            mock.last_request().unwrap().url.as_str(),
            "http://billing.test/v2/subscription-plans"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = ApiClient::builder(ClientConfig::new("not a url"))
            .transport(Arc::new(MockTransport::new()))
            .build();
        assert!(result.is_err());
    }
}
