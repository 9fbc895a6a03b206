//! Client configuration

use std::time::Duration;

use crate::error::{Error, Result};

/// Default API base URL, used when `RCS_API_BASE_URL` is unset
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the primary API base URL
pub const BASE_URL_ENV: &str = "RCS_API_BASE_URL";

/// Environment variable holding the subscription API base URL
pub const SUBSCRIPTION_URL_ENV: &str = "RCS_SUBSCRIPTION_API_URL";

/// Configuration for [`crate::ApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every primary endpoint path is appended to
    pub base_url: String,
    /// Base URL for the subscription/payment endpoints; `None` means `base_url`
    pub subscription_base_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Value sent as `User-Agent`
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            subscription_base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("rcs-client/{}", crate::VERSION),
        }
    }
}

impl ClientConfig {
    /// Build a config for an explicit base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Read `RCS_API_BASE_URL` and `RCS_SUBSCRIPTION_API_URL`, falling back
    /// to [`DEFAULT_BASE_URL`]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            base_url: non_empty(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            subscription_base_url: non_empty(SUBSCRIPTION_URL_ENV),
            ..Default::default()
        }
    }

    pub fn with_subscription_base_url(mut self, url: impl Into<String>) -> Self {
        self.subscription_base_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL the subscription module talks to
    pub fn subscription_base(&self) -> &str {
        self.subscription_base_url
            .as_deref()
            .unwrap_or(&self.base_url)
    }

    /// Check that both base URLs parse as absolute URLs
    pub fn validate(&self) -> Result<()> {
        for raw in [Some(self.base_url.as_str()), self.subscription_base_url.as_deref()]
            .into_iter()
            .flatten()
        {
            let url = url::Url::parse(raw)?;
            if url.cannot_be_a_base() {
                return Err(Error::Config(format!("{} cannot be used as a base URL", raw)));
            }
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".into()));
        }
        Ok(())
    }
}
