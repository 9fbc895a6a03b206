//! RCS Client - Authenticated API access layer for the RCS campaign dashboard
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          RCS CLIENT                                 │
//! │                                                                     │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────┐  │
//! │  │  Campaigns   │  │  Customers   │  │ Subscriptions / Payments │  │
//! │  │     API      │  │     API      │  │           API            │  │
//! │  └──────┬───────┘  └──────┬───────┘  └────────────┬─────────────┘  │
//! │         │                 │                       │                │
//! │  ┌──────▼─────────────────▼───────────────────────▼─────────────┐  │
//! │  │   ApiClient (bearer injection, envelope decode, error log)   │  │
//! │  └──────┬──────────────────────────────────────────┬────────────┘  │
//! │         │                                          │               │
//! │  ┌──────▼───────┐                        ┌─────────▼────────────┐  │
//! │  │  Transport   │                        │    TokenProvider     │  │
//! │  │ reqwest/mock │                        │  session / stored    │  │
//! │  └──────────────┘                        └──────────────────────┘  │
//! │                                                                     │
//! │  ┌──────────────┐  ┌──────────────┐                                │
//! │  │   AuthGate   │  │LatestResponse│                                │
//! │  └──────────────┘  └──────────────┘                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rcs_client::{ApiClient, CampaignFilters, CampaignStatus, ClientConfig, FileSessionStore};
//!
//! # async fn run() -> rcs_client::Result<()> {
//! let client = ApiClient::builder(ClientConfig::from_env())
//!     .token_provider(Arc::new(FileSessionStore::at_default_location()?))
//!     .build()?;
//!
//! let page = client
//!     .campaigns()
//!     .get_all_campaigns(&CampaignFilters::default().status(CampaignStatus::Active))
//!     .await?
//!     .into_data()?;
//!
//! println!("{} active campaigns", page.total);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod gate;
pub mod http;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod query;
pub mod services;
pub mod session;
pub mod staleness;
pub mod status;
pub mod transport;
pub mod types;

pub use config::ClientConfig;
pub use envelope::Envelope;
pub use error::{Error, Result};
pub use gate::{AuthGate, GateDecision, Page, RedirectReason};
pub use http::{ApiClient, ApiClientBuilder, Payload};
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockTransport;
pub use services::{CampaignsApi, CustomersApi, SubscriptionsApi};
pub use session::{
    FileSessionStore, Role, Session, SessionError, SessionResolver, StaticSession, StoredToken,
    TokenProvider,
};
pub use staleness::{LatestResponse, Ticket};
pub use status::{is_request_error, is_request_successful, HasStatus};
pub use transport::{ApiRequest, RawResponse, ReqwestTransport, Transport};
pub use types::*;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
