//! Domain API modules
//!
//! Thin wrappers over [`ApiClient`](crate::ApiClient): each method builds a
//! path and optional body, sends it, and returns the backend [`Envelope`]
//! unchanged. Failures are logged here and propagated.

mod campaigns;
mod customers;
mod subscriptions;

pub use campaigns::CampaignsApi;
pub use customers::CustomersApi;
pub use subscriptions::SubscriptionsApi;

use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::types::Id;

/// Log a failed call with the operation that issued it
fn logged<T>(operation: &'static str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        tracing::error!(operation, status = ?e.status(), error = %e, "api call failed");
    }
    result
}

/// Endpoints that may answer with an empty body
fn or_empty<T>(envelope: Option<Envelope<T>>) -> Envelope<T> {
    envelope.unwrap_or(Envelope {
        success: true,
        message: String::new(),
        data: None,
    })
}

/// `{prefix}/{id}{suffix}` with the id percent-encoded as a single segment
fn resource(prefix: &str, id: &Id, suffix: &str) -> Result<String> {
    let raw = id.to_string();
    if raw.trim().is_empty() || raw == "." || raw == ".." {
        return Err(Error::InvalidId(raw));
    }
    Ok(format!("{}/{}{}", prefix, urlencoding::encode(&raw), suffix))
}
