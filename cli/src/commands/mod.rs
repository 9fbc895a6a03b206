//! CLI Commands

pub mod admin;
pub mod auth;
pub mod campaigns;
pub mod config;
pub mod customers;
pub mod dashboard;
pub mod subscriptions;

use rcs_client::{ApiClient, AuthGate, FileSessionStore, GateDecision, Page, RedirectReason, Session};

use crate::error::CliError;
use crate::output::OutputFormat;

/// Everything a command needs
pub struct Context {
    pub client: ApiClient,
    pub gate: AuthGate,
    pub store: FileSessionStore,
    pub format: OutputFormat,
}

/// Run the gate for `page` and return the session it authorized
pub async fn authorize(ctx: &Context, page: Page) -> Result<Session, CliError> {
    match ctx.gate.check(page).await {
        GateDecision::Authorized(session) => Ok(session),
        GateDecision::Redirect { to, reason } => Err(CliError::Redirected { to, reason }),
        GateDecision::Public => Err(CliError::Redirected {
            to: rcs_client::gate::LOGIN_PATH,
            reason: RedirectReason::Unauthenticated,
        }),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use rcs_client::{
        ApiClient, AuthGate, ClientConfig, FileSessionStore, MockTransport, Session,
        StaticSession,
    };
    use tempfile::TempDir;

    use super::Context;
    use crate::output::OutputFormat;

    /// Context over a fixed in-memory session
    pub fn context(mock: &MockTransport, session: Option<Session>) -> (Context, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(match session {
            Some(session) => StaticSession::signed_in(session),
            None => StaticSession::anonymous(),
        });
        let client = ApiClient::builder(ClientConfig::new("http://backend.test/api"))
            .transport(Arc::new(mock.clone()))
            .token_provider(provider.clone())
            .build()
            .unwrap();
        let ctx = Context {
            client,
            gate: AuthGate::new(provider),
            store: FileSessionStore::at(dir.path().join("session.json")),
            format: OutputFormat::Json,
        };
        (ctx, dir)
    }

    /// Context whose gate and tokens read the on-disk session file
    pub fn stored_context(mock: &MockTransport) -> (Context, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().join("session.json"));
        let client = ApiClient::builder(ClientConfig::new("http://backend.test/api"))
            .transport(Arc::new(mock.clone()))
            .token_provider(Arc::new(store.clone()))
            .build()
            .unwrap();
        let ctx = Context {
            client,
            gate: AuthGate::new(Arc::new(store.clone())),
            store,
            format: OutputFormat::Json,
        };
        (ctx, dir)
    }
}
