//! Dashboard command

use rcs_client::{CampaignFilters, GateDecision, Page, RedirectReason, Session};

use super::{admin, Context};
use crate::error::CliError;
use crate::views::{self, StatCard};

/// Root page: admins are sent to the admin dashboard, everyone else sees
/// their own campaign figures
pub async fn handle(ctx: &Context) -> Result<String, CliError> {
    match ctx.gate.check(Page::Root).await {
        GateDecision::Authorized(session) => user_dashboard(ctx, &session).await,
        GateDecision::Redirect {
            reason: RedirectReason::AdminHome,
            to,
        } => {
            tracing::info!(to, "admin session, showing admin dashboard");
            admin::dashboard(ctx).await
        }
        GateDecision::Redirect { to, reason } => Err(CliError::Redirected { to, reason }),
        GateDecision::Public => Err(CliError::Redirected {
            to: rcs_client::gate::LOGIN_PATH,
            reason: RedirectReason::Unauthenticated,
        }),
    }
}

async fn user_dashboard(ctx: &Context, session: &Session) -> Result<String, CliError> {
    let page = ctx
        .client
        .campaigns()
        .get_all_campaigns(&CampaignFilters::default())
        .await?
        .into_data()?;

    let mut cards = vec![StatCard {
        label: "Signed in as".into(),
        value: session
            .name
            .clone()
            .unwrap_or_else(|| session.user_id.to_string()),
    }];
    cards.extend(views::campaign_stats(&page));
    ctx.format.render(&cards, &cards)
}
