//! Admin commands

use rcs_client::{CampaignFilters, CustomerFilters, Page};

use super::{authorize, campaigns, customers, Context};
use crate::error::CliError;
use crate::views;
use crate::AdminCommands;

pub async fn handle(action: AdminCommands, ctx: &Context) -> Result<String, CliError> {
    match action {
        AdminCommands::Dashboard => dashboard(ctx).await,
        AdminCommands::Campaigns { filters } => {
            authorize(ctx, Page::AdminCampaigns).await?;
            campaigns::list(ctx, filters).await
        }
        AdminCommands::Customers { filters } => {
            authorize(ctx, Page::AdminCustomers).await?;
            customers::list(ctx, filters).await
        }
    }
}

/// Campaign and customer figures across the platform
pub async fn dashboard(ctx: &Context) -> Result<String, CliError> {
    authorize(ctx, Page::AdminDashboard).await?;

    let campaign_page = ctx
        .client
        .campaigns()
        .get_all_campaigns(&CampaignFilters::default())
        .await?
        .into_data()?;
    let customer_page = ctx
        .client
        .customers()
        .get_all_customers(&CustomerFilters::default())
        .await?
        .into_data()?;

    let mut cards = views::campaign_stats(&campaign_page);
    cards.extend(views::customer_stats(&customer_page));
    ctx.format.render(&cards, &cards)
}
