//! Campaign commands

use rcs_client::{CampaignFilters, CampaignPage, Page};

use super::{authorize, Context};
use crate::error::CliError;
use crate::output::OutputFormat;
use crate::views::{self, CampaignRow};
use crate::{CampaignCommands, CampaignListArgs};

pub async fn handle(action: CampaignCommands, ctx: &Context) -> Result<String, CliError> {
    authorize(ctx, Page::Campaigns).await?;
    let api = ctx.client.campaigns();

    match action {
        CampaignCommands::List { filters } => list(ctx, filters).await,
        CampaignCommands::Get { id } => {
            let campaign = api.get_campaign(&id).await?.into_data()?;
            ctx.format
                .render(&campaign, &[CampaignRow::from(&campaign)])
        }
        CampaignCommands::SetStatus { id, status } => {
            let envelope = api.update_campaign_status(&id, status).await?;
            let message = envelope.message.clone();
            let updated = envelope.into_optional()?;
            match ctx.format {
                OutputFormat::Table => Ok(if message.is_empty() {
                    format!("Campaign {} is now {}", id, status)
                } else {
                    message
                }),
                _ => ctx.format.render(&updated, &[] as &[CampaignRow]),
            }
        }
        CampaignCommands::Delete { id } => {
            let envelope = api.delete_campaign(&id).await?;
            envelope.into_optional()?;
            Ok(format!("Deleted campaign {}", id))
        }
    }
}

/// List campaigns without gating; callers authorize first
pub(crate) async fn list(ctx: &Context, args: CampaignListArgs) -> Result<String, CliError> {
    let page = ctx
        .client
        .campaigns()
        .get_all_campaigns(&filters(args))
        .await?
        .into_data()?;
    render_page(ctx.format, &page)
}

fn filters(args: CampaignListArgs) -> CampaignFilters {
    CampaignFilters {
        page: args.page,
        limit: args.limit,
        status: args.status,
        campaign_type: args.campaign_type,
        search: args.search,
    }
}

fn render_page(format: OutputFormat, page: &CampaignPage) -> Result<String, CliError> {
    let rows: Vec<CampaignRow> = views::rows(&page.campaigns);
    let rendered = format.render(page, &rows)?;
    if format == OutputFormat::Table && !rows.is_empty() {
        return Ok(format!(
            "{}\nShowing {} of {} campaigns",
            rendered,
            rows.len(),
            page.total
        ));
    }
    Ok(rendered)
}
