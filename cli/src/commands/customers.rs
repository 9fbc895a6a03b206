//! Customer commands

use rcs_client::{CustomerFilters, Page};

use super::{authorize, Context};
use crate::error::CliError;
use crate::output::OutputFormat;
use crate::views::{self, CustomerRow};
use crate::{CustomerCommands, CustomerListArgs};

pub async fn handle(action: CustomerCommands, ctx: &Context) -> Result<String, CliError> {
    authorize(ctx, Page::Customers).await?;

    match action {
        CustomerCommands::List { filters } => list(ctx, filters).await,
        CustomerCommands::Get { id } => {
            let customer = ctx.client.customers().get_customer(&id).await?.into_data()?;
            ctx.format
                .render(&customer, &[CustomerRow::from(&customer)])
        }
    }
}

/// List customers without gating; callers authorize first
pub(crate) async fn list(ctx: &Context, args: CustomerListArgs) -> Result<String, CliError> {
    let filters = CustomerFilters {
        page: args.page,
        limit: args.limit,
        search: args.search,
    };
    let page = ctx
        .client
        .customers()
        .get_all_customers(&filters)
        .await?
        .into_data()?;

    let rows: Vec<CustomerRow> = views::rows(&page.customers);
    let rendered = ctx.format.render(&page, &rows)?;
    if ctx.format == OutputFormat::Table && !rows.is_empty() {
        return Ok(format!(
            "{}\nShowing {} of {} customers",
            rendered,
            rows.len(),
            page.total
        ));
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use rcs_client::{MockTransport, Role, Session};
    use serde_json::json;

    use super::*;
    use crate::commands::testing::context;

    #[tokio::test]
    async fn test_table_footer_counts() {
        let mock = MockTransport::new();
        mock.respond_json(
            200,
            json!({"success": true, "data": {
                "customers": [{"id": 1, "phoneNumber": "+919800000001", "name": "Asha"}],
                "total": 40
            }}),
        );
        let (mut ctx, _dir) = context(&mock, Some(Session::new(1u64, Role::User, "t")));
        ctx.format = OutputFormat::Table;

        let out = handle(
            CustomerCommands::List {
                filters: CustomerListArgs {
                    search: Some("asha".into()),
                    ..Default::default()
                },
            },
            &ctx,
        )
        .await
        .unwrap();

        assert!(out.contains("Asha"));
        assert!(out.ends_with("Showing 1 of 40 customers"));
        assert_eq!(mock.last_request().unwrap().path_and_query(), "/api/customers?search=asha");
    }
}
