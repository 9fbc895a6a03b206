//! Subscription and payment commands

use rcs_client::{CreatePaymentRequest, Page, Pagination, SubscribeRequest};

use super::{authorize, Context};
use crate::error::CliError;
use crate::output::OutputFormat;
use crate::views::{self, PaymentRow, PlanRow, SubscriptionRow};
use crate::SubscriptionCommands;

pub async fn handle(action: SubscriptionCommands, ctx: &Context) -> Result<String, CliError> {
    authorize(ctx, Page::Subscriptions).await?;
    let api = ctx.client.subscriptions();

    match action {
        SubscriptionCommands::Plans => {
            let plans = api.list_plans().await?.into_data()?;
            let rows: Vec<PlanRow> = views::rows(&plans);
            ctx.format.render(&plans, &rows)
        }
        SubscriptionCommands::Plan { id } => {
            let plan = api.get_plan(&id).await?.into_data()?;
            ctx.format.render(&plan, &[PlanRow::from(&plan)])
        }
        SubscriptionCommands::Subscribe {
            brand,
            plan,
            auto_renew,
        } => {
            let request = SubscribeRequest {
                brand_id: brand,
                plan_id: plan,
                auto_renew,
            };
            let subscription = api.subscribe(&request).await?.into_data()?;
            ctx.format
                .render(&subscription, &[SubscriptionRow::from(&subscription)])
        }
        SubscriptionCommands::Current { brand } => {
            match api.current_subscription(&brand).await?.into_optional()? {
                Some(subscription) => ctx
                    .format
                    .render(&subscription, &[SubscriptionRow::from(&subscription)]),
                None if ctx.format == OutputFormat::Table => {
                    Ok(format!("Brand {} has no active subscription", brand))
                }
                None => ctx.format.render(&None::<()>, &[] as &[SubscriptionRow]),
            }
        }
        SubscriptionCommands::History { brand } => {
            let history = api
                .subscription_history(&brand)
                .await?
                .into_optional()?
                .unwrap_or_default();
            let rows: Vec<SubscriptionRow> = views::rows(&history);
            ctx.format.render(&history, &rows)
        }
        SubscriptionCommands::Cancel { id, reason } => {
            let envelope = api.cancel_subscription(&id, reason.as_deref()).await?;
            let message = envelope.message.clone();
            envelope.into_optional()?;
            Ok(if message.is_empty() {
                format!("Cancelled subscription {}", id)
            } else {
                message
            })
        }
        SubscriptionCommands::ChangePlan { id, plan } => {
            let subscription = api.change_plan(&id, &plan).await?.into_data()?;
            ctx.format
                .render(&subscription, &[SubscriptionRow::from(&subscription)])
        }
        SubscriptionCommands::Pay {
            subscription,
            amount,
            currency,
            return_url,
        } => {
            if !(amount.is_finite() && amount > 0.0) {
                return Err(CliError::InvalidArgument(format!(
                    "amount must be positive, got {}",
                    amount
                )));
            }
            let mut request = CreatePaymentRequest::new(subscription, amount, currency);
            request.return_url = return_url;
            let payment = api.create_payment(&request).await?.into_data()?;
            ctx.format.render(&payment, &[PaymentRow::from(&payment)])
        }
        SubscriptionCommands::Payments { brand, page, limit } => {
            let history = api
                .payment_history(&brand, Pagination { page, limit })
                .await?
                .into_data()?;
            let rows: Vec<PaymentRow> = views::rows(&history.payments);
            ctx.format.render(&history, &rows)
        }
        SubscriptionCommands::PaymentStatus { id } => {
            let report = api.payment_status(&id).await?.into_data()?;
            match ctx.format {
                OutputFormat::Table => Ok(format!(
                    "Payment {} is {}{}",
                    report.payment_id,
                    report.status,
                    if report.status.is_final() { "" } else { " (not final yet)" }
                )),
                _ => ctx.format.render(&report, &[] as &[PaymentRow]),
            }
        }
    }
}
