//! RCS CLI
//!
//! Command-line front end for the RCS campaign dashboard.
//!
//! # Usage
//!
//! ```bash
//! rcs auth login --user-id 42 --role admin --token "$TOKEN"
//! rcs dashboard
//! rcs campaigns list --status active --page 2 --limit 10
//! rcs campaigns set-status 31 paused
//! rcs subscriptions plans --format json
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rcs_client::{ApiClient, AuthGate, CampaignStatus, ClientConfig, FileSessionStore, Id};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;
mod views;

use commands::Context;
use error::CliError;

#[derive(Parser)]
#[command(name = "rcs")]
#[command(version)]
#[command(about = "RCS campaign dashboard command line interface", long_about = None)]
struct Cli {
    /// API base URL
    #[arg(long, env = "RCS_API_BASE_URL")]
    api_url: Option<String>,

    /// Subscription API base URL (defaults to the API base URL)
    #[arg(long, env = "RCS_SUBSCRIPTION_API_URL")]
    subscription_api_url: Option<String>,

    /// Output format
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short, env = "RCS_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, sign out, show the current session
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Show the dashboard for the current session
    Dashboard,
    /// Admin pages
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
    /// Manage campaigns
    Campaigns {
        #[command(subcommand)]
        action: CampaignCommands,
    },
    /// Browse customers
    Customers {
        #[command(subcommand)]
        action: CustomerCommands,
    },
    /// Plans, brand subscriptions and payments
    Subscriptions {
        #[command(subcommand)]
        action: SubscriptionCommands,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Store a session issued by the login service
    Login {
        #[arg(long)]
        user_id: Id,
        #[arg(long, env = "RCS_TOKEN", hide_env_values = true)]
        token: String,
        #[arg(long, default_value = "user")]
        role: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Session lifetime in hours
        #[arg(long)]
        expires_in: Option<i64>,
    },
    /// Discard the stored session
    Logout,
    /// Show the current session
    Whoami,
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Platform-wide statistics
    Dashboard,
    /// All campaigns
    Campaigns {
        #[command(flatten)]
        filters: CampaignListArgs,
    },
    /// All customers
    Customers {
        #[command(flatten)]
        filters: CustomerListArgs,
    },
}

#[derive(clap::Args, Debug, Default)]
struct CampaignListArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    status: Option<CampaignStatus>,
    #[arg(long = "type")]
    campaign_type: Option<String>,
    #[arg(long)]
    search: Option<String>,
}

#[derive(clap::Args, Debug, Default)]
struct CustomerListArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    search: Option<String>,
}

#[derive(Subcommand)]
enum CampaignCommands {
    /// List campaigns
    List {
        #[command(flatten)]
        filters: CampaignListArgs,
    },
    /// Get campaign details
    Get { id: Id },
    /// Change a campaign's status
    SetStatus { id: Id, status: CampaignStatus },
    /// Delete a campaign
    Delete { id: Id },
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// List customers
    List {
        #[command(flatten)]
        filters: CustomerListArgs,
    },
    /// Get customer details
    Get { id: Id },
}

#[derive(Subcommand)]
enum SubscriptionCommands {
    /// List subscription plans
    Plans,
    /// Get plan details
    Plan { id: Id },
    /// Subscribe a brand to a plan
    Subscribe {
        #[arg(long)]
        brand: Id,
        #[arg(long)]
        plan: Id,
        #[arg(long)]
        auto_renew: Option<bool>,
    },
    /// Current subscription of a brand
    Current {
        #[arg(long)]
        brand: Id,
    },
    /// Subscription history of a brand
    History {
        #[arg(long)]
        brand: Id,
    },
    /// Cancel a subscription
    Cancel {
        id: Id,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Move a subscription to another plan
    ChangePlan {
        id: Id,
        #[arg(long)]
        plan: Id,
    },
    /// Start a payment for a subscription
    Pay {
        #[arg(long)]
        subscription: Id,
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value = "INR")]
        currency: String,
        #[arg(long)]
        return_url: Option<String>,
    },
    /// Payment history of a brand
    Payments {
        #[arg(long)]
        brand: Id,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Status of one payment
    PaymentStatus { id: Id },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let Cli {
        api_url,
        subscription_api_url,
        format,
        profile,
        command,
    } = cli;
    let config = config::Config::load(profile.as_deref())?;

    let command = match command {
        Commands::Config { action } => {
            return commands::config::handle(action, profile.as_deref());
        }
        command => command,
    };

    let ctx = build_context(api_url, subscription_api_url, format, &config)?;

    match command {
        Commands::Auth { action } => commands::auth::handle(action, &ctx).await,
        Commands::Dashboard => commands::dashboard::handle(&ctx).await,
        Commands::Admin { action } => commands::admin::handle(action, &ctx).await,
        Commands::Campaigns { action } => commands::campaigns::handle(action, &ctx).await,
        Commands::Customers { action } => commands::customers::handle(action, &ctx).await,
        Commands::Subscriptions { action } => commands::subscriptions::handle(action, &ctx).await,
        Commands::Config { .. } => Ok(String::new()),
    }
}

/// Flags and env win over the profile, the profile over built-in defaults
fn build_context(
    api_url: Option<String>,
    subscription_api_url: Option<String>,
    format: Option<output::OutputFormat>,
    config: &config::Config,
) -> Result<Context, CliError> {
    let mut client_config = ClientConfig::from_env();
    if let Some(url) = api_url.or_else(|| config.api_url.clone()) {
        client_config.base_url = url;
    }
    if let Some(url) = subscription_api_url.or_else(|| config.subscription_api_url.clone()) {
        client_config.subscription_base_url = Some(url);
    }
    if let Some(secs) = config.timeout_secs {
        client_config = client_config.with_timeout(Duration::from_secs(secs));
    }

    let store = match &config.session_file {
        Some(path) => FileSessionStore::at(path),
        None => FileSessionStore::at_default_location()?,
    };

    let client = ApiClient::builder(client_config)
        .token_provider(Arc::new(store.clone()))
        .build()?;

    let gate = AuthGate::new(Arc::new(store.clone()))
        .enforce_admin_routes(config.enforce_admin_routes.unwrap_or(true));

    let format = match (format, config.default_format.as_deref()) {
        (Some(format), _) => format,
        (None, Some(name)) => output::OutputFormat::parse(name)?,
        (None, None) => output::OutputFormat::default(),
    };

    tracing::debug!(base_url = %client.base_url(), session = %store.path().display(), "context ready");

    Ok(Context {
        client,
        gate,
        store,
        format,
    })
}
