//! CLI errors

use rcs_client::{RedirectReason, SessionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] rcs_client::Error),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("{}", redirect_message(.to, *.reason))]
    Redirected {
        to: &'static str,
        reason: RedirectReason,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to render output: {0}")]
    Render(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn redirect_message(to: &str, reason: RedirectReason) -> String {
    match reason {
        RedirectReason::Unauthenticated => {
            format!("not signed in (redirect to {}); run `rcs auth login` first", to)
        }
        RedirectReason::Forbidden => {
            format!("this page requires the admin role (redirect to {})", to)
        }
        RedirectReason::AdminHome => format!("redirected to {}", to),
    }
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(e: toml::ser::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Render(e.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        CliError::Render(e.to_string())
    }
}
