//! Config commands

use crate::config::Config;
use crate::error::CliError;
use crate::ConfigCommands;

pub fn handle(action: ConfigCommands, profile: Option<&str>) -> Result<String, CliError> {
    match action {
        ConfigCommands::Init => {
            let path = Config::default().save(profile)?;
            Ok(format!("Configuration initialized at {}", path.display()))
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile)?;
            config.set(&key, &value)?;
            config.save(profile)?;
            Ok(format!("Set {} successfully", key))
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile)?;
            let value = config.get(&key)?;
            Ok(format!(
                "{}: {}",
                key,
                value.unwrap_or_else(|| "(not set)".into())
            ))
        }
        ConfigCommands::List => {
            let config = Config::load(profile)?;
            Ok(config
                .entries()
                .into_iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}
