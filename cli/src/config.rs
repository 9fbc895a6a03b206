//! CLI configuration profiles

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Keys accepted by `rcs config set|get`
pub const KEYS: [&str; 6] = [
    "api_url",
    "subscription_api_url",
    "default_format",
    "session_file",
    "enforce_admin_routes",
    "timeout_secs",
];

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub subscription_api_url: Option<String>,
    pub default_format: Option<String>,
    pub session_file: Option<PathBuf>,
    pub enforce_admin_routes: Option<bool>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load `~/.rcs/config[.<profile>].toml`; a missing file yields defaults
    pub fn load(profile: Option<&str>) -> Result<Self, CliError> {
        Self::load_from(&Self::path(profile)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf, CliError> {
        let path = Self::path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn path(profile: Option<&str>) -> Result<PathBuf, CliError> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("cannot find home directory".into()))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(rcs_client::session::STATE_DIR).join(filename))
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CliError> {
        match key {
            "api_url" => self.api_url = Some(value.to_string()),
            "subscription_api_url" => self.subscription_api_url = Some(value.to_string()),
            "default_format" => {
                crate::output::OutputFormat::parse(value)?;
                self.default_format = Some(value.to_string());
            }
            "session_file" => self.session_file = Some(PathBuf::from(value)),
            "enforce_admin_routes" => {
                let flag = value.parse::<bool>().map_err(|_| {
                    CliError::InvalidArgument(format!("expected true or false, got {}", value))
                })?;
                self.enforce_admin_routes = Some(flag);
            }
            "timeout_secs" => {
                let secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| {
                        CliError::InvalidArgument(format!(
                            "expected a positive number of seconds, got {}",
                            value
                        ))
                    })?;
                self.timeout_secs = Some(secs);
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, CliError> {
        let value = match key {
            "api_url" => self.api_url.clone(),
            "subscription_api_url" => self.subscription_api_url.clone(),
            "default_format" => self.default_format.clone(),
            "session_file" => self.session_file.as_ref().map(|p| p.display().to_string()),
            "enforce_admin_routes" => self.enforce_admin_routes.map(|b| b.to_string()),
            "timeout_secs" => self.timeout_secs.map(|s| s.to_string()),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Every key with its value, `(not set)` for absent ones
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.into_iter()
            .map(|key| {
                let value = self
                    .get(key)
                    .ok()
                    .flatten()
                    .unwrap_or_else(|| "(not set)".into());
                (key, value)
            })
            .collect()
    }
}

fn unknown_key(key: &str) -> CliError {
    CliError::InvalidArgument(format!(
        "unknown config key: {} (expected one of {})",
        key,
        KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_set_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.staging.toml");

        let mut config = Config::default();
        config.set("api_url", "https://staging.rcs.test/api").unwrap();
        config.set("enforce_admin_routes", "false").unwrap();
        config.set("timeout_secs", "10").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_url.as_deref(), Some("https://staging.rcs.test/api"));
        assert_eq!(loaded.enforce_admin_routes, Some(false));
        assert_eq!(loaded.get("enforce_admin_routes").unwrap().as_deref(), Some("false"));
        assert_eq!(loaded.timeout_secs, Some(10));
    }

    #[test]
    fn test_rejects_unknown_key_and_bad_values() {
        let mut config = Config::default();
        assert!(config.set("api_key", "x").is_err());
        assert!(config.set("enforce_admin_routes", "maybe").is_err());
        assert!(config.set("default_format", "xml").is_err());
        assert!(config.set("timeout_secs", "0").is_err());
        assert!(config.set("timeout_secs", "soon").is_err());
        assert!(config.get("tenant").is_err());
    }

    #[test]
    fn test_entries_cover_every_key() {
        let entries = Config::default().entries();
        assert_eq!(entries.len(), KEYS.len());
        assert!(entries.iter().all(|(_, v)| v == "(not set)"));
    }
}
