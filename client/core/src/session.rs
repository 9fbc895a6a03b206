//! Sessions and bearer-token sources
//!
//! A [`Session`] is produced by login (outside this crate), read on every
//! gated command, and discarded at logout. [`SessionResolver`] finds the
//! current session; [`TokenProvider`] is the single interface the HTTP core
//! uses to obtain a bearer token, whatever the token's origin.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Id;

/// Session file name under the state directory
pub const SESSION_FILE: &str = "session.json";

/// Legacy bare-token file name under the state directory
pub const TOKEN_FILE: &str = "token";

/// Directory under `$HOME` holding session state
pub const STATE_DIR: &str = ".rcs";

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed session: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid session: {0}")]
    Invalid(String),

    #[error("cannot locate home directory")]
    NoHomeDir,
}

/// User role
///
/// Only the exact string `admin` grants the admin role; every other value
/// is a regular user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn parse(value: &str) -> Role {
        if value == "admin" {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Id,
    pub role: Role,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(user_id: impl Into<Id>, role: Role, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            token: token.into(),
            name: None,
            email: None,
            expires_at: None,
        }
    }

    pub fn expiring_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }

    /// Structural checks applied whenever a session crosses into the client
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.token.trim().is_empty() {
            return Err(SessionError::Invalid("token is empty".into()));
        }
        if self.token.chars().any(|c| c.is_control() || c == ' ') {
            return Err(SessionError::Invalid("token contains whitespace or control characters".into()));
        }
        if self.user_id.is_blank() {
            return Err(SessionError::Invalid("user id is empty".into()));
        }
        Ok(())
    }
}

/// Finds the current session, if any
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// `Ok(None)` means nobody is signed in
    async fn resolve(&self) -> Result<Option<Session>, SessionError>;
}

/// Supplies the bearer token attached to outgoing requests
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn bearer_token(&self) -> Result<Option<String>, SessionError>;
}

/// Session persisted as JSON on disk
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.rcs/session.json`
    pub fn at_default_location() -> Result<Self, SessionError> {
        Ok(Self::at(state_dir()?.join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a session, replacing any existing one
    pub async fn save(&self, session: &Session) -> Result<(), SessionError> {
        session.validate()?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, content).await?;
        restrict_to_owner(&self.path).await?;
        tracing::debug!(path = %self.path.display(), user = %session.user_id, "session saved");
        Ok(())
    }

    /// Remove the stored session; a missing file is not an error
    pub async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Owner read/write only; the file holds a bearer token
#[cfg(unix)]
async fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[async_trait]
impl SessionResolver for FileSessionStore {
    async fn resolve(&self) -> Result<Option<Session>, SessionError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session: Session = serde_json::from_slice(&content)?;
        session.validate()?;

        if session.is_expired_at(Utc::now()) {
            tracing::debug!(user = %session.user_id, "stored session has expired");
            return Ok(None);
        }

        Ok(Some(session))
    }
}

#[async_trait]
impl TokenProvider for FileSessionStore {
    async fn bearer_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.resolve().await?.map(|s| s.token))
    }
}

/// Fixed in-memory session
#[derive(Debug, Clone, Default)]
pub struct StaticSession(Option<Session>);

impl StaticSession {
    pub fn signed_in(session: Session) -> Self {
        Self(Some(session))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait]
impl SessionResolver for StaticSession {
    async fn resolve(&self) -> Result<Option<Session>, SessionError> {
        match &self.0 {
            Some(session) => {
                session.validate()?;
                if session.is_expired_at(Utc::now()) {
                    return Ok(None);
                }
                Ok(Some(session.clone()))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticSession {
    async fn bearer_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.resolve().await?.map(|s| s.token))
    }
}

/// Bare token kept in a file, without any session metadata
///
/// Older billing screens stored only the token. It is exposed through the
/// same [`TokenProvider`] interface so every module shares one auth path.
#[derive(Debug, Clone)]
pub struct StoredToken {
    path: PathBuf,
}

impl StoredToken {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.rcs/token`
    pub fn at_default_location() -> Result<Self, SessionError> {
        Ok(Self::at(state_dir()?.join(TOKEN_FILE)))
    }
}

#[async_trait]
impl TokenProvider for StoredToken {
    async fn bearer_token(&self) -> Result<Option<String>, SessionError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn state_dir() -> Result<PathBuf, SessionError> {
    let home = dirs::home_dir().ok_or(SessionError::NoHomeDir)?;
    Ok(home.join(STATE_DIR))
}
