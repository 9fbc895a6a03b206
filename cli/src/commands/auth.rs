//! Session commands

use chrono::{DateTime, Duration, Utc};
use rcs_client::{Page, Role, Session, SessionResolver};
use serde::Serialize;

use super::{authorize, Context};
use crate::error::CliError;
use crate::views::StatCard;
use crate::AuthCommands;

/// Session as shown to the user; the token is never printed
#[derive(Debug, Serialize)]
struct Profile {
    user_id: String,
    role: Role,
    name: Option<String>,
    email: Option<String>,
    expires_at: Option<String>,
}

impl From<&Session> for Profile {
    fn from(s: &Session) -> Self {
        Self {
            user_id: s.user_id.to_string(),
            role: s.role,
            name: s.name.clone(),
            email: s.email.clone(),
            expires_at: s.expires_at.map(|t| t.to_rfc3339()),
        }
    }
}

pub async fn handle(action: AuthCommands, ctx: &Context) -> Result<String, CliError> {
    match action {
        AuthCommands::Login {
            user_id,
            token,
            role,
            name,
            email,
            expires_in,
        } => {
            let expires_at = match expires_in {
                Some(hours) => Some(session_expiry(hours)?),
                None => None,
            };

            let mut session = Session::new(user_id, Role::parse(&role), token.trim());
            session.name = name;
            session.email = email;
            if let Some(at) = expires_at {
                session = session.expiring_at(at);
            }

            ctx.store.save(&session).await?;
            Ok(format!(
                "Signed in as {} ({})",
                session.user_id, session.role
            ))
        }
        AuthCommands::Logout => {
            let had_session = ctx.store.resolve().await.ok().flatten().is_some();
            ctx.store.clear().await?;
            Ok(if had_session {
                "Signed out".to_string()
            } else {
                "No active session".to_string()
            })
        }
        AuthCommands::Whoami => {
            let session = authorize(ctx, Page::Dashboard).await?;
            let profile = Profile::from(&session);
            let rows = [
                StatCard {
                    label: "User".into(),
                    value: profile.user_id.clone(),
                },
                StatCard {
                    label: "Role".into(),
                    value: profile.role.to_string(),
                },
                StatCard {
                    label: "Name".into(),
                    value: profile.name.clone().unwrap_or_else(|| "-".into()),
                },
                StatCard {
                    label: "Expires".into(),
                    value: profile.expires_at.clone().unwrap_or_else(|| "never".into()),
                },
            ];
            ctx.format.render(&profile, &rows)
        }
    }
}

/// Expiry `hours` from now; out-of-range lifetimes are rejected
fn session_expiry(hours: i64) -> Result<DateTime<Utc>, CliError> {
    (hours > 0)
        .then(|| Duration::try_hours(hours))
        .flatten()
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| {
            CliError::InvalidArgument(format!(
                "--expires-in must be a positive number of hours within range, got {}",
                hours
            ))
        })
}

#[cfg(test)]
mod tests {
    use rcs_client::{Id, MockTransport};

    use super::*;
    use crate::commands::testing::stored_context;

    fn login(role: &str, token: &str) -> AuthCommands {
        AuthCommands::Login {
            user_id: Id::Num(42),
            token: token.to_string(),
            role: role.to_string(),
            name: Some("Meera".into()),
            email: None,
            expires_in: Some(8),
        }
    }

    #[tokio::test]
    async fn test_login_whoami_logout() {
        let mock = MockTransport::new();
        let (ctx, _dir) = stored_context(&mock);

        let out = handle(login("admin", "tok_42"), &ctx).await.unwrap();
        assert_eq!(out, "Signed in as 42 (admin)");

        let out = handle(AuthCommands::Whoami, &ctx).await.unwrap();
        let profile: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(profile["role"], "admin");
        assert_eq!(profile["name"], "Meera");
        assert!(!out.contains("tok_42"));

        assert_eq!(handle(AuthCommands::Logout, &ctx).await.unwrap(), "Signed out");
        assert!(matches!(
            handle(AuthCommands::Whoami, &ctx).await,
            Err(CliError::Redirected { to: "/login", .. })
        ));
        assert_eq!(handle(AuthCommands::Logout, &ctx).await.unwrap(), "No active session");
    }

    #[tokio::test]
    async fn test_stored_session_authenticates_requests() {
        let mock = MockTransport::new();
        let (ctx, _dir) = stored_context(&mock);
        handle(login("user", "tok_stored"), &ctx).await.unwrap();

        let _: serde_json::Value = ctx.client.get("/campaigns", None, None).await.unwrap();

        assert_eq!(mock.last_request().unwrap().authorization(), Some("Bearer tok_stored"));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_input() {
        let mock = MockTransport::new();
        let (ctx, _dir) = stored_context(&mock);

        assert!(handle(login("user", "   "), &ctx).await.is_err());
        let mut bad_expiry = login("user", "tok");
        if let AuthCommands::Login { expires_in, .. } = &mut bad_expiry {
            *expires_in = Some(0);
        }
        assert!(matches!(
            handle(bad_expiry, &ctx).await,
            Err(CliError::InvalidArgument(_))
        ));

        let mut huge_expiry = login("user", "tok");
        if let AuthCommands::Login { expires_in, .. } = &mut huge_expiry {
            *expires_in = Some(i64::MAX);
        }
        assert!(matches!(
            handle(huge_expiry, &ctx).await,
            Err(CliError::InvalidArgument(_))
        ));
        assert!(ctx.store.resolve().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_role_must_be_exact() {
        let mock = MockTransport::new();
        let (ctx, _dir) = stored_context(&mock);

        let out = handle(login("Admin", "tok"), &ctx).await.unwrap();
        assert_eq!(out, "Signed in as 42 (user)");
    }
}
