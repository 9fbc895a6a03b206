//! Session/Auth gate
//!
//! Decides, before anything is rendered, whether a page may be shown to the
//! current session or where the caller should be sent instead.

use std::fmt;
use std::sync::Arc;

use crate::session::{Session, SessionResolver};

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ADMIN_DASHBOARD_PATH: &str = "/admin/dashboard";

/// Dashboard pages known to the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Root,
    Login,
    Dashboard,
    Campaigns,
    Customers,
    Subscriptions,
    AdminDashboard,
    AdminCampaigns,
    AdminCustomers,
}

impl Page {
    pub const ALL: [Page; 9] = [
        Page::Root,
        Page::Login,
        Page::Dashboard,
        Page::Campaigns,
        Page::Customers,
        Page::Subscriptions,
        Page::AdminDashboard,
        Page::AdminCampaigns,
        Page::AdminCustomers,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Root => "/",
            Page::Login => LOGIN_PATH,
            Page::Dashboard => DASHBOARD_PATH,
            Page::Campaigns => "/campaigns",
            Page::Customers => "/customers",
            Page::Subscriptions => "/subscriptions",
            Page::AdminDashboard => ADMIN_DASHBOARD_PATH,
            Page::AdminCampaigns => "/admin/campaigns",
            Page::AdminCustomers => "/admin/customers",
        }
    }

    pub fn from_path(path: &str) -> Option<Page> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Page::ALL.into_iter().find(|page| page.path() == normalized)
    }

    /// Reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Page::Login)
    }

    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Page::AdminDashboard | Page::AdminCampaigns | Page::AdminCustomers
        )
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Why the gate sent the caller elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// No usable session
    Unauthenticated,
    /// Admins land on the admin dashboard from the root page
    AdminHome,
    /// Admin page requested by a non-admin
    Forbidden,
}

/// Outcome of a gate check
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Page needs no session
    Public,
    /// Page may render for this session
    Authorized(Session),
    /// Page must not render; go to `to`
    Redirect {
        to: &'static str,
        reason: RedirectReason,
    },
}

impl GateDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, GateDecision::Authorized(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            GateDecision::Authorized(session) => Some(session),
            _ => None,
        }
    }

    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            GateDecision::Redirect { to, .. } => Some(to),
            _ => None,
        }
    }
}

/// Page guard backed by a [`SessionResolver`]
#[derive(Clone)]
pub struct AuthGate {
    resolver: Arc<dyn SessionResolver>,
    enforce_admin_routes: bool,
}

impl AuthGate {
    /// Gate with admin-route enforcement on
    pub fn new(resolver: Arc<dyn SessionResolver>) -> Self {
        Self {
            resolver,
            enforce_admin_routes: true,
        }
    }

    /// Turn role checks on admin pages on or off
    pub fn enforce_admin_routes(mut self, enforce: bool) -> Self {
        self.enforce_admin_routes = enforce;
        self
    }

    pub async fn check(&self, page: Page) -> GateDecision {
        if page.is_public() {
            return GateDecision::Public;
        }

        let session = match self.resolver.resolve().await {
            Ok(Some(session)) => session,
            Ok(None) => {
                tracing::debug!(%page, "no session; redirecting to login");
                return unauthenticated();
            }
            Err(e) => {
                tracing::warn!(%page, error = %e, "session could not be resolved; redirecting to login");
                return unauthenticated();
            }
        };

        if page == Page::Root && session.is_admin() {
            return GateDecision::Redirect {
                to: ADMIN_DASHBOARD_PATH,
                reason: RedirectReason::AdminHome,
            };
        }

        if self.enforce_admin_routes && page.requires_admin() && !session.is_admin() {
            tracing::warn!(%page, user = %session.user_id, role = %session.role, "non-admin requested an admin page");
            return GateDecision::Redirect {
                to: DASHBOARD_PATH,
                reason: RedirectReason::Forbidden,
            };
        }

        GateDecision::Authorized(session)
    }
}

fn unauthenticated() -> GateDecision {
    GateDecision::Redirect {
        to: LOGIN_PATH,
        reason: RedirectReason::Unauthenticated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Role, StaticSession};

    fn gate_for(session: Option<Session>) -> AuthGate {
        let resolver = match session {
            Some(session) => StaticSession::signed_in(session),
            None => StaticSession::anonymous(),
        };
        AuthGate::new(Arc::new(resolver))
    }

    fn admin() -> Session {
        Session::new(1u64, Role::Admin, "tok_admin")
    }

    fn user() -> Session {
        Session::new(2u64, Role::User, "tok_user")
    }

    #[tokio::test]
    async fn test_every_protected_page_needs_a_session() {
        let gate = gate_for(None);
        for page in Page::ALL.into_iter().filter(|p| !p.is_public()) {
            assert_eq!(
                gate.check(page).await,
                GateDecision::Redirect {
                    to: "/login",
                    reason: RedirectReason::Unauthenticated
                },
                "{}",
                page
            );
        }
    }

    #[tokio::test]
    async fn test_login_is_public() {
        assert_eq!(gate_for(None).check(Page::Login).await, GateDecision::Public);
    }

    #[tokio::test]
    async fn test_admin_root_goes_to_admin_dashboard() {
        let decision = gate_for(Some(admin())).check(Page::Root).await;
        assert_eq!(
            decision,
            GateDecision::Redirect {
                to: "/admin/dashboard",
                reason: RedirectReason::AdminHome
            }
        );
    }

    #[tokio::test]
    async fn test_user_root_is_authorized() {
        let decision = gate_for(Some(user())).check(Page::Root).await;
        assert_eq!(decision.session().map(|s| s.role), Some(Role::User));
    }

    #[tokio::test]
    async fn test_admin_pages_forbidden_for_users() {
        let gate = gate_for(Some(user()));
        assert_eq!(
            gate.check(Page::AdminCampaigns).await.redirect_target(),
            Some("/dashboard")
        );

        let lenient = gate.clone().enforce_admin_routes(false);
        assert!(lenient.check(Page::AdminCampaigns).await.is_authorized());
    }

    #[tokio::test]
    async fn test_invalid_session_is_unauthenticated() {
        let broken = Session::new(3u64, Role::User, "");
        let decision = gate_for(Some(broken)).check(Page::Dashboard).await;
        assert_eq!(decision.redirect_target(), Some("/login"));
    }

    #[test]
    fn test_page_from_path() {
        assert_eq!(Page::from_path("/"), Some(Page::Root));
        assert_eq!(Page::from_path(""), Some(Page::Root));
        assert_eq!(Page::from_path("/admin/dashboard/"), Some(Page::AdminDashboard));
        assert_eq!(Page::from_path("/settings"), None);
    }
}
