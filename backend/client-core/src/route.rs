//! Route guard: decides whether a navigation proceeds or redirects.
//!
//! Two outcomes, one rule: a protected view with an anonymous session
//! redirects to the login view, anything else is allowed. Evaluated
//! fresh on every navigation attempt; decisions are never cached
//! because the session can change between navigations.

use crate::session::Session;

pub const LOGIN_ROUTE: &str = "/login";
pub const REGISTER_ROUTE: &str = "/register";
pub const DASHBOARD_ROUTE: &str = "/dashboard";
pub const UPLOAD_ROUTE: &str = "/upload";
pub const PROFILE_ROUTE: &str = "/profile";
pub const ROOT_ROUTE: &str = "/";

/// Views that require an authenticated session.
const PROTECTED_ROUTES: &[&str] = &[DASHBOARD_ROUTE, UPLOAD_ROUTE];

/// Views that only make sense while anonymous; a logged-in user is
/// sent back to the dashboard.
const AUTH_ENTRY_ROUTES: &[&str] = &[LOGIN_ROUTE, REGISTER_ROUTE];

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allowed,
    Redirected(&'static str),
}

/// Decide whether navigating to `path` proceeds under `session`.
///
/// The root path always redirects to the dashboard; the caller is
/// expected to evaluate the redirect target again.
pub fn evaluate(path: &str, session: &Session) -> RouteDecision {
    if path == ROOT_ROUTE {
        return RouteDecision::Redirected(DASHBOARD_ROUTE);
    }

    if PROTECTED_ROUTES.contains(&path) && !session.is_authenticated() {
        return RouteDecision::Redirected(LOGIN_ROUTE);
    }

    if AUTH_ENTRY_ROUTES.contains(&path) && session.is_authenticated() {
        return RouteDecision::Redirected(DASHBOARD_ROUTE);
    }

    RouteDecision::Allowed
}
