use crate::route::{
    DASHBOARD_ROUTE, LOGIN_ROUTE, PROFILE_ROUTE, REGISTER_ROUTE, ROOT_ROUTE, RouteDecision,
    evaluate,
};
use crate::session::Session;

use common::RedactedToken;

fn authenticated() -> Session {
    Session::Authenticated(RedactedToken::from("abc123"))
}

/// **VALUE**: Verifies the guard's one transition rule for protected views.
///
/// **WHY THIS MATTERS**: Every protected view relies on this decision; if an
/// anonymous session were allowed through, unauthenticated users would reach
/// the dashboard and every request from it would fail with auth errors.
///
/// **BUG THIS CATCHES**: Would catch the protected-route list or the session
/// check being dropped or inverted.
#[test]
fn given_anonymous_session_when_navigating_to_dashboard_then_redirected_to_login() {
    // GIVEN: An anonymous session
    let session = Session::Anonymous;

    // WHEN: Navigating to a protected view
    let decision = evaluate(DASHBOARD_ROUTE, &session);

    // THEN: Redirected to the login view
    assert_eq!(decision, RouteDecision::Redirected(LOGIN_ROUTE));
}

/// **VALUE**: Verifies an authenticated session passes the guard.
///
/// **WHY THIS MATTERS**: A false redirect here would lock logged-in users out
/// of the entire application.
///
/// **BUG THIS CATCHES**: Would catch an accidental unconditional redirect.
#[test]
fn given_authenticated_session_when_navigating_to_dashboard_then_allowed() {
    // GIVEN: An authenticated session
    let session = authenticated();

    // WHEN: Navigating to a protected view
    let decision = evaluate(DASHBOARD_ROUTE, &session);

    // THEN: Navigation proceeds
    assert_eq!(decision, RouteDecision::Allowed);
}

/// **VALUE**: Verifies logged-in users are bounced off the auth entry views.
///
/// **WHY THIS MATTERS**: The original client redirects a logged-in user away
/// from the login and register forms; showing them again invites a second,
/// confusing login.
///
/// **BUG THIS CATCHES**: Would catch the auth-entry list losing a route.
#[test]
fn given_authenticated_session_when_navigating_to_auth_entry_then_redirected_to_dashboard() {
    let session = authenticated();

    for route in [LOGIN_ROUTE, REGISTER_ROUTE] {
        assert_eq!(
            evaluate(route, &session),
            RouteDecision::Redirected(DASHBOARD_ROUTE),
            "{route} should redirect an authenticated session"
        );
    }
}

/// **VALUE**: Verifies anonymous users can reach login, register, and the
/// (unauthenticated) profile view.
///
/// **WHY THIS MATTERS**: These are the only entry points into the app; if the
/// guard redirected them, an anonymous user could never log in.
#[test]
fn given_anonymous_session_when_navigating_to_public_views_then_allowed() {
    let session = Session::Anonymous;

    for route in [LOGIN_ROUTE, REGISTER_ROUTE, PROFILE_ROUTE] {
        assert_eq!(
            evaluate(route, &session),
            RouteDecision::Allowed,
            "{route} should be reachable anonymously"
        );
    }
}

/// **VALUE**: Verifies the root path always forwards to the dashboard,
/// regardless of session, so the dashboard's own guard makes the final call.
#[test]
fn given_any_session_when_navigating_to_root_then_redirected_to_dashboard() {
    for session in [Session::Anonymous, authenticated()] {
        assert_eq!(
            evaluate(ROOT_ROUTE, &session),
            RouteDecision::Redirected(DASHBOARD_ROUTE)
        );
    }
}

/// **VALUE**: Verifies the guard re-evaluates from the session it is handed,
/// never from a cached decision.
///
/// **WHY THIS MATTERS**: Sessions change between navigations (logout); a
/// cached `Allowed` would leave a logged-out user on a protected view.
#[test]
fn given_session_change_when_reevaluating_then_decision_follows_session() {
    let decision_before = evaluate(DASHBOARD_ROUTE, &authenticated());
    let decision_after = evaluate(DASHBOARD_ROUTE, &Session::Anonymous);

    assert_eq!(decision_before, RouteDecision::Allowed);
    assert_eq!(decision_after, RouteDecision::Redirected(LOGIN_ROUTE));
}
