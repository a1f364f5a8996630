use client_core::error::session::SessionError;
use client_core::route::{DASHBOARD_ROUTE, LOGIN_ROUTE, RouteDecision, evaluate};
use client_core::session::{Session, SessionState};
use client_core::token_store::TokenStore;

use common::RedactedToken;

use tempfile::TempDir;

fn state() -> (SessionState, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TokenStore::new(dir.path());
    (SessionState::new(store), dir)
}

/// **VALUE**: Verifies login persists the exact token it was given
/// (property: login(t) then get() yields t).
///
/// **WHY THIS MATTERS**: The store is the durable half of the session
/// invariant; a token that round-trips differently breaks every
/// authenticated request after a restart.
#[tokio::test]
async fn given_login_when_reading_store_then_same_token() {
    let (state, dir) = state();

    state
        .login(RedactedToken::from("abc123"))
        .await
        .expect("login");

    let stored = TokenStore::new(dir.path()).get().expect("get");
    assert_eq!(
        stored.expect("token present").header_value(),
        "abc123"
    );
    assert!(state.is_authenticated().await);
}

/// **VALUE**: Verifies logout clears both halves of the invariant at once:
/// store reads absent, session reads anonymous.
#[tokio::test]
async fn given_logout_when_inspecting_state_then_store_and_session_cleared() {
    let (state, dir) = state();
    state
        .login(RedactedToken::from("abc123"))
        .await
        .expect("login");

    state.logout().await.expect("logout");

    assert_eq!(state.current().await, Session::Anonymous);
    assert!(TokenStore::new(dir.path()).get().expect("get").is_none());
}

/// **VALUE**: Verifies logout from an already-anonymous session is a no-op,
/// not an error.
#[tokio::test]
async fn given_anonymous_session_when_logging_out_then_ok() {
    let (state, _dir) = state();
    state.logout().await.expect("logout");
    assert_eq!(state.current().await, Session::Anonymous);
}

/// **VALUE**: Verifies initialization derives the session from whatever the
/// store holds: a persisted token resumes `Authenticated`, an empty store
/// starts `Anonymous`.
///
/// **WHY THIS MATTERS**: This is the reload behavior; users expect to stay
/// logged in across process restarts.
#[tokio::test]
async fn given_persisted_token_when_initializing_then_authenticated() {
    let dir = tempfile::tempdir().expect("tempdir");
    TokenStore::new(dir.path())
        .set(&RedactedToken::from("abc123"))
        .expect("set");

    let state = SessionState::new(TokenStore::new(dir.path()));
    state.initialize().await.expect("initialize");

    match state.current().await {
        Session::Authenticated(token) => assert_eq!(token.header_value(), "abc123"),
        Session::Anonymous => panic!("expected authenticated session"),
    }
}

#[tokio::test]
async fn given_empty_store_when_initializing_then_anonymous() {
    let (state, _dir) = state();
    state.initialize().await.expect("initialize");
    assert_eq!(state.current().await, Session::Anonymous);
}

/// **VALUE**: Verifies re-initialization is a warned no-op that cannot
/// clobber a session established since startup.
///
/// **BUG THIS CATCHES**: Would catch a second initialize() re-reading the
/// store and resurrecting a token that logout had just cleared from memory
/// but a racing write re-created, or resetting a freshly logged-in session.
#[tokio::test]
async fn given_initialized_state_when_initializing_again_then_session_untouched() {
    let (state, _dir) = state();
    state.initialize().await.expect("initialize");
    state
        .login(RedactedToken::from("abc123"))
        .await
        .expect("login");

    state.initialize().await.expect("second initialize");

    assert!(state.is_authenticated().await, "login must survive re-init");
}

/// **VALUE**: Verifies the empty-token precondition on login: the store is
/// untouched and the session stays anonymous.
#[tokio::test]
async fn given_empty_token_when_logging_in_then_rejected() {
    let (state, dir) = state();

    let err = state.login(RedactedToken::from("")).await.unwrap_err();
    assert!(matches!(err, SessionError::EmptyToken { .. }));

    assert_eq!(state.current().await, Session::Anonymous);
    assert!(TokenStore::new(dir.path()).get().expect("get").is_none());
}

/// **VALUE**: End-to-end of the login transition the route guard reacts to
/// (property: after login, dashboard navigation is allowed; after logout it
/// redirects again).
#[tokio::test]
async fn given_login_then_logout_when_navigating_then_guard_follows_transitions() {
    let (state, _dir) = state();
    state.initialize().await.expect("initialize");

    assert_eq!(
        evaluate(DASHBOARD_ROUTE, &state.current().await),
        RouteDecision::Redirected(LOGIN_ROUTE)
    );

    state
        .login(RedactedToken::from("abc123"))
        .await
        .expect("login");
    assert_eq!(
        evaluate(DASHBOARD_ROUTE, &state.current().await),
        RouteDecision::Allowed
    );

    state.logout().await.expect("logout");
    assert_eq!(
        evaluate(DASHBOARD_ROUTE, &state.current().await),
        RouteDecision::Redirected(LOGIN_ROUTE)
    );
}

/// **VALUE**: Verifies clients built through the session reflect the session
/// at call time, not at some earlier construction (stale-closure regression
/// from the original client).
#[tokio::test]
async fn given_session_transitions_when_building_clients_then_never_stale() {
    let (state, _dir) = state();

    let before = state.client("http://localhost:5000").await.expect("client");
    assert!(!before.is_authenticated());

    state
        .login(RedactedToken::from("abc123"))
        .await
        .expect("login");
    let during = state.client("http://localhost:5000").await.expect("client");
    assert!(during.is_authenticated());

    state.logout().await.expect("logout");
    let after = state.client("http://localhost:5000").await.expect("client");
    assert!(!after.is_authenticated());
}
