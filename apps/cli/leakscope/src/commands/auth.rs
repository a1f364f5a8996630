//! Registration, login, and logout flows.

use crate::error::LeakscopeError;

use client_core::api::{Credentials, RegisterForm};
use client_core::route::{self, RouteDecision};
use client_core::session::{Session, SessionState};
use client_core::validation::validate_register;

use log::{info, warn};

/// Register a new account.
///
/// Validation runs first; a mismatched or incomplete form never
/// reaches the backend.
pub async fn register(
    state: &SessionState,
    base_url: &str,
    form: RegisterForm,
) -> Result<(), LeakscopeError> {
    if let RouteDecision::Redirected(target) =
        route::evaluate(route::REGISTER_ROUTE, &state.current().await)
    {
        println!("Already logged in (see {target})");
        return Ok(());
    }

    validate_register(&form)?;

    let client = state.client(base_url).await?;
    let message = client.register(&form).await?;

    println!("{message}");
    info!("Registration accepted, you can now log in");
    Ok(())
}

/// Log in and persist the issued token.
pub async fn login(
    state: &SessionState,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<(), LeakscopeError> {
    if let RouteDecision::Redirected(target) =
        route::evaluate(route::LOGIN_ROUTE, &state.current().await)
    {
        println!("Already logged in (see {target})");
        return Ok(());
    }

    let client = state.client(base_url).await?;
    let token = client
        .login(&Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await?;

    state.login(token).await?;
    println!("Logged in as {username}");
    Ok(())
}

/// Clear the local session. The token is not revoked server-side.
pub async fn logout(state: &SessionState) -> Result<(), LeakscopeError> {
    if !state.is_authenticated().await {
        warn!("Logout requested while not logged in");
    }
    state.logout().await?;
    println!("Logged out");
    Ok(())
}

/// Show the current session.
pub async fn status(state: &SessionState) -> Result<(), LeakscopeError> {
    match state.current().await {
        Session::Authenticated(token) => {
            println!("Logged in (token: {} chars)", token.len());
        }
        Session::Anonymous => println!("Not logged in"),
    }
    Ok(())
}
