//! User profile view.

use crate::error::LeakscopeError;

use client_core::session::SessionState;
use client_core::validation::parse_user_id;

/// Fetch and print a user profile.
///
/// The endpoint is unauthenticated and keyed by a numeric user id,
/// validated before any request is issued.
pub async fn show(
    state: &SessionState,
    base_url: &str,
    raw_user_id: &str,
) -> Result<(), LeakscopeError> {
    let user_id = parse_user_id(raw_user_id)?;

    let client = state.client(base_url).await?;
    let profile = client.profile(user_id).await?;

    println!("Username: {}", profile.username);
    println!("Email:    {}", profile.email);
    println!("Role:     {}", profile.role);
    Ok(())
}
