use crate::error::token_store::TokenStoreError;

use common::ErrorLocation;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// `login` is only reachable with a token returned by a successful
    /// backend auth call; an empty string is never a valid credential.
    #[error("Refusing to store an empty token {location}")]
    EmptyToken { location: ErrorLocation },

    #[error(transparent)]
    Store(#[from] TokenStoreError),
}

impl SessionError {
    #[track_caller]
    pub fn empty_token() -> Self {
        SessionError::EmptyToken {
            location: ErrorLocation::caller(),
        }
    }
}
