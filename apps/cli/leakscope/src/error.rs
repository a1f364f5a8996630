use common::ErrorLocation;

use client_core::error::{
    ApiError, ConfigError, CoreError, SessionError, TokenStoreError, ValidationError,
};

use thiserror::Error;

/// Errors surfaced by the leakscope CLI.
///
/// Core errors pass through transparently so the user sees the
/// underlying message; `Usage` covers malformed invocations before any
/// work happens.
#[derive(Debug, Error)]
pub enum LeakscopeError {
    #[error("Usage Error: {message} {location}")]
    Usage {
        message: String,
        location: ErrorLocation,
    },

    #[error("Leakscope Error: {message} {location}")]
    App {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl LeakscopeError {
    #[track_caller]
    pub fn usage(message: impl Into<String>) -> Self {
        LeakscopeError::Usage {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn app(message: impl Into<String>) -> Self {
        LeakscopeError::App {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<ApiError> for LeakscopeError {
    fn from(error: ApiError) -> Self {
        LeakscopeError::Core(error.into())
    }
}

impl From<SessionError> for LeakscopeError {
    fn from(error: SessionError) -> Self {
        LeakscopeError::Core(error.into())
    }
}

impl From<TokenStoreError> for LeakscopeError {
    fn from(error: TokenStoreError) -> Self {
        LeakscopeError::Core(error.into())
    }
}

impl From<ConfigError> for LeakscopeError {
    fn from(error: ConfigError) -> Self {
        LeakscopeError::Core(error.into())
    }
}

impl From<ValidationError> for LeakscopeError {
    fn from(error: ValidationError) -> Self {
        LeakscopeError::Core(error.into())
    }
}
