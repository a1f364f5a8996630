//! Error types for the authenticated request pipeline.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - Auth rejections (401/403) are a distinct variant so callers can
//!   tell an invalid token from any other backend failure
//! - All errors include ErrorLocation for debugging
//! - `#[track_caller]` for automatic location capture
//!
//! The pipeline never retries and never mutates session state on
//! failure; an `Auth` error is surfaced to the caller as-is.

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use serde::Deserialize;
use thiserror::Error as ThisError;

/// Body shape the backend uses for failures: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Transport failure: no connectivity, timeout, refused connection.
    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    /// The backend rejected the request's authorization (401/403).
    #[error("Auth Error: HTTP {status_code} - {message} {location}")]
    Auth {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    /// Any other non-2xx response.
    #[error("Server Error: HTTP {status_code} - {message} {location}")]
    Server {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    /// Response body did not match the expected payload shape.
    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl From<url::ParseError> for ApiError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiError::Decode {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    /// Categorize transport errors BEFORE stringifying so callers can
    /// distinguish timeouts and refused connections from other failures.
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        let is_timeout = error.is_timeout();
        let is_connection = error.is_connect();

        if error.is_decode() {
            return ApiError::Decode {
                message: error.to_string(),
                location: ErrorLocation::caller(),
            };
        }

        ApiError::Network {
            message: error.to_string(),
            is_timeout,
            is_connection,
            location: ErrorLocation::caller(),
        }
    }
}

impl ApiError {
    /// Build the error for a non-2xx response.
    ///
    /// Uses the human-readable message from a JSON `{"error": ...}` body
    /// when present, else a generic fallback derived from the status.
    #[track_caller]
    pub fn from_response(status_code: u16, body: &str) -> Self {
        let status = HttpStatusCode(status_code);
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("HTTP {status_code}"));

        if status.is_auth_error() {
            ApiError::Auth {
                status_code: status,
                message,
                location: ErrorLocation::caller(),
            }
        } else {
            ApiError::Server {
                status_code: status,
                message,
                location: ErrorLocation::caller(),
            }
        }
    }

    /// Whether this is an authorization rejection (invalid/expired token).
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }

    /// HTTP status code if the backend produced a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Auth { status_code, .. } => Some(status_code.0),
            ApiError::Server { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    /// Error category for logging.
    pub fn error_category(&self) -> &'static str {
        match self {
            ApiError::Network { is_timeout: true, .. } => "timeout",
            ApiError::Network { is_connection: true, .. } => "connection",
            ApiError::Network { .. } => "network",
            ApiError::Auth { .. } => "auth",
            ApiError::Server { status_code, .. } if status_code.is_client_error() => {
                "client_error"
            }
            ApiError::Server { .. } => "server_error",
            ApiError::Decode { .. } => "decode",
            ApiError::UrlParse { .. } => "url_parse",
        }
    }
}
