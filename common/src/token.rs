//! Secure auth token handling with redacted Debug output.
//!
//! The backend issues an opaque string credential at login and
//! registration time. The client never inspects its structure; it only
//! stores it, attaches it to requests, and discards it on logout.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// A backend-issued auth token that never exposes its value in logs or
/// debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct RedactedToken {
    inner: String,
}

impl RedactedToken {
    /// Wrap a token string.
    pub fn new(token: String) -> Self {
        Self { inner: token }
    }

    /// The raw value for the `Authorization` header.
    ///
    /// # Security Note
    /// Only call this when actually attaching the token to an outbound
    /// request or persisting it to the token store.
    #[inline]
    pub fn header_value(&self) -> &str {
        &self.inner
    }

    /// Token length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the token is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<&str> for RedactedToken {
    fn from(token: &str) -> Self {
        Self::new(token.to_string())
    }
}

impl fmt::Debug for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedToken([REDACTED])")
    }
}

impl fmt::Display for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED TOKEN]")
    }
}

impl Drop for RedactedToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization into config files or wire payloads.
impl serde::Serialize for RedactedToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from(
                "RedactedToken cannot be serialized - use header_value() explicitly",
            ),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
