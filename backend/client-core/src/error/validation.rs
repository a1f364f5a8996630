//! Client-side validation failures.
//!
//! These are checked before any network call is issued and surfaced
//! inline; no request reaches the backend when one fires. The display
//! strings are the user-facing messages.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    AllFieldsRequired,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please select a file to upload")]
    MissingFile,

    #[error("Invalid user ID")]
    InvalidUserId,
}
