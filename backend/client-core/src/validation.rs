//! Client-side form validation.
//!
//! Checked before any network call so obviously invalid input fails
//! fast without a round trip; when a check fires, no request is
//! issued at all.

use crate::api::types::RegisterForm;
use crate::error::validation::ValidationError;

use std::path::Path;

/// Validate a registration form.
///
/// All four fields are required and the two passwords must match.
pub fn validate_register(form: &RegisterForm) -> Result<(), ValidationError> {
    let required = [
        &form.username,
        &form.password,
        &form.confirm_password,
        &form.mobile_number,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ValidationError::AllFieldsRequired);
    }

    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

/// Validate that an upload source exists and is a non-empty file.
pub fn validate_upload_source(path: &Path) -> Result<(), ValidationError> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() && metadata.len() > 0 => Ok(()),
        _ => Err(ValidationError::MissingFile),
    }
}

/// Parse a profile user id. The backend keys profiles by numeric id;
/// anything non-numeric is rejected before a request is issued.
pub fn parse_user_id(raw: &str) -> Result<u64, ValidationError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidUserId)
}
