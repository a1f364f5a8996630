use crate::api::types::RegisterForm;
use crate::error::validation::ValidationError;
use crate::validation::{parse_user_id, validate_register, validate_upload_source};

fn form() -> RegisterForm {
    RegisterForm {
        username: "alice".to_string(),
        password: "hunter22".to_string(),
        confirm_password: "hunter22".to_string(),
        mobile_number: "5551234567".to_string(),
    }
}

/// **VALUE**: Verifies mismatched passwords are rejected client-side.
///
/// **WHY THIS MATTERS**: This check is the contract that no network call is
/// issued for an obviously broken registration; the user sees "Passwords do
/// not match" inline instead of a round-trip failure.
///
/// **BUG THIS CATCHES**: Would catch the mismatch check being dropped or the
/// user-facing message changing silently.
#[test]
fn given_mismatched_passwords_when_validating_register_then_password_mismatch() {
    // GIVEN: A form whose confirmation differs from the password
    let form = RegisterForm {
        confirm_password: "hunter23".to_string(),
        ..form()
    };

    // WHEN: Validating
    let result = validate_register(&form);

    // THEN: The mismatch error with its exact user-facing message
    let err = result.unwrap_err();
    assert_eq!(err, ValidationError::PasswordMismatch);
    assert_eq!(err.to_string(), "Passwords do not match");
}

/// **VALUE**: Verifies every field is required, including whitespace-only
/// values.
#[test]
fn given_blank_field_when_validating_register_then_all_fields_required() {
    let blank_username = RegisterForm {
        username: "   ".to_string(),
        ..form()
    };
    let blank_mobile = RegisterForm {
        mobile_number: String::new(),
        ..form()
    };

    for form in [blank_username, blank_mobile] {
        assert_eq!(
            validate_register(&form),
            Err(ValidationError::AllFieldsRequired)
        );
    }
}

/// **VALUE**: Verifies a complete, consistent form passes.
#[test]
fn given_complete_form_when_validating_register_then_ok() {
    assert_eq!(validate_register(&form()), Ok(()));
}

/// **VALUE**: Verifies user ids must be numeric before a profile request is
/// issued, matching the original client's isNaN check.
///
/// **BUG THIS CATCHES**: Would catch non-numeric ids leaking into the
/// query string and producing confusing backend errors.
#[test]
fn given_non_numeric_user_id_when_parsing_then_invalid_user_id() {
    for raw in ["", "abc", "12x", "-4", "1.5"] {
        assert_eq!(
            parse_user_id(raw),
            Err(ValidationError::InvalidUserId),
            "{raw:?} should be rejected"
        );
    }
}

#[test]
fn given_numeric_user_id_when_parsing_then_value_returned() {
    assert_eq!(parse_user_id("42"), Ok(42));
    assert_eq!(parse_user_id("  7 "), Ok(7));
}

/// **VALUE**: Verifies upload validation rejects missing and empty files
/// before any multipart request is built.
#[test]
fn given_missing_file_when_validating_upload_then_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");

    // Missing path
    let absent = dir.path().join("nope.csv");
    assert_eq!(
        validate_upload_source(&absent),
        Err(ValidationError::MissingFile)
    );

    // Empty file
    let empty = dir.path().join("empty.csv");
    std::fs::write(&empty, b"").expect("write");
    assert_eq!(
        validate_upload_source(&empty),
        Err(ValidationError::MissingFile)
    );

    // Non-empty file passes
    let real = dir.path().join("data.csv");
    std::fs::write(&real, b"a,b\n1,2\n").expect("write");
    assert_eq!(validate_upload_source(&real), Ok(()));
}
