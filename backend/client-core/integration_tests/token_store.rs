use client_core::token_store::{DATA_DIR_ENV, PathSource, TokenStore, detect_data_paths};

use common::RedactedToken;

use serial_test::serial;

/// **VALUE**: Verifies the durable slot round-trips through a fresh store
/// handle, the property that makes sessions survive a process restart.
#[test]
fn given_stored_token_when_reopening_store_then_token_survives() {
    let dir = tempfile::tempdir().expect("tempdir");

    TokenStore::new(dir.path())
        .set(&RedactedToken::from("abc123"))
        .expect("set");

    // A brand-new handle over the same directory sees the token
    let reopened = TokenStore::new(dir.path());
    let token = reopened.get().expect("get").expect("present");
    assert_eq!(token.header_value(), "abc123");
}

/// **VALUE**: Verifies set() replaces rather than appends, keeping exactly
/// one token in the slot.
#[test]
fn given_existing_token_when_setting_again_then_replaced() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TokenStore::new(dir.path());

    store.set(&RedactedToken::from("first")).expect("set");
    store.set(&RedactedToken::from("second")).expect("set");

    let token = store.get().expect("get").expect("present");
    assert_eq!(token.header_value(), "second");
}

/// **VALUE**: Verifies clear() removes the token and is idempotent; clearing
/// an absent slot must not error (logout while anonymous).
#[test]
fn given_cleared_store_when_reading_then_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TokenStore::new(dir.path());

    store.set(&RedactedToken::from("abc123")).expect("set");
    store.clear().expect("clear");
    assert!(store.get().expect("get").is_none());

    // Idempotent
    store.clear().expect("second clear");
}

/// **VALUE**: Verifies a missing or empty backing file both read as absent,
/// so a half-written or manually truncated file never yields an empty-string
/// "token".
#[test]
fn given_empty_backing_file_when_reading_then_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TokenStore::new(dir.path());

    assert!(store.get().expect("missing file").is_none());

    std::fs::write(store.path(), b"  \n").expect("write");
    assert!(store.get().expect("empty file").is_none());
}

/// **VALUE**: Verifies the environment override wins path detection, the
/// mechanism tests and deployments use to relocate the data directory.
#[test]
#[serial]
fn given_data_dir_env_when_detecting_paths_then_override_used() {
    let dir = tempfile::tempdir().expect("tempdir");

    unsafe { std::env::set_var(DATA_DIR_ENV, dir.path()) };
    let paths = detect_data_paths().expect("paths");
    unsafe { std::env::remove_var(DATA_DIR_ENV) };

    assert_eq!(paths.source, PathSource::EnvVar);
    assert_eq!(paths.data_dir, dir.path());
    assert_eq!(paths.token_file, dir.path().join("token"));
}

/// **VALUE**: Verifies detection succeeds without the override on platforms
/// the CI runs on, and points the token file inside the detected directory.
#[test]
#[serial]
fn given_no_override_when_detecting_paths_then_platform_path_used() {
    unsafe { std::env::remove_var(DATA_DIR_ENV) };

    let paths = detect_data_paths().expect("paths");
    assert_ne!(paths.source, PathSource::EnvVar);
    assert!(paths.token_file.starts_with(&paths.data_dir));
}
