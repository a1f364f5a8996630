use client_core::DEFAULT_BACKEND_BASE_URL;
use client_core::config::{AppConfig, BACKEND_URL_ENV, try_load_dotenv};

use serial_test::serial;

/// **VALUE**: Verifies a missing config file yields working defaults instead
/// of an error, so first launch needs no setup.
#[test]
fn given_missing_config_file_when_loading_then_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");

    let config = AppConfig::load(dir.path()).expect("load");

    assert_eq!(config.backend.base_url, DEFAULT_BACKEND_BASE_URL);
    assert_eq!(config.backend.base_url, "http://localhost:5000");
    assert!(config.downloads_dir.is_none());
}

/// **VALUE**: Verifies save/load round-trips the backend target, the one
/// configuration value the whole client shares.
#[test]
fn given_saved_config_when_reloading_then_values_survive() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut config = AppConfig::default();
    config.backend.base_url = "https://leakage.example.com".to_string();
    config.downloads_dir = Some(dir.path().join("downloads"));
    config.save(dir.path()).expect("save");

    let reloaded = AppConfig::load(dir.path()).expect("load");
    assert_eq!(reloaded.backend.base_url, "https://leakage.example.com");
    assert_eq!(reloaded.downloads_dir, Some(dir.path().join("downloads")));
}

/// **VALUE**: Verifies validation rejects a base URL that is not http(s),
/// before it gets persisted and breaks every request.
#[test]
fn given_invalid_base_url_when_validating_then_rejected() {
    let mut config = AppConfig::default();
    config.backend.base_url = "ftp://backend".to_string();

    assert!(config.validate().is_err());

    config.backend.base_url = String::new();
    assert!(config.validate().is_err());
}

/// **VALUE**: Verifies a corrupt config file is an error, not a silent reset
/// that would drop the user's backend target.
#[test]
fn given_corrupt_config_file_when_loading_then_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("config.json"), b"{not json").expect("write");

    assert!(AppConfig::load(dir.path()).is_err());
}

/// **VALUE**: Verifies a `.env` in the working directory is loaded and that
/// the result reports which file was used, so startup can log the override
/// source once the logger is up.
#[test]
#[serial]
fn given_env_file_in_cwd_when_loading_dotenv_then_source_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(".env"), "LEAKSCOPE_DOTENV_MARKER=1\n").expect("write");

    let original_cwd = std::env::current_dir().expect("cwd");
    std::env::set_current_dir(dir.path()).expect("chdir");
    let result = try_load_dotenv();
    std::env::set_current_dir(original_cwd).expect("chdir back");

    assert!(result.loaded);
    let path = result.path.expect("loaded path");
    assert!(path.ends_with(".env"), "unexpected path: {path:?}");
    assert_eq!(
        std::env::var("LEAKSCOPE_DOTENV_MARKER").ok().as_deref(),
        Some("1")
    );
    unsafe { std::env::remove_var("LEAKSCOPE_DOTENV_MARKER") };
}

/// **VALUE**: Verifies the environment variable overrides the persisted base
/// URL at resolution time.
#[test]
#[serial]
fn given_backend_url_env_when_resolving_then_override_wins() {
    let config = AppConfig::default();

    unsafe { std::env::set_var(BACKEND_URL_ENV, "http://staging:5000") };
    let resolved = config.backend_base_url();
    unsafe { std::env::remove_var(BACKEND_URL_ENV) };

    assert_eq!(resolved, "http://staging:5000");
    assert_eq!(config.backend_base_url(), DEFAULT_BACKEND_BASE_URL);
}
