use leakscope::commands::{auth, datasets, profile};
use leakscope::error::LeakscopeError;

use client_core::api::RegisterForm;
use client_core::error::{CoreError, ValidationError};
use client_core::session::SessionState;
use client_core::token_store::TokenStore;

use common::RedactedToken;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn anonymous_state() -> (SessionState, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = SessionState::new(TokenStore::new(dir.path()));
    (state, dir)
}

async fn logged_in_state() -> (SessionState, TempDir) {
    let (state, dir) = anonymous_state();
    state
        .login(RedactedToken::from("abc123"))
        .await
        .expect("login");
    (state, dir)
}

fn register_form(confirm_password: &str) -> RegisterForm {
    RegisterForm {
        username: "alice".to_string(),
        password: "hunter22".to_string(),
        confirm_password: confirm_password.to_string(),
        mobile_number: "5551234567".to_string(),
    }
}

/// **VALUE**: Verifies the register scenario for mismatched passwords: the
/// inline validation error fires and NO request reaches the backend.
///
/// **WHY THIS MATTERS**: "checked before any network call" is the contract;
/// a round trip for a form the client already knows is broken both wastes a
/// call and leaks form contents unnecessarily.
#[tokio::test]
async fn given_mismatched_passwords_when_registering_then_no_request_issued() {
    let server = MockServer::start().await;
    let (state, _dir) = anonymous_state();

    let err = auth::register(&state, &server.uri(), register_form("different"))
        .await
        .unwrap_err();

    match err {
        LeakscopeError::Core(CoreError::Validation(v)) => {
            assert_eq!(v, ValidationError::PasswordMismatch);
            assert_eq!(v.to_string(), "Passwords do not match");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let requests = server.received_requests().await.expect("requests");
    assert!(requests.is_empty(), "no network call may be issued");
}

/// **VALUE**: Verifies the full login flow: backend token lands in the
/// session and the store, so subsequent commands run authenticated.
#[tokio::test]
async fn given_valid_credentials_when_logging_in_then_session_authenticated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})))
        .mount(&server)
        .await;

    let (state, dir) = anonymous_state();
    auth::login(&state, &server.uri(), "alice", "hunter22")
        .await
        .expect("login");

    assert!(state.is_authenticated().await);
    let stored = TokenStore::new(dir.path()).get().expect("get");
    assert_eq!(stored.expect("token").header_value(), "abc123");
}

/// **VALUE**: Verifies the datasets view refuses to run anonymously, citing
/// the guard's redirect target, without touching the network.
#[tokio::test]
async fn given_anonymous_session_when_listing_datasets_then_login_required() {
    let server = MockServer::start().await;
    let (state, _dir) = anonymous_state();

    let err = datasets::list(&state, &server.uri(), None, 1)
        .await
        .unwrap_err();
    assert!(
        err.to_string().contains("/login"),
        "error should point at the login view: {err}"
    );

    let requests = server.received_requests().await.expect("requests");
    assert!(requests.is_empty());
}

/// **VALUE**: Verifies the 401 scenario: the failure is surfaced and the
/// session is left untouched (the documented gap: an auth failure does not
/// force a logout).
#[tokio::test]
async fn given_rejected_token_when_listing_datasets_then_session_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/datasets"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Token expired"})))
        .mount(&server)
        .await;

    let (state, _dir) = logged_in_state().await;
    let result = datasets::list(&state, &server.uri(), None, 1).await;

    assert!(result.is_err());
    assert!(
        state.is_authenticated().await,
        "an auth failure must not log the user out"
    );
}

/// **VALUE**: Verifies the end-to-end leakage download: binary 200 response
/// lands on disk as `leakage_result_42.csv` with the exact payload.
#[tokio::test]
async fn given_binary_response_when_detecting_then_file_written() {
    let payload = b"column,leak_score\ntarget,0.97\n".to_vec();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/detect_leakage/42"))
        .and(header("authorization", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(payload.clone(), "text/csv"))
        .mount(&server)
        .await;

    let (state, _dir) = logged_in_state().await;
    let out_dir = tempfile::tempdir().expect("tempdir");

    let written = datasets::detect(&state, &server.uri(), 42, out_dir.path())
        .await
        .expect("detect");

    assert_eq!(written, out_dir.path().join("leakage_result_42.csv"));
    assert_eq!(std::fs::read(&written).expect("read"), payload);
}

/// **VALUE**: Verifies detect surfaces a backend failure without writing
/// anything.
#[tokio::test]
async fn given_server_error_when_detecting_then_no_file_written() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/detect_leakage/42"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Detection failed"})),
        )
        .mount(&server)
        .await;

    let (state, _dir) = logged_in_state().await;
    let out_dir = tempfile::tempdir().expect("tempdir");

    let err = datasets::detect(&state, &server.uri(), 42, out_dir.path())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Detection failed"));

    let entries: Vec<_> = std::fs::read_dir(out_dir.path())
        .expect("read_dir")
        .collect();
    assert!(entries.is_empty(), "no partial download may be left behind");
}

/// **VALUE**: Verifies the upload command reads the file from disk and
/// surfaces the backend's confirmation message path end to end.
#[tokio::test]
async fn given_dataset_file_when_uploading_then_backend_receives_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("authorization", "abc123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "File uploaded"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (state, _dir) = logged_in_state().await;
    let data_dir = tempfile::tempdir().expect("tempdir");
    let file = data_dir.path().join("sales.csv");
    std::fs::write(&file, b"a,b\n1,2\n").expect("write");

    datasets::upload(&state, &server.uri(), &file)
        .await
        .expect("upload");
}

/// **VALUE**: Verifies the profile command validates the id before any
/// request and fetches the profile for a numeric id.
#[tokio::test]
async fn given_profile_command_when_id_invalid_then_no_request() {
    let server = MockServer::start().await;
    let (state, _dir) = anonymous_state();

    let err = profile::show(&state, &server.uri(), "abc")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid user ID"));

    let requests = server.received_requests().await.expect("requests");
    assert!(requests.is_empty());
}

/// **VALUE**: Verifies logout clears the session through the command layer.
#[tokio::test]
async fn given_logged_in_state_when_logging_out_then_anonymous() {
    let (state, dir) = logged_in_state().await;

    auth::logout(&state).await.expect("logout");

    assert!(!state.is_authenticated().await);
    assert!(TokenStore::new(dir.path()).get().expect("get").is_none());
}
