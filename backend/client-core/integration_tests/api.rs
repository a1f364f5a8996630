use client_core::api::{ApiClient, Credentials, RegisterForm};
use client_core::error::api::ApiError;
use client_core::session::Session;

use common::RedactedToken;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn register_form() -> RegisterForm {
    RegisterForm {
        username: "alice".to_string(),
        password: "hunter22".to_string(),
        confirm_password: "hunter22".to_string(),
        mobile_number: "5551234567".to_string(),
    }
}

fn authenticated_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, Some(RedactedToken::from("abc123"))).expect("client")
}

fn anonymous_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, None).expect("client")
}

// ----------------------------------------------------------------------------
// Authorization header policy
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies every request from an authenticated client carries the
/// raw token as the Authorization header.
///
/// **WHY THIS MATTERS**: This is the single authorization policy the whole
/// application shares; if the header is missing or reshaped, every
/// authenticated endpoint fails at once.
///
/// **BUG THIS CATCHES**: Would catch the header being dropped, renamed, or
/// wrapped in a `Bearer` scheme the backend does not expect.
#[tokio::test]
async fn given_authenticated_client_when_listing_datasets_then_token_header_sent() {
    // GIVEN: A backend that only answers requests carrying the token
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/datasets"))
        .and(header("authorization", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "filename": "sales.csv"},
            {"id": 2, "filename": "churn.csv"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Listing datasets through an authenticated client
    let client = authenticated_client(&server.uri());
    let datasets = client.list_datasets().await.expect("datasets");

    // THEN: The request matched (header present) and the payload decoded
    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[0].id, 1);
    assert_eq!(datasets[0].filename, "sales.csv");
}

/// **VALUE**: Verifies anonymous requests carry no Authorization header at
/// all.
///
/// **WHY THIS MATTERS**: Sending a stale or empty header while anonymous
/// would leak state between sessions and can trip backend auth middleware.
#[tokio::test]
async fn given_anonymous_client_when_requesting_then_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/datasets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());
    client.list_datasets().await.expect("datasets");

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0].headers.get("authorization").is_none(),
        "anonymous request must not carry an Authorization header"
    );
}

// ----------------------------------------------------------------------------
// Auth flows
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies a successful login yields the backend-issued token.
#[tokio::test]
async fn given_valid_credentials_when_logging_in_then_token_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})))
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());
    let token = client
        .login(&Credentials {
            username: "alice".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .expect("login");

    assert_eq!(token.header_value(), "abc123");
}

/// **VALUE**: Verifies registration surfaces the backend's confirmation
/// message, and that a rejection surfaces the backend's own error text.
///
/// **BUG THIS CATCHES**: Would catch the `{"error": ...}` body extraction
/// regressing to the generic fallback string.
#[tokio::test]
async fn given_register_responses_when_registering_then_messages_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"message": "User registered"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());
    let message = client.register(&register_form()).await.expect("register");
    assert_eq!(message, "User registered");

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Username already taken"})),
        )
        .mount(&server)
        .await;

    let err = client.register(&register_form()).await.unwrap_err();
    assert_eq!(err.error_category(), "client_error");
    match err {
        ApiError::Server {
            status_code,
            message,
            ..
        } => {
            assert_eq!(status_code.0, 400);
            assert_eq!(message, "Username already taken");
        }
        other => panic!("expected Server error, got {other:?}"),
    }
}

// ----------------------------------------------------------------------------
// Error taxonomy
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies a 401 surfaces as `ApiError::Auth`, distinct from
/// other backend failures, and that the pipeline performs no hidden session
/// mutation (it holds no session to mutate).
///
/// **WHY THIS MATTERS**: Callers decide how to present an expired token; the
/// pipeline must classify it correctly and do nothing else.
#[tokio::test]
async fn given_expired_token_when_listing_datasets_then_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/datasets"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Token expired"})))
        .mount(&server)
        .await;

    let client = authenticated_client(&server.uri());
    let err = client.list_datasets().await.unwrap_err();

    assert!(err.is_auth(), "401 must classify as Auth, got {err:?}");
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.error_category(), "auth");
}

/// **VALUE**: Verifies a non-JSON error body falls back to a generic message
/// instead of failing to decode.
#[tokio::test]
async fn given_html_error_body_when_requesting_then_generic_fallback_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/datasets"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("<html>Internal Server Error</html>"),
        )
        .mount(&server)
        .await;

    let client = authenticated_client(&server.uri());
    let err = client.list_datasets().await.unwrap_err();

    assert_eq!(err.error_category(), "server_error");
    match err {
        ApiError::Server { message, .. } => assert_eq!(message, "HTTP 500"),
        other => panic!("expected Server error, got {other:?}"),
    }
}

/// **VALUE**: Verifies transport failures classify as `Network`, never as a
/// backend error.
///
/// **BUG THIS CATCHES**: Would catch connection errors being folded into the
/// Server variant, which would mislead users into blaming the backend.
#[tokio::test]
async fn given_unreachable_backend_when_requesting_then_network_error() {
    // Nothing listens here
    let client = anonymous_client("http://127.0.0.1:9");

    let err = client.list_datasets().await.unwrap_err();
    assert!(
        matches!(err, ApiError::Network { .. }),
        "expected Network error, got {err:?}"
    );
}

/// **VALUE**: Verifies a base URL carrying a path prefix keeps that prefix
/// when endpoint segments are joined onto it.
///
/// **BUG THIS CATCHES**: Would catch relative joins resolving against the
/// host root, silently turning `http://host/api` + `datasets` into
/// `http://host/datasets`.
#[tokio::test]
async fn given_base_url_with_path_when_requesting_then_prefix_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/datasets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&format!("{}/api", server.uri()));
    client.list_datasets().await.expect("datasets");
}

// ----------------------------------------------------------------------------
// Upload and leakage detection
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies the upload is sent as multipart with the original
/// filename and surfaces the backend's confirmation message.
#[tokio::test]
async fn given_dataset_bytes_when_uploading_then_multipart_with_filename() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "File uploaded"})),
        )
        .mount(&server)
        .await;

    let client = authenticated_client(&server.uri());
    let message = client
        .upload_dataset("sales.csv", b"a,b\n1,2\n".to_vec())
        .await
        .expect("upload");
    assert_eq!(message, "File uploaded");

    let requests = server.received_requests().await.expect("requests");
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("multipart/form-data"),
        "upload must be multipart, got {content_type}"
    );
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(
        body.contains("sales.csv"),
        "multipart body must carry the filename"
    );
}

/// **VALUE**: Verifies leakage detection reads the payload as raw bytes and
/// names the download deterministically from the dataset id.
///
/// **WHY THIS MATTERS**: The result is an opaque CSV; a JSON parse of it
/// would fail. The deterministic name is the user-visible contract
/// (`leakage_result_<id>.csv`).
#[tokio::test]
async fn given_binary_response_when_detecting_leakage_then_report_with_deterministic_name() {
    let payload = b"column,leak_score\ntarget,0.97\n".to_vec();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/detect_leakage/42"))
        .and(header("authorization", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(payload.clone(), "text/csv"))
        .mount(&server)
        .await;

    let client = authenticated_client(&server.uri());
    let report = client.detect_leakage(42).await.expect("report");

    assert_eq!(report.dataset_id, 42);
    assert_eq!(report.bytes, payload);
    assert_eq!(report.file_name(), "leakage_result_42.csv");
}

// ----------------------------------------------------------------------------
// Profile
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies the profile lookup passes user_id as a query
/// parameter and decodes the profile payload.
#[tokio::test]
async fn given_existing_user_when_fetching_profile_then_profile_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(query_param("user_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "alice",
            "email": "alice@example.com",
            "role": "analyst"
        })))
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());
    let profile = client.profile(7).await.expect("profile");

    assert_eq!(profile.username, "alice");
    assert_eq!(profile.email, "alice@example.com");
    assert_eq!(profile.role, "analyst");
}

/// **VALUE**: Verifies the backend's quirk of reporting profile failures
/// inside a 200 body still surfaces as an error to the caller.
///
/// **BUG THIS CATCHES**: Would catch the `{"error": ...}`-in-200 shape being
/// decoded as a profile with empty fields.
#[tokio::test]
async fn given_error_in_200_body_when_fetching_profile_then_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "User not found"})))
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());
    let err = client.profile(999).await.unwrap_err();

    match err {
        ApiError::Server { message, .. } => assert_eq!(message, "User not found"),
        other => panic!("expected Server error, got {other:?}"),
    }
}

// ----------------------------------------------------------------------------
// Session-derived clients
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies a client derived from a session snapshot reflects that
/// snapshot's token, the re-instantiation policy callers rely on.
#[tokio::test]
async fn given_session_snapshots_when_building_clients_then_token_follows_session() {
    let base = "http://localhost:5000";

    let anonymous = ApiClient::for_session(base, &Session::Anonymous).expect("client");
    assert!(!anonymous.is_authenticated());

    let session = Session::Authenticated(RedactedToken::from("abc123"));
    let authenticated = ApiClient::for_session(base, &session).expect("client");
    assert!(authenticated.is_authenticated());
}
