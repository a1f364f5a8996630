//! Authenticated request pipeline.
//!
//! Every data-fetching component issues its HTTP calls through
//! [`ApiClient`] so the whole application shares one base target and
//! one authorization policy instead of repeating them per call site.
//!
//! A client is a snapshot of the session at construction time. Build
//! one per call (see [`SessionState::client`]) rather than caching it,
//! so a token rotated by login/logout is never reused.
//!
//! The pipeline has no side effects beyond the network call itself: it
//! never retries and never mutates the session or the token store on
//! failure. In particular an [`ApiError::Auth`] response does NOT
//! force a logout; the caller decides what to surface.
//!
//! [`SessionState::client`]: crate::session::SessionState::client

pub mod types;

pub use types::{Credentials, DatasetRef, LeakageReport, RegisterForm, UserProfile};

use crate::error::api::ApiError;
use crate::session::Session;

use common::{ErrorLocation, HttpStatusCode, RedactedToken};

use std::time::Duration;

use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use types::{MessageResponse, ProfileEnvelope, TokenResponse};
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);

const REGISTER_ENDPOINT: &str = "register";
const LOGIN_ENDPOINT: &str = "login";
const DATASETS_ENDPOINT: &str = "datasets";
const UPLOAD_ENDPOINT: &str = "upload";
const DETECT_LEAKAGE_ENDPOINT: &str = "detect_leakage";
const PROFILE_ENDPOINT: &str = "profile";

/// HTTP client bound to the backend base target and, when the session
/// is authenticated, the current token.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
    token: Option<RedactedToken>,
}

impl ApiClient {
    /// Client with an explicit token snapshot.
    pub fn new(base_url_str: &str, token: Option<RedactedToken>) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url_str)?;

        // Relative joins resolve against the last slash, so a base like
        // `http://host/api` would lose its path prefix without this.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT_DURATION)
            .build()?;

        Ok(Self {
            base_url,
            client,
            token,
        })
    }

    /// Client carrying the given session's token, if any.
    pub fn for_session(base_url_str: &str, session: &Session) -> Result<Self, ApiError> {
        Self::new(base_url_str, session.token().cloned())
    }

    /// Whether requests from this client carry an Authorization header.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Decorate an outbound request with the authorization policy: the
    /// raw token as the `Authorization` value when present, no header
    /// otherwise. The backend expects the bare token, not a `Bearer`
    /// scheme.
    fn prepare_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, token.header_value()),
            None => request,
        }
    }

    /// Map a non-2xx response into the error taxonomy, extracting the
    /// backend's `{"error": ...}` message when present.
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_response(status.as_u16(), &body))
    }

    /// `POST /register`. Unauthenticated; returns the backend's
    /// confirmation message.
    pub async fn register(&self, form: &RegisterForm) -> Result<String, ApiError> {
        let url = self.endpoint(REGISTER_ENDPOINT)?;
        debug!("POST {url}");

        let response = self
            .prepare_request(self.client.post(url))
            .json(form)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let body: MessageResponse = response.json().await?;
        Ok(body.message)
    }

    /// `POST /login`. Unauthenticated; returns the issued token.
    pub async fn login(&self, credentials: &Credentials) -> Result<RedactedToken, ApiError> {
        let url = self.endpoint(LOGIN_ENDPOINT)?;
        debug!("POST {url}");

        let response = self
            .prepare_request(self.client.post(url))
            .json(credentials)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let body: TokenResponse = response.json().await?;
        Ok(RedactedToken::new(body.token))
    }

    /// `GET /datasets`. Requires an authenticated session.
    pub async fn list_datasets(&self) -> Result<Vec<DatasetRef>, ApiError> {
        let url = self.endpoint(DATASETS_ENDPOINT)?;
        debug!("GET {url}");

        let response = self.prepare_request(self.client.get(url)).send().await?;
        let response = Self::check(response).await?;

        let datasets: Vec<DatasetRef> = response.json().await?;
        Ok(datasets)
    }

    /// `POST /upload`. Multipart upload of one tabular dataset file;
    /// returns the backend's confirmation message.
    pub async fn upload_dataset(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let url = self.endpoint(UPLOAD_ENDPOINT)?;
        debug!("POST {url} ({filename}, {} bytes)", bytes.len());

        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .prepare_request(self.client.post(url))
            .multipart(form)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let body: MessageResponse = response.json().await?;
        Ok(body.message)
    }

    /// `GET /detect_leakage/{dataset_id}` in binary response mode.
    ///
    /// The payload is an opaque CSV produced server-side; a JSON parse
    /// of it would fail, so the body is read as raw bytes.
    pub async fn detect_leakage(&self, dataset_id: u64) -> Result<LeakageReport, ApiError> {
        let url = self.endpoint(&format!("{DETECT_LEAKAGE_ENDPOINT}/{dataset_id}"))?;
        debug!("GET {url}");

        let response = self.prepare_request(self.client.get(url)).send().await?;
        let response = Self::check(response).await?;

        let bytes = response.bytes().await?;
        Ok(LeakageReport {
            dataset_id,
            bytes: bytes.to_vec(),
        })
    }

    /// `GET /profile?user_id=...`. Unauthenticated; the backend also
    /// reports lookup failures inside a 200 body, which surface here as
    /// [`ApiError::Server`].
    pub async fn profile(&self, user_id: u64) -> Result<UserProfile, ApiError> {
        let url = self.endpoint(PROFILE_ENDPOINT)?;
        debug!("GET {url}?user_id={user_id}");

        let response = self
            .prepare_request(self.client.get(url))
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        let response = Self::check(response).await?;
        let status = response.status().as_u16();

        match response.json::<ProfileEnvelope>().await? {
            ProfileEnvelope::Profile(profile) => Ok(profile),
            ProfileEnvelope::Failure { error } => Err(ApiError::Server {
                status_code: HttpStatusCode(status),
                message: error,
                location: ErrorLocation::caller(),
            }),
        }
    }
}
