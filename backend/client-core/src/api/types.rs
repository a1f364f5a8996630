//! Wire payloads for the leakage-detection backend.
//!
//! Request bodies serialize with the exact field names the backend
//! expects; response shapes are owned by the backend and only
//! displayed by the client.

use serde::{Deserialize, Serialize};

/// One uploaded dataset as returned by `GET /datasets`.
///
/// Owned by the backend; the client never mutates it, only displays it
/// and uses `id` as the key for leakage-detection requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    pub id: u64,
    pub filename: String,
}

/// Response of `GET /profile`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub role: String,
}

/// Body of `POST /register`.
///
/// No `Debug` derive: two of these fields are passwords.
#[derive(Clone, Serialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub mobile_number: String,
}

/// Body of `POST /login`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Binary result of a leakage-detection run.
///
/// The computation is entirely opaque to the client; the payload is
/// presented to the user as a downloadable CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeakageReport {
    pub dataset_id: u64,
    pub bytes: Vec<u8>,
}

impl LeakageReport {
    /// Deterministic download name for this report.
    pub fn file_name(&self) -> String {
        format!("leakage_result_{}.csv", self.dataset_id)
    }
}

/// Success body used by `/register` and `/upload`: `{"message": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct MessageResponse {
    pub message: String,
}

/// Success body of `/login`: `{"token": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

/// `/profile` reports failures in a 200 body, so both shapes must be
/// tried.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProfileEnvelope {
    Failure { error: String },
    Profile(UserProfile),
}
