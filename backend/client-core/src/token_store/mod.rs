//! Persistent token store: one durable string slot.
//!
//! The Rust analogue of the browser's `localStorage.getItem("token")`.
//! The token survives process restarts; everything else the client
//! caches is transient view state. No encryption and no expiry
//! metadata are kept, a known limitation carried over from the
//! original client.

pub mod paths;

pub use paths::{DATA_DIR_ENV, DataPaths, PathSource, detect_data_paths};

use crate::error::token_store::TokenStoreError;

use common::{ErrorLocation, RedactedToken};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

/// Durable storage for the backend auth token.
///
/// All writes are atomic (temp file + rename) so a crash mid-write can
/// never leave a truncated token behind.
#[derive(Debug, Clone)]
pub struct TokenStore {
    token_file: PathBuf,
}

impl TokenStore {
    /// Store backed by `{data_dir}/token`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            token_file: data_dir.join(paths::TOKEN_FILE_NAME),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.token_file
    }

    /// Persist the token, replacing any previous value.
    #[track_caller]
    pub fn set(&self, token: &RedactedToken) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.token_file.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TokenStoreError::Write {
                location: ErrorLocation::caller(),
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let temp_path = self.token_file.with_extension("tmp");

        std::fs::write(&temp_path, token.header_value()).map_err(|e| TokenStoreError::Write {
            location: ErrorLocation::caller(),
            path: temp_path.clone(),
            source: e,
        })?;

        // Atomic rename (POSIX guarantees atomicity)
        std::fs::rename(&temp_path, &self.token_file).map_err(|e| TokenStoreError::Write {
            location: ErrorLocation::caller(),
            path: self.token_file.clone(),
            source: e,
        })?;

        info!("Token persisted ({} chars)", token.len());
        Ok(())
    }

    /// Read the stored token.
    ///
    /// A missing file and an empty/whitespace-only file both read as
    /// absent.
    #[track_caller]
    pub fn get(&self) -> Result<Option<RedactedToken>, TokenStoreError> {
        let contents = match std::fs::read_to_string(&self.token_file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(TokenStoreError::Read {
                    location: ErrorLocation::caller(),
                    path: self.token_file.clone(),
                    source: e,
                });
            }
        };

        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        Ok(Some(RedactedToken::from(trimmed)))
    }

    /// Remove the stored token. Removing an absent token is not an
    /// error.
    #[track_caller]
    pub fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.token_file) {
            Ok(()) => {
                info!("Token cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TokenStoreError::Clear {
                location: ErrorLocation::caller(),
                path: self.token_file.clone(),
                source: e,
            }),
        }
    }
}
