use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Token Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Token Write Error: {path}: {source} {location}")]
    Write {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Token Clear Error: {path}: {source} {location}")]
    Clear {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Data path detection failed: {message} {location}")]
    PathDetection {
        message: String,
        location: ErrorLocation,
    },
}

impl TokenStoreError {
    #[track_caller]
    pub fn path_detection(message: impl Into<String>) -> Self {
        TokenStoreError::PathDetection {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }
}
