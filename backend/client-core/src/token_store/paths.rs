//! Platform-aware detection of the leakscope data directory.
//!
//! Lookup order:
//! 1. LEAKSCOPE_DATA_DIR environment variable (explicit override)
//! 2. Platform-specific data directory via `dirs` crate
//! 3. Fallback paths for common configurations
//!
//! Returns Result, never silently falls back to a wrong path.

use crate::error::token_store::TokenStoreError;

use std::env;
use std::path::PathBuf;

use log::{debug, info, warn};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "LEAKSCOPE_DATA_DIR";

const APP_DIR_NAME: &str = "leakscope";

/// File holding the single durable token slot.
pub const TOKEN_FILE_NAME: &str = "token";

/// Resolved data paths.
#[derive(Debug, Clone)]
pub struct DataPaths {
    /// Base data directory (e.g., ~/.local/share/leakscope on Linux).
    pub data_dir: PathBuf,
    /// Path to the token file.
    pub token_file: PathBuf,
    /// How the path was determined.
    pub source: PathSource,
}

/// How the path was determined (for debugging/logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    /// Set via LEAKSCOPE_DATA_DIR environment variable.
    EnvVar,
    /// Detected via platform-specific XDG/AppData/Library path.
    PlatformDefault,
    /// Linux fallback (~/.local/share/leakscope).
    LinuxFallback,
    /// macOS fallback (~/Library/Application Support/leakscope).
    MacOSFallback,
    /// Windows fallback (%APPDATA%/leakscope).
    WindowsFallback,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::EnvVar => write!(f, "{DATA_DIR_ENV}"),
            PathSource::PlatformDefault => write!(f, "platform default"),
            PathSource::LinuxFallback => write!(f, "Linux fallback"),
            PathSource::MacOSFallback => write!(f, "macOS fallback"),
            PathSource::WindowsFallback => write!(f, "Windows fallback"),
        }
    }
}

impl DataPaths {
    fn new(data_dir: PathBuf, source: PathSource) -> Self {
        let token_file = data_dir.join(TOKEN_FILE_NAME);
        Self {
            data_dir,
            token_file,
            source,
        }
    }
}

/// Detect the leakscope data paths.
///
/// # Errors
/// Returns `TokenStoreError::PathDetection` if no valid path can be
/// determined.
///
/// # Platform Behavior
/// - **Linux**: `$XDG_DATA_HOME/leakscope` or `~/.local/share/leakscope`
/// - **macOS**: `~/Library/Application Support/leakscope`
/// - **Windows**: `%APPDATA%/leakscope`
pub fn detect_data_paths() -> Result<DataPaths, TokenStoreError> {
    // 1. Check environment variable override
    if let Ok(custom_dir) = env::var(DATA_DIR_ENV) {
        let paths = DataPaths::new(PathBuf::from(&custom_dir), PathSource::EnvVar);
        info!("Using {DATA_DIR_ENV} override: {:?}", paths.data_dir);
        return Ok(paths);
    }

    // 2. Try platform-specific detection via dirs crate
    if let Some(data_dir) = dirs::data_local_dir() {
        let paths = DataPaths::new(data_dir.join(APP_DIR_NAME), PathSource::PlatformDefault);
        debug!("Platform data dir: {:?}", paths.data_dir);
        return Ok(paths);
    }

    // 3. Platform-specific fallbacks
    #[cfg(target_os = "linux")]
    {
        if let Ok(home) = env::var("HOME") {
            let data_dir = PathBuf::from(home).join(".local/share").join(APP_DIR_NAME);
            warn!("Using Linux fallback path: {:?}", data_dir);
            return Ok(DataPaths::new(data_dir, PathSource::LinuxFallback));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = env::var("HOME") {
            let data_dir = PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR_NAME);
            warn!("Using macOS fallback path: {:?}", data_dir);
            return Ok(DataPaths::new(data_dir, PathSource::MacOSFallback));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = env::var("APPDATA") {
            let data_dir = PathBuf::from(appdata).join(APP_DIR_NAME);
            warn!("Using Windows fallback path: {:?}", data_dir);
            return Ok(DataPaths::new(data_dir, PathSource::WindowsFallback));
        }
    }

    Err(TokenStoreError::path_detection(format!(
        "Cannot determine leakscope data directory. Set the {DATA_DIR_ENV} environment variable."
    )))
}
