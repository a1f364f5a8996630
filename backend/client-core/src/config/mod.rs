//! Application configuration.
//!
//! The original client embedded the backend origin per component; here
//! it is one configuration value. Resolution order for the base
//! target: `LEAKSCOPE_BACKEND_URL` environment variable (with `.env`
//! support), then `config.json` in the data directory, then the
//! built-in default.

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::env;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the backend base URL.
pub const BACKEND_URL_ENV: &str = "LEAKSCOPE_BACKEND_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend origin every request is issued against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub backend: BackendConfig,

    /// Where leakage reports are written; defaults to the current
    /// directory when unset.
    pub downloads_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            backend: BackendConfig::default(),
            downloads_dir: None,
        }
    }
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_base_url() -> String {
    crate::DEFAULT_BACKEND_BASE_URL.to_string()
}

impl AppConfig {
    /// Load config from `{config_dir}/config.json`.
    ///
    /// A missing file yields defaults; a file that exists but is
    /// unreadable or invalid is an error rather than a silent reset.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Read {
            location: ErrorLocation::caller(),
            path: config_path.clone(),
            source: e,
        })?;

        let config: AppConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
                location: ErrorLocation::caller(),
                path: config_path.clone(),
                reason: e.to_string(),
            })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to `{config_dir}/config.json` using atomic write
    /// (temp file + rename, so a crash cannot leave a corrupt file).
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Write {
            location: ErrorLocation::caller(),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{CONFIG_FILE_NAME}.tmp"));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            location: ErrorLocation::caller(),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::Write {
            location: ErrorLocation::caller(),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::Write {
            location: ErrorLocation::caller(),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::Validation {
                location: ErrorLocation::caller(),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        let url = &self.backend.base_url;
        if url.is_empty() {
            return Err(ConfigError::Validation {
                location: ErrorLocation::caller(),
                reason: "backend.base_url cannot be empty".to_string(),
            });
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Validation {
                location: ErrorLocation::caller(),
                reason: format!("Invalid backend URL format: {url}"),
            });
        }

        Ok(())
    }

    /// The backend base URL after applying the environment override.
    pub fn backend_base_url(&self) -> String {
        match env::var(BACKEND_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                debug!("Backend URL from {BACKEND_URL_ENV}");
                value.trim().to_string()
            }
            _ => self.backend.base_url.clone(),
        }
    }
}

/// Result of attempting to load a `.env` file.
#[derive(Debug)]
pub struct EnvLoadResult {
    /// Path of the loaded `.env`, if any.
    pub path: Option<PathBuf>,
    pub loaded: bool,
}

/// Attempt to load `.env` from the current directory, then from the
/// executable's directory. Missing files are non-fatal.
pub fn try_load_dotenv() -> EnvLoadResult {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return EnvLoadResult {
            path: Some(path),
            loaded: true,
        };
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let env_path = exe_dir.join(".env");
            if env_path.exists() {
                match dotenvy::from_path(&env_path) {
                    Ok(_) => {
                        info!("Loaded .env from: {:?}", env_path);
                        return EnvLoadResult {
                            path: Some(env_path),
                            loaded: true,
                        };
                    }
                    Err(e) => {
                        warn!("Failed to parse .env at {:?}: {}", env_path, e);
                    }
                }
            }
        }
    }

    debug!("No .env file found - using existing environment");
    EnvLoadResult {
        path: None,
        loaded: false,
    }
}
