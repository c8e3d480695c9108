//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPSYNC_API_VERSION` - Admin API version (default: 2024-01)
//! - `SHOPSYNC_CREDENTIALS_PATH` - credentials file location (default:
//!   `<config_dir>/shopsync/credentials.json`)

use std::path::PathBuf;

use thiserror::Error;

use crate::credentials::CredentialStore;

/// Default Admin API version when none is configured.
pub const DEFAULT_API_VERSION: &str = "2024-01";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Admin API version segment of every request path.
    pub api_version: String,
    /// Location of the credentials file.
    pub credentials_path: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is present but malformed
    /// (e.g. an empty API version).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_version = get_env_or_default("SHOPSYNC_API_VERSION", DEFAULT_API_VERSION);
        if api_version.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPSYNC_API_VERSION".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let credentials_path = std::env::var("SHOPSYNC_CREDENTIALS_PATH")
            .map_or_else(|_| CredentialStore::default_path(), PathBuf::from);

        Ok(Self {
            api_version,
            credentials_path,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            credentials_path: CredentialStore::default_path(),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
