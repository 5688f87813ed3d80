use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got `{value}`")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Content store configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Durable storage key holding the serialized document.
    pub content_key: String,
    /// Durable storage key written on every save as a change signal.
    pub refresh_key: String,
    /// Path segment of the editor surface.
    pub editor_segment: String,
    /// Absolute URL of the published content document. Defaults to the
    /// `/content.json` route of a local `course-site-api`.
    pub content_url: String,
    /// Directory for file-backed durable storage (`None` keeps drafts in memory).
    pub storage_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            content_key: "site-content-data".to_string(),
            refresh_key: "site-content-refresh".to_string(),
            editor_segment: "panel-x7k9m2".to_string(),
            content_url: "http://127.0.0.1:3030/content.json".to_string(),
            storage_dir: None,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            content_key: env::var("CONTENT_STORAGE_KEY").unwrap_or(defaults.content_key),
            refresh_key: env::var("CONTENT_REFRESH_KEY").unwrap_or(defaults.refresh_key),
            editor_segment: env::var("EDITOR_PATH_SEGMENT").unwrap_or(defaults.editor_segment),
            content_url: env::var("CONTENT_URL").unwrap_or(defaults.content_url),
            storage_dir: env::var_os("CONTENT_STORAGE_DIR").map(PathBuf::from),
        }
    }
}

/// Parse an optional environment variable, falling back to `default` when unset.
pub fn env_or<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
        Err(_) => Ok(default),
    }
}
