use std::env;
use std::path::PathBuf;

use course_site_core::config::{env_or, ConfigError};
use course_site_core::StoreConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Published content document served at `/content.json`.
    pub content_path: PathBuf,
    /// Sync channel capacity.
    pub sync_capacity: usize,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", "u16", 3030)?,
            content_path: env::var_os("CONTENT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/content.json")),
            sync_capacity: env_or("SYNC_CAPACITY", "usize", 64)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            store: StoreConfig::from_env(),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
