//! Remote content sources for the published content document.

use std::future::Future;
use std::path::PathBuf;

use chrono::Utc;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::document::SiteContent;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("content source answered with status {0}")]
    Status(u16),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid content document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the published content document comes from.
pub trait ContentSource {
    /// Fetch the raw document. Callers treat any error as "no content available".
    fn fetch(&self) -> impl Future<Output = Result<Value, SourceError>> + Send;
}

/// Fetch from a source and fill missing keys from the default document.
pub async fn load_document<S: ContentSource>(source: &S) -> Result<SiteContent, SourceError> {
    let raw = source.fetch().await?;
    Ok(SiteContent::from_value(raw)?)
}

/// HTTP GET with cache busting and caching disabled. The URL must be
/// absolute.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Request URL with a `t=<epoch millis>` cache-busting parameter.
    pub fn request_url(&self) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}t={}", self.url, Utc::now().timestamp_millis())
    }
}

impl ContentSource for HttpSource {
    async fn fetch(&self) -> Result<Value, SourceError> {
        let url = self.request_url();
        debug!(%url, "fetching content document");

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

/// Reads the content document from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContentSource for FileSource {
    async fn fetch(&self) -> Result<Value, SourceError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// A fixed document, for offline use and fixtures.
#[derive(Debug, Clone)]
pub struct InlineSource {
    value: Value,
}

impl InlineSource {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl ContentSource for InlineSource {
    async fn fetch(&self) -> Result<Value, SourceError> {
        Ok(self.value.clone())
    }
}
