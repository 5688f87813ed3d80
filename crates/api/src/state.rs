use std::sync::Arc;

use course_site_core::{ContentStore, FileSource, SyncBus};
use tokio::sync::RwLock;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: AppConfig,
    store: RwLock<ContentStore>,
    source: FileSource,
    sync_bus: SyncBus,
}

impl AppState {
    pub fn new(config: AppConfig, store: ContentStore, sync_bus: SyncBus) -> Self {
        let source = FileSource::new(config.content_path.clone());
        Self {
            inner: Arc::new(InnerState {
                config,
                store: RwLock::new(store),
                source,
                sync_bus,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &RwLock<ContentStore> {
        &self.inner.store
    }

    /// Source the public document is (re)loaded from.
    pub fn source(&self) -> &FileSource {
        &self.inner.source
    }

    pub fn sync_bus(&self) -> &SyncBus {
        &self.inner.sync_bus
    }
}
