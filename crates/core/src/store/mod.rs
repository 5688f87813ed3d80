//! The content store: single source of truth for [`SiteContent`].
//!
//! A store holds two copies of the document: the working copy (live edits)
//! and the saved snapshot (last persisted state). `is_modified` is their
//! structural difference, recomputed synchronously after every change.
//!
//! # Lifecycle
//!
//! ```ignore
//! let mut store = ContentStore::new(options, storage, bus);
//! store.initialize(&HttpSource::new(url)).await; // loading -> ready
//! store.update(patch);
//! store.save();
//! ```
//!
//! # Cross-instance sync
//!
//! Every durable write is announced on the [`SyncBus`]. Stores with
//! [`SyncPolicy::Adopt`] (public readers) re-read storage on notification;
//! stores with [`SyncPolicy::Ignore`] (the editor) never do. Two editors
//! saving concurrently race and the last write wins: there is no version
//! check between instances.

mod editing;

use std::sync::Arc;

use chrono::Utc;
use similar::TextDiff;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::document::{validate_document, DocumentIssue, Mode, SiteContent};
use crate::error::{StoreError, StoreResult};
use crate::events::{SyncBus, SyncEvent, SyncPolicy};
use crate::mutation::{export_document, import_document, ContentPatch, ImportError, Target};
use crate::source::{load_document, ContentSource};
use crate::storage::KeyValueStorage;

/// Per-instance store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub mode: Mode,
    pub sync_policy: SyncPolicy,
    pub content_key: String,
    pub refresh_key: String,
}

impl StoreOptions {
    /// Options for `mode`; editors ignore sync notifications, readers adopt them.
    pub fn for_mode(mode: Mode, config: &StoreConfig) -> Self {
        let sync_policy = match mode {
            Mode::Editor => SyncPolicy::Ignore,
            Mode::Public => SyncPolicy::Adopt,
        };
        Self {
            mode,
            sync_policy,
            content_key: config.content_key.clone(),
            refresh_key: config.refresh_key.clone(),
        }
    }

    /// Options for the store serving a navigation path.
    pub fn for_path(path: &str, config: &StoreConfig) -> Self {
        Self::for_mode(Mode::from_path(path, &config.editor_segment), config)
    }

    pub fn with_sync_policy(mut self, sync_policy: SyncPolicy) -> Self {
        self.sync_policy = sync_policy;
        self
    }
}

pub struct ContentStore {
    options: StoreOptions,
    origin: Uuid,
    storage: Arc<dyn KeyValueStorage>,
    bus: SyncBus,
    sync_rx: broadcast::Receiver<SyncEvent>,
    content: SiteContent,
    saved: SiteContent,
    modified: bool,
    loading: bool,
    last_refresh: i64,
}

impl ContentStore {
    /// Create a store on the default document. It stays loading until
    /// [`ContentStore::initialize`] completes.
    pub fn new(options: StoreOptions, storage: Arc<dyn KeyValueStorage>, bus: SyncBus) -> Self {
        let sync_rx = bus.subscribe();
        Self {
            options,
            origin: Uuid::new_v4(),
            storage,
            bus,
            sync_rx,
            content: SiteContent::default(),
            saved: SiteContent::default(),
            modified: false,
            loading: true,
            last_refresh: 0,
        }
    }

    /// Load the initial document.
    ///
    /// Editor: the persisted draft if any, else the published document, which
    /// is then persisted as the first draft. Public: always the published
    /// document. On any failure the store stays on the default document.
    pub async fn initialize<S: ContentSource>(&mut self, source: &S) {
        match self.options.mode {
            Mode::Editor => self.initialize_editor(source).await,
            Mode::Public => match load_document(source).await {
                Ok(doc) => self.adopt(doc),
                Err(e) => warn!(error = %e, "failed to load published content, using defaults"),
            },
        }
        self.loading = false;
        info!(mode = ?self.options.mode, pages = self.content.pages.len(), "content store ready");
    }

    async fn initialize_editor<S: ContentSource>(&mut self, source: &S) {
        match self.storage.get(&self.options.content_key) {
            Ok(Some(raw)) => match SiteContent::from_json_str(&raw) {
                Ok(doc) => {
                    debug!("loaded persisted draft");
                    self.adopt(doc);
                }
                Err(e) => error!(error = %e, "persisted draft is corrupt, using defaults"),
            },
            Ok(None) => match load_document(source).await {
                Ok(doc) => {
                    self.adopt(doc);
                    if let Err(e) = self.persist_content() {
                        warn!(error = %e, "failed to persist initial draft");
                    }
                }
                Err(e) => warn!(error = %e, "failed to load published content, using defaults"),
            },
            Err(e) => error!(error = %e, "failed to read persisted draft, using defaults"),
        }
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn saved(&self) -> &SiteContent {
        &self.saved
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Id attached to this store's sync notifications.
    pub fn origin(&self) -> Uuid {
        self.origin
    }

    /// Shallow-merge `patch` into the working copy.
    pub fn update(&mut self, patch: ContentPatch) {
        patch.apply(&mut self.content);
        self.refresh_modified();
    }

    /// Replace the working copy wholesale.
    pub fn set_content(&mut self, content: SiteContent) {
        self.content = content;
        self.refresh_modified();
    }

    /// Replace the working copy with the default document and erase the
    /// persisted draft. The saved snapshot is kept, so the store reads as
    /// modified until the next save.
    pub fn reset(&mut self) {
        self.content = SiteContent::default();
        match self.storage.remove(&self.options.content_key) {
            Ok(()) => self.announce(&self.options.content_key),
            Err(e) => warn!(error = %e, "failed to erase persisted draft"),
        }
        self.refresh_modified();
        info!("content reset to defaults");
    }

    /// Persist the working copy and signal other instances.
    ///
    /// On failure the working copy, snapshot and modified flag are unchanged.
    pub fn try_save(&mut self) -> StoreResult<()> {
        self.persist_content()?;

        let stamp = self.next_refresh_stamp();
        self.storage
            .set(&self.options.refresh_key, &stamp.to_string())?;
        self.last_refresh = stamp;
        self.announce(&self.options.refresh_key);

        self.saved = self.content.clone();
        self.modified = false;
        info!(pages = self.content.pages.len(), "content saved");
        Ok(())
    }

    /// [`ContentStore::try_save`] reporting failure as `false`.
    pub fn save(&mut self) -> bool {
        match self.try_save() {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "failed to save content");
                false
            }
        }
    }

    pub fn export_json(&self, target: &Target) -> StoreResult<String> {
        Ok(export_document(&self.content, target)?)
    }

    /// Import `json` into the working copy. Nothing is persisted until save.
    pub fn try_import_json(&mut self, json: &str, target: &Target) -> Result<(), ImportError> {
        let next = import_document(&self.content, json, target)?;
        self.set_content(next);
        info!(target = %target, "content imported");
        Ok(())
    }

    /// [`ContentStore::try_import_json`] reporting failure as `false`.
    pub fn import_json(&mut self, json: &str, target: &Target) -> bool {
        match self.try_import_json(json, target) {
            Ok(()) => true,
            Err(e) => {
                warn!(target = %target, error = %e, "import failed");
                false
            }
        }
    }

    /// Apply one notification. Returns `true` when the store adopted new content.
    pub fn apply_sync(&mut self, event: &SyncEvent) -> bool {
        if self.options.sync_policy == SyncPolicy::Ignore || event.origin == self.origin {
            return false;
        }
        if event.key != self.options.content_key && event.key != self.options.refresh_key {
            return false;
        }
        self.resync()
    }

    /// Drain pending notifications without blocking. Returns how many caused
    /// the store to adopt new content.
    pub fn poll_sync(&mut self) -> usize {
        let mut adopted = 0;
        loop {
            match self.sync_rx.try_recv() {
                Ok(event) => {
                    if self.apply_sync(&event) {
                        adopted += 1;
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "sync notifications lagged, re-reading storage");
                    if self.options.sync_policy == SyncPolicy::Adopt && self.resync() {
                        adopted += 1;
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return adopted,
            }
        }
    }

    /// Wait for the next notification and apply it. Returns `None` once the
    /// bus is closed.
    pub async fn next_sync(&mut self) -> Option<bool> {
        loop {
            match self.sync_rx.recv().await {
                Ok(event) => return Some(self.apply_sync(&event)),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Unified diff from the saved snapshot to the working copy.
    pub fn pending_diff(&self) -> StoreResult<String> {
        let saved = serde_json::to_string_pretty(&self.saved)?;
        let current = serde_json::to_string_pretty(&self.content)?;
        Ok(TextDiff::from_lines(&saved, &current)
            .unified_diff()
            .context_radius(2)
            .header("saved", "working")
            .to_string())
    }

    /// Invariant violations in the working copy.
    pub fn issues(&self) -> Vec<DocumentIssue> {
        validate_document(&self.content)
    }

    fn resync(&mut self) -> bool {
        match self.storage.get(&self.options.content_key) {
            Ok(None) => {
                debug!("persisted draft removed, reverting to defaults");
                self.adopt(SiteContent::default());
                true
            }
            Ok(Some(raw)) => match SiteContent::from_json_str(&raw) {
                Ok(doc) => {
                    self.adopt(doc);
                    true
                }
                Err(e) => {
                    error!(error = %e, "failed to parse synced content");
                    false
                }
            },
            Err(e) => {
                error!(error = %e, "failed to read synced content");
                false
            }
        }
    }

    /// Take `doc` as both working copy and saved snapshot.
    fn adopt(&mut self, doc: SiteContent) {
        self.saved = doc.clone();
        self.content = doc;
        self.refresh_modified();
    }

    fn persist_content(&self) -> StoreResult<()> {
        let raw = serde_json::to_string(&self.content)?;
        self.storage.set(&self.options.content_key, &raw)?;
        self.announce(&self.options.content_key);
        Ok(())
    }

    fn announce(&self, key: &str) {
        if let Err(e) = self.bus.publish(SyncEvent::new(key, self.origin)) {
            debug!(key = %e.0.key, "no sync subscribers");
        }
    }

    /// Epoch millis, strictly increasing per store.
    fn next_refresh_stamp(&self) -> i64 {
        Utc::now().timestamp_millis().max(self.last_refresh + 1)
    }

    fn refresh_modified(&mut self) {
        self.modified = self.content != self.saved;
    }
}
