//! Content store for a content-managed course ranking site.
//!
//! The site renders a single JSON content document ([`SiteContent`]). Public
//! pages read the published document; the editor keeps a draft in durable
//! storage, exports it as JSON for manual publishing, and imports JSON back
//! without losing previously uploaded images.

pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod mutation;
pub mod source;
pub mod storage;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use document::{Mode, ResolvedPage, ResolvedRoute, Route, SiteContent};
pub use error::{StoreError, StoreResult};
pub use events::{SyncBus, SyncEvent, SyncPolicy};
pub use mutation::{ContentPatch, CourseScope, ImportError, Target};
pub use source::{ContentSource, FileSource, HttpSource, InlineSource, SourceError};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{ContentStore, StoreOptions};
