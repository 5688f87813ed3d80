use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification that a durable storage key was written or removed by another
/// store instance (another tab or window).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncEvent {
    pub key: String,
    /// Id of the store that performed the write.
    pub origin: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl SyncEvent {
    pub fn new(key: impl Into<String>, origin: Uuid) -> Self {
        Self {
            key: key.into(),
            origin,
            timestamp: Utc::now(),
        }
    }
}

/// How a store reacts to [`SyncEvent`]s from other instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPolicy {
    /// Re-read durable storage and adopt its content (public readers).
    Adopt,
    /// Ignore notifications so in-progress edits are never clobbered (editor).
    Ignore,
}
