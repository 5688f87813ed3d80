use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::SyncEvent;

/// Cross-instance change notifications backed by `tokio::broadcast`.
///
/// Fire-and-forget: at most once per write, no acknowledgement, no locking.
/// A slow subscriber that lags behind only loses notifications, never data,
/// since subscribers re-read storage on every event.
#[derive(Debug, Clone)]
pub struct SyncBus {
    sender: Arc<broadcast::Sender<SyncEvent>>,
}

impl SyncBus {
    /// Create a new bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: SyncEvent) -> Result<usize, broadcast::error::SendError<SyncEvent>> {
        self.sender.send(event)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = SyncBus::new(16);
        let mut rx = bus.subscribe();
        let origin = Uuid::new_v4();

        bus.publish(SyncEvent::new("site-content-data", origin)).unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.key, "site-content-data");
        assert_eq!(event.origin, origin);
    }

    #[tokio::test]
    async fn every_subscriber_sees_each_write() {
        let bus = SyncBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(SyncEvent::new("site-content-refresh", Uuid::new_v4()))
            .unwrap();

        assert_eq!(rx1.recv().await.unwrap().key, "site-content-refresh");
        assert_eq!(rx2.recv().await.unwrap().key, "site-content-refresh");
    }

    #[test]
    fn publish_without_subscribers_fails() {
        let bus = SyncBus::default();
        assert!(bus.publish(SyncEvent::new("k", Uuid::new_v4())).is_err());
    }
}
