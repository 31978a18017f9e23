//! Change fan-out for the shared notification storage.
//!
//! Two signal channels existed in the frontend this replaces: a same-tab
//! custom event and a cross-tab storage event. Here both sit behind one
//! [`ChangeNotifier`] trait: an in-process broadcast channel carries local
//! mutations, and an optional filesystem watcher forwards writes made by
//! other processes into the same channel. Consumers subscribe once and never
//! need to know which backend fired.

pub mod local;
pub mod watcher;

use tokio::sync::broadcast::Receiver;

pub use local::LocalNotifier;
pub use watcher::StorageWatcher;

/// A mutation of one key in the shared storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub key: String,
}

impl StoreChange {
    pub fn notifications() -> Self {
        Self {
            key: crate::store::NOTIFICATIONS_KEY.to_string(),
        }
    }
}

/// Publish/subscribe surface for storage changes.
pub trait ChangeNotifier: Send + Sync {
    /// Announce a local mutation. Writers call this themselves after every
    /// store write; the cross-process watcher is asynchronous and
    /// best-effort, so the in-process channel is what guarantees
    /// read-after-write for views in the same process.
    fn publish(&self, change: StoreChange);

    /// A fresh receiver observing every change published after this call.
    fn subscribe(&self) -> Receiver<StoreChange>;
}

/// The composed notifier: in-process channel plus, when storage lives on
/// disk, a watcher feeding foreign writes into that channel.
pub struct FanoutNotifier {
    local: LocalNotifier,
    _watcher: Option<StorageWatcher>,
}

impl FanoutNotifier {
    /// In-process only. Suits memory-backed storage, where no other process
    /// can write.
    pub fn in_process() -> Self {
        Self {
            local: LocalNotifier::new(),
            _watcher: None,
        }
    }

    /// In-process channel plus a filesystem watcher on `dir`, the file
    /// backend's storage directory.
    pub fn watching(dir: &std::path::Path) -> anyhow::Result<Self> {
        let local = LocalNotifier::new();
        let watcher = StorageWatcher::spawn(dir, local.sender())?;
        Ok(Self {
            local,
            _watcher: Some(watcher),
        })
    }
}

impl ChangeNotifier for FanoutNotifier {
    fn publish(&self, change: StoreChange) {
        self.local.publish(change);
    }

    fn subscribe(&self) -> Receiver<StoreChange> {
        self.local.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_process_fanout_delivers_to_all_subscribers() {
        let notifier = FanoutNotifier::in_process();
        let mut a = notifier.subscribe();
        let mut b = notifier.subscribe();

        notifier.publish(StoreChange::notifications());

        assert_eq!(a.recv().await.unwrap().key, "notifications");
        assert_eq!(b.recv().await.unwrap().key, "notifications");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_does_not_panic() {
        FanoutNotifier::in_process().publish(StoreChange::notifications());
    }
}
