//! In-process change channel (the "same-tab custom event" analog).

use tokio::sync::broadcast::{self, Receiver, Sender};

use super::{ChangeNotifier, StoreChange};

/// Broadcast channel capacity. Bursts larger than this lag the slowest
/// subscriber, which then skips to the newest changes. That is acceptable:
/// consumers re-read the whole store on every signal anyway.
const CHANNEL_CAPACITY: usize = 64;

/// Observer list over a tokio broadcast channel. All subscribers receive
/// every change published after they subscribed.
pub struct LocalNotifier {
    tx: Sender<StoreChange>,
}

impl LocalNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Clone of the underlying sender, for feeding changes in from another
    /// backend (the storage watcher).
    pub fn sender(&self) -> Sender<StoreChange> {
        self.tx.clone()
    }
}

impl Default for LocalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier for LocalNotifier {
    fn publish(&self, change: StoreChange) {
        // A send error only means there are no live subscribers right now.
        let _ = self.tx.send(change);
    }

    fn subscribe(&self) -> Receiver<StoreChange> {
        self.tx.subscribe()
    }
}
