//! Cross-process change channel (the "storage event" analog).
//!
//! Watches the file backend's storage directory and forwards create/modify/
//! remove events for `<key>.json` files into the local broadcast channel.
//! Unlike browser storage events this also fires in the process that wrote,
//! so writers get a redundant wake-up on top of their own self-signal;
//! consumers re-read the store on every signal, which makes that harmless.

use std::path::Path;

use notify::{recommended_watcher, Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::broadcast::Sender;
use tracing::warn;

use super::StoreChange;

/// Keeps the filesystem watcher alive; dropping it stops the channel.
pub struct StorageWatcher {
    _watcher: notify::RecommendedWatcher,
}

impl StorageWatcher {
    /// Watch `dir` (non-recursively) and forward change events into `tx`.
    /// The directory must already exist; `FileBackend::open` guarantees that.
    pub fn spawn(dir: &Path, tx: Sender<StoreChange>) -> anyhow::Result<Self> {
        let mut watcher = recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if !matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    return;
                }
                for path in &event.paths {
                    if path.extension().and_then(|e| e.to_str()) != Some("json") {
                        continue;
                    }
                    if let Some(key) = path.file_stem().and_then(|s| s.to_str()) {
                        // Send failure just means no subscriber is mounted.
                        let _ = tx.send(StoreChange {
                            key: key.to_string(),
                        });
                    }
                }
            }
            Err(e) => warn!(error = %e, "storage watcher error"),
        })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(Self { _watcher: watcher })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::broadcast;

    #[tokio::test]
    async fn test_watcher_reports_foreign_writes() {
        let tmp = tempfile::tempdir().unwrap();
        let (tx, mut rx) = broadcast::channel(16);
        let _watcher = StorageWatcher::spawn(tmp.path(), tx).unwrap();

        // Simulate another process writing the notifications document.
        std::fs::write(tmp.path().join("notifications.json"), "[]").unwrap();

        let change = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let change: StoreChange = rx.recv().await.unwrap();
                if change.key == "notifications" {
                    return change;
                }
            }
        })
        .await
        .expect("no storage change observed");
        assert_eq!(change.key, "notifications");
    }

    #[tokio::test]
    async fn test_non_json_files_are_ignored_sends() {
        let tmp = tempfile::tempdir().unwrap();
        let (tx, mut rx) = broadcast::channel(16);
        let _watcher = StorageWatcher::spawn(tmp.path(), tx).unwrap();

        std::fs::write(tmp.path().join("scratch.tmp"), "x").unwrap();

        let got = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
        assert!(got.is_err(), "unexpected change for non-json file");
    }
}
