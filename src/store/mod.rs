//! The canonical notification collection.
//!
//! A whole-document store: every operation reads the full persisted list,
//! transforms it, and writes it back. `load` never fails to the caller: a
//! missing or corrupt document degrades to an empty list (logged, not
//! surfaced), so callers must treat "empty" as ambiguous.

pub mod backend;

use std::sync::Arc;

use tracing::warn;

use crate::errors::Result;
use crate::models::NotificationRecord;
use backend::StorageBackend;

/// Storage key for the notification collection.
pub const NOTIFICATIONS_KEY: &str = "notifications";

/// Ordered (newest-first) collection of [`NotificationRecord`]s over a keyed
/// storage backend. Cheap to clone and share across views.
#[derive(Clone)]
pub struct NotificationStore {
    backend: Arc<dyn StorageBackend>,
}

impl NotificationStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Read the persisted collection. Absent, unreadable, or corrupt data all
    /// degrade to an empty list; corruption is logged and never propagated.
    pub fn load(&self) -> Vec<NotificationRecord> {
        let raw = match self.backend.get(NOTIFICATIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "notification store read failed, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "corrupt notification store, treating as empty");
                Vec::new()
            }
        }
    }

    /// Prepend `record` (newest-first) and write the collection back.
    /// Last-writer-wins: concurrent writers can silently drop each other's
    /// additions.
    pub fn append(&self, record: NotificationRecord) -> Result<()> {
        let mut records = self.load();
        records.insert(0, record);
        self.write(&records)
    }

    /// Mark every record with `id` as read. No-op for absent ids; calling it
    /// again on an already-read record changes nothing.
    pub fn mark_read(&self, id: i64) -> Result<()> {
        let mut records = self.load();
        for record in records.iter_mut().filter(|r| r.id == id) {
            record.read = true;
        }
        self.write(&records)
    }

    /// Drop every record with `id`. No-op for absent ids.
    pub fn remove(&self, id: i64) -> Result<()> {
        let mut records = self.load();
        records.retain(|r| r.id != id);
        self.write(&records)
    }

    /// Delete the entire persisted collection.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(NOTIFICATIONS_KEY)?;
        Ok(())
    }

    /// Replace the whole collection. Used by the reminder merge path; not
    /// part of the public store surface.
    pub(crate) fn replace_all(&self, records: Vec<NotificationRecord>) -> Result<()> {
        self.write(&records)
    }

    fn write(&self, records: &[NotificationRecord]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(NOTIFICATIONS_KEY, &raw)?;
        Ok(())
    }
}
