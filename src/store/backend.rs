//! Process-wide keyed storage backends.
//!
//! Mirrors the browser-profile local storage the frontend used: string keys
//! to string documents, persisted per profile directory. There is no locking
//! and no compare-and-swap; concurrent writers race and the last write wins.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Keyed string storage. `get` of an absent key is `Ok(None)`, `remove` of an
/// absent key is a no-op.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// In-memory backend for tests and single-process demos.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// File-per-key backend under a profile directory (`<dir>/<key>.json`).
///
/// Writes are plain whole-file writes: two processes writing the same key in
/// the same instant race, and the second write silently wins. That matches
/// the storage layer this replaces and is covered by the change watcher, not
/// prevented here.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::write(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_get_set_remove() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("notifications").unwrap(), None);

        backend.set("notifications", "[]").unwrap();
        assert_eq!(backend.get("notifications").unwrap().as_deref(), Some("[]"));

        backend.remove("notifications").unwrap();
        assert_eq!(backend.get("notifications").unwrap(), None);
        // removing again is a no-op
        backend.remove("notifications").unwrap();
    }

    #[test]
    fn test_file_backend_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(tmp.path().join("profile")).unwrap();

        assert_eq!(backend.get("notifications").unwrap(), None);
        backend.set("notifications", r#"[{"id":1}]"#).unwrap();
        assert_eq!(
            backend.get("notifications").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );

        backend.remove("notifications").unwrap();
        assert_eq!(backend.get("notifications").unwrap(), None);
        backend.remove("notifications").unwrap();
    }

    #[test]
    fn test_file_backend_last_writer_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let a = FileBackend::open(tmp.path()).unwrap();
        let b = FileBackend::open(tmp.path()).unwrap();

        a.set("notifications", "first").unwrap();
        b.set("notifications", "second").unwrap();
        assert_eq!(a.get("notifications").unwrap().as_deref(), Some("second"));
    }
}
