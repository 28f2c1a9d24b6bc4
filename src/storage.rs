//! Durable key-value storage for tracker state.
//!
//! The tracker persists three named slots: the task collection as a JSON
//! array, and the streak and monthly goal as stringified integers. Storage
//! is reached only through the `KeyValueStore` trait so the core can run
//! over a directory of files or over an in-memory map in tests.

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::PersistenceError;

/// Slot holding the JSON array of tasks.
pub const TASKS_SLOT: &str = "studentTasks";
/// Slot holding the completion streak.
pub const STREAK_SLOT: &str = "currentStreak";
/// Slot holding the monthly completion goal.
pub const GOAL_SLOT: &str = "monthlyGoal";

/// String-keyed, string-valued durable storage.
///
/// Each `set` replaces the whole slot value in one write.
pub trait KeyValueStore {
    fn get(&self, slot: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, slot: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&self, slot: &str) -> Result<(), PersistenceError>;
}

/// Stores each slot as `<slot>.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| PersistenceError::Io {
            slot: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a slot.
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Io {
                slot: slot.to_string(),
                source,
            }),
        }
    }

    /// Atomic write via temp file + rename.
    fn set(&self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.slot_path(slot);
        let tmp = path.with_extension("json.tmp");
        let write = || -> io::Result<()> {
            let mut f = File::create(&tmp)?;
            f.write_all(value.as_bytes())?;
            f.sync_all()?;
            fs::rename(&tmp, &path)
        };
        write().map_err(|source| {
            let _ = fs::remove_file(&tmp);
            PersistenceError::Io {
                slot: slot.to_string(),
                source,
            }
        })
    }

    fn remove(&self, slot: &str) -> Result<(), PersistenceError> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Io {
                slot: slot.to_string(),
                source,
            }),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    slots: HashMap<String, String>,
    fail_writes: bool,
    rejected: HashSet<String>,
    writes: usize,
}

/// In-memory store. Clones share the same slots, so a test can keep a handle
/// to inspect what a `Store` wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        // A panic while holding the lock leaves plain data behind; keep going.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every subsequent `set` and `remove` fail with `Rejected`.
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Make `set` and `remove` fail for one slot only.
    pub fn reject_slot(&self, slot: &str) {
        self.lock().rejected.insert(slot.to_string());
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Raw slot contents, bypassing the trait.
    pub fn raw(&self, slot: &str) -> Option<String> {
        self.lock().slots.get(slot).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.lock().slots.get(slot).cloned())
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        let mut inner = self.lock();
        if inner.fail_writes || inner.rejected.contains(slot) {
            return Err(PersistenceError::Rejected(slot.to_string()));
        }
        inner.slots.insert(slot.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), PersistenceError> {
        let mut inner = self.lock();
        if inner.fail_writes || inner.rejected.contains(slot) {
            return Err(PersistenceError::Rejected(slot.to_string()));
        }
        inner.slots.remove(slot);
        inner.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip_and_missing_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("data")).unwrap();
        assert_eq!(store.get(TASKS_SLOT).unwrap(), None);

        store.set(STREAK_SLOT, "3").unwrap();
        assert_eq!(store.get(STREAK_SLOT).unwrap().as_deref(), Some("3"));
        assert!(store.slot_path(STREAK_SLOT).exists());
        assert!(!store.slot_path(STREAK_SLOT).with_extension("json.tmp").exists());

        store.set(STREAK_SLOT, "4").unwrap();
        assert_eq!(store.get(STREAK_SLOT).unwrap().as_deref(), Some("4"));
    }

    #[test]
    fn test_file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set(GOAL_SLOT, "12").unwrap();
        store.remove(GOAL_SLOT).unwrap();
        store.remove(GOAL_SLOT).unwrap();
        assert_eq!(store.get(GOAL_SLOT).unwrap(), None);
    }

    #[test]
    fn test_failed_file_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        // A directory in the slot's place makes the final rename fail.
        fs::create_dir(store.slot_path(TASKS_SLOT)).unwrap();
        std::fs::write(store.slot_path(TASKS_SLOT).join("keep"), "x").unwrap();

        assert!(store.set(TASKS_SLOT, "[]").is_err());
        assert!(!store.slot_path(TASKS_SLOT).with_extension("json.tmp").exists());
    }

    #[test]
    fn test_memory_store_rejects_single_slot() {
        let store = MemoryStore::new();
        store.reject_slot(STREAK_SLOT);
        assert!(store.set(STREAK_SLOT, "1").is_err());
        assert!(store.remove(STREAK_SLOT).is_err());
        store.set(TASKS_SLOT, "[]").unwrap();
        assert_eq!(store.raw(TASKS_SLOT).as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_store_shares_state_and_rejects_writes() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set(TASKS_SLOT, "[]").unwrap();
        assert_eq!(handle.raw(TASKS_SLOT).as_deref(), Some("[]"));
        assert_eq!(handle.write_count(), 1);

        handle.fail_writes(true);
        let err = store.set(TASKS_SLOT, "[1]").unwrap_err();
        assert!(matches!(err, PersistenceError::Rejected(ref s) if s == TASKS_SLOT));
        assert_eq!(store.get(TASKS_SLOT).unwrap().as_deref(), Some("[]"));
    }
}
