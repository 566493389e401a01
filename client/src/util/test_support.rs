//! In-memory stand-ins for the browser capabilities.

use std::cell::RefCell;
use std::collections::HashMap;

use super::navigation::NavigationForcer;
use super::storage::{KeyValueStore, StorageError};

/// Process-local map backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage seeded with a single entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        storage
    }

    /// Storage that rejects every write, modelling a full or locked backend.
    pub fn read_only() -> Self {
        Self { entries: RefCell::default(), read_only: true }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::WriteFailed("read-only storage".to_owned()));
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Records forced navigations instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingForcer {
    visits: RefCell<Vec<String>>,
}

impl RecordingForcer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl NavigationForcer for RecordingForcer {
    fn force(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_owned());
    }
}
