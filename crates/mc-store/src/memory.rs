//! In-memory store

use crate::error::StoreError;
use crate::key::StoreKey;
use crate::PersistentStore;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Map-backed store
///
/// Nothing survives the process; useful for tests and for inspecting exactly
/// what a repository wrote.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<StoreKey, Vec<u8>>>,
    backups: RwLock<HashMap<StoreKey, Vec<u8>>>,
    writes: RwLock<usize>,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store pre-populated with blobs
    #[must_use]
    pub fn with_entries<I, B>(entries: I) -> Self
    where
        I: IntoIterator<Item = (StoreKey, B)>,
        B: Into<Vec<u8>>,
    {
        let map = entries.into_iter().map(|(k, v)| (k, v.into())).collect();
        Self {
            entries: RwLock::new(map),
            ..Self::default()
        }
    }

    /// Current blob as UTF-8 text, if any
    #[must_use]
    pub fn text(&self, key: StoreKey) -> Option<String> {
        self.entries
            .read()
            .get(&key)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Blob set aside for `key`, as UTF-8 text
    #[must_use]
    pub fn backup_text(&self, key: StoreKey) -> Option<String> {
        self.backups
            .read()
            .get(&key)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Number of successful saves so far
    #[inline]
    #[must_use]
    pub fn write_count(&self) -> usize {
        *self.writes.read()
    }
}

impl PersistentStore for MemoryStore {
    fn load(&self, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(&key).cloned())
    }

    fn save(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError> {
        self.entries.write().insert(key, bytes.to_vec());
        *self.writes.write() += 1;
        Ok(())
    }

    fn back_up(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError> {
        self.backups.write().insert(key, bytes.to_vec());
        Ok(())
    }
}
