//! Directory-backed store
//!
//! Each key lives in `<dir>/<key>.json`. Writes go to a sibling temp file
//! first and are renamed into place, so a concurrent reader sees either the
//! old blob or the new one. Blobs set aside with
//! [`PersistentStore::back_up`] land in `<dir>/<key>.corrupt`.

use crate::error::StoreError;
use crate::key::StoreKey;
use crate::PersistentStore;
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File-per-key store under one directory
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl DirStore {
    /// Open (creating if needed) a store rooted at `root`
    ///
    /// # Errors
    /// Returns [`StoreError::Open`] if the directory cannot be created
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Open {
            path: root.clone(),
            source,
        })?;
        tracing::debug!("Opened store at {}", root.display());
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Directory holding the blobs
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for a key
    #[must_use]
    pub fn path_for(&self, key: StoreKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }

    /// File path an unreadable blob is moved aside to
    #[must_use]
    pub fn backup_path_for(&self, key: StoreKey) -> PathBuf {
        self.root.join(format!("{}.corrupt", key.as_str()))
    }

    fn write_atomic(target: &Path, bytes: &[u8]) -> io::Result<()> {
        let tmp = target.with_extension("tmp");
        let written = fs::File::create(&tmp)
            .and_then(|mut file| {
                file.write_all(bytes)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp, target));
        if written.is_err() {
            // original error wins over a failed cleanup
            let _ = fs::remove_file(&tmp);
        }
        written
    }
}

impl PersistentStore for DirStore {
    fn load(&self, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    fn save(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        Self::write_atomic(&self.path_for(key), bytes).map_err(|e| StoreError::io(key, e))
    }

    fn back_up(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        Self::write_atomic(&self.backup_path_for(key), bytes).map_err(|e| StoreError::io(key, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        assert!(store.load(StoreKey::Appointments).unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        store.save(StoreKey::Patients, br#"[{"id":"p_1"}]"#).unwrap();

        assert_eq!(
            store.load(StoreKey::Patients).unwrap().as_deref(),
            Some(&br#"[{"id":"p_1"}]"#[..])
        );
        assert!(dir.path().join("mc_patients.json").exists());
        assert!(!dir.path().join("mc_patients.tmp").exists());
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        // a non-empty directory in the way makes the rename fail
        let target = store.path_for(StoreKey::Doctors);
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();

        let err = store.save(StoreKey::Doctors, b"[]").unwrap_err();
        assert_eq!(err.key(), Some(StoreKey::Doctors));
        assert!(!dir.path().join("mc_doctors.tmp").exists());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn back_up_writes_beside_the_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        store.save(StoreKey::Patients, b"{broken").unwrap();
        store.back_up(StoreKey::Patients, b"{broken").unwrap();
        store.save(StoreKey::Patients, b"[]").unwrap();

        let backup = fs::read(dir.path().join("mc_patients.corrupt")).unwrap();
        assert_eq!(backup, b"{broken");
        assert_eq!(store.load(StoreKey::Patients).unwrap().as_deref(), Some(&b"[]"[..]));
    }

    #[test]
    fn open_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = DirStore::open(&nested).unwrap();
        assert_eq!(store.root(), nested.as_path());
        assert!(nested.is_dir());
    }
}
