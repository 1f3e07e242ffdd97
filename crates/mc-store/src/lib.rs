//! MediCare Persistent Store
//!
//! Opaque key/value storage for the record collections and the theme flag.
//!
//! # Overview
//!
//! - **PersistentStore**: the `load`/`save`/`back_up` contract the repository writes
//!   through after every mutation
//! - **MemoryStore**: map-backed store for tests and throwaway sessions
//! - **DirStore**: one JSON file per key under a directory
//! - **Theme**: the two-valued display flag kept next to the collections
//!
//! # Example
//!
//! ```rust
//! use mc_store::{MemoryStore, PersistentStore, StoreKey};
//!
//! let store = MemoryStore::new();
//! store.save(StoreKey::Patients, b"[]").unwrap();
//! assert_eq!(store.load(StoreKey::Patients).unwrap().as_deref(), Some(&b"[]"[..]));
//! assert!(store.load(StoreKey::Doctors).unwrap().is_none());
//! ```

#![warn(missing_docs)]

pub mod dir;
pub mod error;
pub mod key;
pub mod memory;
pub mod theme;

use std::sync::Arc;

// Re-exports
pub use dir::DirStore;
pub use error::StoreError;
pub use key::StoreKey;
pub use memory::MemoryStore;
pub use theme::Theme;

/// Key/value byte store
///
/// Implementations synchronise internally so a store can be shared behind
/// `&` or [`Arc`].
pub trait PersistentStore {
    /// Read the blob stored under `key`
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend cannot be read; absence is `Ok(None)`
    fn load(&self, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the blob stored under `key`
    ///
    /// # Errors
    /// Returns [`StoreError`] if the write does not complete
    fn save(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError>;

    /// Keep a copy of an unreadable blob where later saves to `key` cannot
    /// overwrite it
    ///
    /// # Errors
    /// Returns [`StoreError`] if the copy cannot be written
    fn back_up(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError>;
}

impl<S: PersistentStore + ?Sized> PersistentStore for &S {
    fn load(&self, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).save(key, bytes)
    }

    fn back_up(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).back_up(key, bytes)
    }
}

impl<S: PersistentStore + ?Sized> PersistentStore for Arc<S> {
    fn load(&self, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).save(key, bytes)
    }

    fn back_up(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).back_up(key, bytes)
    }
}

impl<S: PersistentStore + ?Sized> PersistentStore for Box<S> {
    fn load(&self, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).save(key, bytes)
    }

    fn back_up(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).back_up(key, bytes)
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
