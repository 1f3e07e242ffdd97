//! Store errors

use crate::key::StoreKey;
use std::path::PathBuf;

/// Persistence failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend I/O failed
    #[error("i/o error on {key}: {source}")]
    Io {
        /// Key being read or written
        key: StoreKey,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Store location could not be prepared
    #[error("cannot open store at {}: {source}", .path.display())]
    Open {
        /// Store location
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Backend refused the write (quota, read-only, etc.)
    #[error("store rejected {key}: {reason}")]
    Rejected {
        /// Key being written
        key: StoreKey,
        /// Backend explanation
        reason: String,
    },
}

impl StoreError {
    /// Key the failure concerns, if it concerns one
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<StoreKey> {
        match self {
            Self::Io { key, .. } | Self::Rejected { key, .. } => Some(*key),
            Self::Open { .. } => None,
        }
    }

    /// Wrap an I/O error
    #[inline]
    #[must_use]
    pub fn io(key: StoreKey, source: std::io::Error) -> Self {
        Self::Io { key, source }
    }
}
