use std::path::PathBuf;

use thiserror::Error;

/// Storage failure. Callers decide whether it is fatal; the cart never treats it so.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing would exceed the store's byte quota.
    #[error("storage quota exceeded writing '{key}' ({needed} bytes needed, {quota} allowed)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// The key cannot be mapped onto the backing store.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Filesystem failure.
    #[error("storage I/O failed at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The value could not be serialized for storage.
    #[error("failed to encode value for '{key}': {reason}")]
    Encode { key: String, reason: String },

    /// Internal lock poisoning.
    #[error("storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
