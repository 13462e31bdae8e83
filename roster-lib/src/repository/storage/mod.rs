//! The external key-value storage the member list is persisted to.
//!
//! Storage is treated as an opaque string-keyed map whose operations may fail, e.g. when
//! it is disabled or over quota. Each [`KeyValueStore::set`] either stores the whole value
//! or leaves the previous one in place.

use std::{
    fmt::Debug,
    io::{self, ErrorKind},
};

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage quota exceeded")]
    QuotaExceeded,
    #[error("Storage is unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            ErrorKind::StorageFull | ErrorKind::QuotaExceeded => StorageError::QuotaExceeded,
            _ => StorageError::Io(err),
        }
    }
}

pub trait KeyValueStore: Debug + Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// A store whose every operation fails, like browser storage that has been disabled.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct DisabledStore;

#[cfg(test)]
impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage is disabled".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is disabled".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is disabled".into()))
    }
}

/// A store that serves what it was created with and refuses every change.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ReadOnlyStore {
    inner: MemoryStore,
}

#[cfg(test)]
impl ReadOnlyStore {
    pub(crate) fn holding(key: &str, value: &str) -> Self {
        let inner = MemoryStore::new();
        inner.set(key, value).unwrap();
        Self { inner }
    }
}

#[cfg(test)]
impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is read-only".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is read-only".into()))
    }
}
