use std::collections::HashMap;

use parking_lot::RwLock;

use super::{KeyValueStore, StorageError};

/// In-process storage, optionally limited to a total number of stored bytes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that refuses writes once keys and values together would exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RwLock::default(),
            quota: Some(bytes),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write();

        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len().saturating_add(v.len()))
                .sum();
            let needed = others
                .saturating_add(key.len())
                .saturating_add(value.len());

            if needed > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }

        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();

        assert_eq!(store.get("members").unwrap(), None);

        store.set("members", "[]").unwrap();
        assert_eq!(store.get("members").unwrap().as_deref(), Some("[]"));

        store.remove("members").unwrap();
        assert_eq!(store.get("members").unwrap(), None);

        // Removing again is fine
        store.remove("members").unwrap();
    }

    #[test]
    fn test_quota() {
        let store = MemoryStore::with_quota(12);

        store.set("key", "123456789").unwrap();

        assert!(matches!(
            store.set("key", "1234567890"),
            Err(StorageError::QuotaExceeded)
        ));
        // The rejected write left the previous value in place
        assert_eq!(store.get("key").unwrap().as_deref(), Some("123456789"));

        // Replacing a value only counts the new size
        store.set("key", "abc").unwrap();
    }
}
