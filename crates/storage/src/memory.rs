use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StorageError;
use crate::store::KeyValueStore;

/// In-memory store for tests/dev.
///
/// An optional byte quota (key + value lengths, summed over all entries)
/// mimics the size limit of browser local storage.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose total size may not exceed `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Seed a value without quota checks.
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// Bytes currently used (key + value lengths).
    pub fn used_bytes(&self) -> usize {
        self.inner
            .read()
            .map(|map| map.iter().map(|(k, v)| k.len() + v.len()).sum())
            .unwrap_or(0)
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.inner.read().map_err(|_| StorageError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.inner.write().map_err(|_| StorageError::Poisoned)?;

        if let Some(quota) = self.quota {
            let others: usize = map
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.inner.write().map_err(|_| StorageError::Poisoned)?;
        map.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_missing_key() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn set_overwrites_and_remove_deletes() {
        let store = InMemoryStore::new();
        store.set("cart", "[]").unwrap();
        store.set("cart", "[1]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[1]"));

        store.remove("cart").unwrap();
        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn quota_rejects_oversized_writes_and_keeps_old_value() {
        let store = InMemoryStore::with_quota(10);
        store.set("cart", "[]").unwrap();

        let err = store.set("cart", "[1,2,3,4,5]").unwrap_err();
        match err {
            StorageError::QuotaExceeded { key, needed, quota } => {
                assert_eq!(key, "cart");
                assert_eq!(needed, 15);
                assert_eq!(quota, 10);
            }
            other => panic!("Expected QuotaExceeded, got {other:?}"),
        }
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.used_bytes(), 6);
    }

    #[test]
    fn quota_counts_replaced_value_once() {
        let store = InMemoryStore::with_quota(8);
        store.set("k", "1234567").unwrap();
        store.set("k", "abcdefg").unwrap();
        assert_eq!(store.used_bytes(), 8);
    }
}
