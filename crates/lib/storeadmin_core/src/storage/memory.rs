//! In-memory key-value store.

use dashmap::DashMap;

use super::{KeyValueStore, StorageError};

/// In-memory store, shareable across guards behind `&` or `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Build a store pre-populated with `(key, value)` pairs.
    pub fn with_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let store = Self::new();
        for (key, value) in entries {
            store.entries.insert(key.into(), value.into());
        }
        store
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn get_returns_none_for_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("accessToken"), None);
    }

    #[test]
    fn set_then_get_and_remove() {
        let store = MemoryStore::new();
        store.set("isLoggedIn", "true").unwrap();
        assert_eq!(store.get("isLoggedIn").as_deref(), Some("true"));

        store.remove("isLoggedIn").unwrap();
        assert_eq!(store.get("isLoggedIn"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("userInfo").is_ok());
    }

    #[test]
    fn shared_handles_see_the_same_entries() {
        let store = Arc::new(MemoryStore::with_entries([("accessToken", "a.b.c")]));
        let other = Arc::clone(&store);
        other.set("isLoggedIn", "true").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(KeyValueStore::get(&store, "isLoggedIn").as_deref(), Some("true"));
    }
}
