//! In-process key/value store backed by a `HashMap`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use fleetdash_domain::error::FleetDashError;

use crate::ports::KeyValueStore;

/// Volatile [`KeyValueStore`]; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, FleetDashError>> + Send {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let result = entries.get(key).cloned();
        async move { Ok(result) }
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), FleetDashError>> + Send {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        async { Ok(()) }
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), FleetDashError>> + Send {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_return_none_for_missing_key() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("authToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn should_overwrite_existing_value() {
        let store = InMemoryStore::new();
        store.set("k", "one").await.unwrap();
        store.set("k", "two").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn should_ignore_removal_of_missing_key() {
        let store = InMemoryStore::new();
        store.remove("nope").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn should_remove_key() {
        let store = InMemoryStore::new();
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
