//! Resource storage abstraction.
//!
//! Handlers only see [`ResourceStore`]; the in-memory implementation keeps its
//! map behind a `RwLock` so concurrent requests never race on it.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("already exists")]
    Conflict,

    /// The backing store cannot serve requests (e.g. a poisoned lock).
    #[error("store unavailable")]
    Unavailable,
}

/// Key/value store for resources addressed by a string key.
pub trait ResourceStore<V>: Send + Sync {
    fn get(&self, key: &str) -> Result<V, StoreError>;
    fn list(&self) -> Result<Vec<V>, StoreError>;
    /// Insert a new record; fails with `Conflict` if the key is taken.
    fn insert(&self, key: String, value: V) -> Result<(), StoreError>;
    /// Replace an existing record, returning the previous value.
    fn replace(&self, key: &str, value: V) -> Result<V, StoreError>;
    fn remove(&self, key: &str) -> Result<V, StoreError>;
}

impl<V, S> ResourceStore<V> for Arc<S>
where
    S: ResourceStore<V> + ?Sized,
{
    fn get(&self, key: &str) -> Result<V, StoreError> {
        (**self).get(key)
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        (**self).list()
    }

    fn insert(&self, key: String, value: V) -> Result<(), StoreError> {
        (**self).insert(key, value)
    }

    fn replace(&self, key: &str, value: V) -> Result<V, StoreError> {
        (**self).replace(key, value)
    }

    fn remove(&self, key: &str) -> Result<V, StoreError> {
        (**self).remove(key)
    }
}

/// In-memory store for tests/dev. Lists in key order.
#[derive(Debug)]
pub struct InMemoryStore<V> {
    inner: RwLock<BTreeMap<String, V>>,
}

impl<V> InMemoryStore<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn seeded(records: impl IntoIterator<Item = (String, V)>) -> Self {
        Self {
            inner: RwLock::new(records.into_iter().collect()),
        }
    }
}

impl<V> Default for InMemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ResourceStore<V> for InMemoryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &str) -> Result<V, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Unavailable)?;
        map.get(key).cloned().ok_or(StoreError::NotFound)
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Unavailable)?;
        Ok(map.values().cloned().collect())
    }

    fn insert(&self, key: String, value: V) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        if map.contains_key(&key) {
            return Err(StoreError::Conflict);
        }
        map.insert(key, value);
        Ok(())
    }

    fn replace(&self, key: &str, value: V) -> Result<V, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        let slot = map.get_mut(key).ok_or(StoreError::NotFound)?;
        Ok(std::mem::replace(slot, value))
    }

    fn remove(&self, key: &str) -> Result<V, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        map.remove(key).ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_list_in_key_order() {
        let store = InMemoryStore::new();
        store.insert("2".into(), "b").unwrap();
        store.insert("1".into(), "a").unwrap();

        assert_eq!(store.get("1"), Ok("a"));
        assert_eq!(store.list(), Ok(vec!["a", "b"]));
    }

    #[test]
    fn duplicate_insert_conflicts() {
        let store = InMemoryStore::seeded([("1".to_string(), 1)]);
        assert_eq!(store.insert("1".into(), 2), Err(StoreError::Conflict));
        assert_eq!(store.get("1"), Ok(1));
    }

    #[test]
    fn replace_and_remove_require_existing_key() {
        let store = InMemoryStore::seeded([("1".to_string(), 1)]);

        assert_eq!(store.replace("9", 5), Err(StoreError::NotFound));
        assert_eq!(store.replace("1", 5), Ok(1));
        assert_eq!(store.get("1"), Ok(5));

        assert_eq!(store.remove("1"), Ok(5));
        assert_eq!(store.remove("1"), Err(StoreError::NotFound));
        assert_eq!(store.get("1"), Err(StoreError::NotFound));
    }

    #[test]
    fn works_through_shared_trait_object() {
        let store: Arc<dyn ResourceStore<u32>> = Arc::new(InMemoryStore::new());
        store.insert("k".into(), 3).unwrap();
        assert_eq!(store.get("k"), Ok(3));
    }
}
