//! Saved-prompt favorites.
//!
//! The set of saved prompt ids is stored as a JSON array of strings under
//! [`SAVED_PROMPTS_KEY`]. It is loaded when the store is opened and every
//! mutation overwrites the whole array. Nothing here returns an error:
//! missing, malformed or unavailable storage reads as an empty set, and a
//! failed write leaves the in-memory set as it was.

use crate::catalog::Catalog;
use crate::prompt::Prompt;

use super::kv::KeyValueStorage;

pub const SAVED_PROMPTS_KEY: &str = "drift_saved_prompts";

/// Persistent set of saved prompt ids, in the order they were saved.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    storage: S,
    ids: Vec<String>,
}

impl<S: KeyValueStorage> FavoritesStore<S> {
    /// Open the store, loading whatever set is currently persisted.
    pub fn open(storage: S) -> Self {
        let ids = read_ids(&storage);
        Self { storage, ids }
    }

    pub fn list(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|saved| saved == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Save `id`. Returns `true` if the set changed and was persisted.
    pub fn add(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        let mut next = self.ids.clone();
        next.push(id.to_string());
        self.persist(next)
    }

    /// Unsave `id`. Returns `true` if the set changed and was persisted.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        let next = self.ids.iter().filter(|saved| *saved != id).cloned().collect();
        self.persist(next)
    }

    /// Flip the saved state of `id`; returns whether it is saved afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.remove(id);
        } else {
            self.add(id);
        }
        self.contains(id)
    }

    /// Remove every saved id.
    pub fn clear(&mut self) -> bool {
        if self.ids.is_empty() {
            return false;
        }
        self.persist(Vec::new())
    }

    /// Re-read the persisted set, picking up writes made elsewhere.
    pub fn reload(&mut self) {
        self.ids = read_ids(&self.storage);
    }

    /// Saved prompts in catalog order. Ids missing from the catalog are skipped.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Prompt> {
        catalog.resolve(&self.ids)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self, next: Vec<String>) -> bool {
        if !self.storage.is_available() {
            tracing::debug!("favorites not persisted: storage unavailable");
            return false;
        }
        let json = match serde_json::to_string(&next) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize favorites");
                return false;
            }
        };
        match self.storage.set(SAVED_PROMPTS_KEY, &json) {
            Ok(()) => {
                self.ids = next;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist favorites");
                false
            }
        }
    }
}

fn read_ids<S: KeyValueStorage>(storage: &S) -> Vec<String> {
    if !storage.is_available() {
        return Vec::new();
    }
    let raw = match storage.get(SAVED_PROMPTS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read favorites");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(ids) => {
            let mut unique: Vec<String> = Vec::with_capacity(ids.len());
            for id in ids {
                if !unique.contains(&id) {
                    unique.push(id);
                }
            }
            unique
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed favorites");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::kv::{MemoryStorage, UnavailableStorage};

    /// Backend whose writes always fail.
    struct ReadOnlyStorage(MemoryStorage);

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn add_contains_remove() {
        let mut store = FavoritesStore::open(MemoryStorage::new());
        assert!(store.add("1"));
        assert!(store.contains("1"));
        assert!(store.remove("1"));
        assert!(!store.contains("1"));
    }

    #[test]
    fn add_and_remove_are_idempotent() {
        let mut store = FavoritesStore::open(MemoryStorage::new());
        assert!(store.add("1"));
        assert!(!store.add("1"));
        assert_eq!(store.len(), 1);

        assert!(store.remove("1"));
        assert!(!store.remove("1"));
        assert!(store.is_empty());
    }

    #[test]
    fn every_mutation_writes_the_full_set() {
        let storage = MemoryStorage::new();
        let mut store = FavoritesStore::open(storage.clone());
        store.add("3");
        store.add("1");
        assert_eq!(
            storage.get(SAVED_PROMPTS_KEY).unwrap().as_deref(),
            Some(r#"["3","1"]"#)
        );
        store.remove("3");
        assert_eq!(
            storage.get(SAVED_PROMPTS_KEY).unwrap().as_deref(),
            Some(r#"["1"]"#)
        );
    }

    #[test]
    fn reopening_sees_persisted_set() {
        let storage = MemoryStorage::new();
        let mut store = FavoritesStore::open(storage.clone());
        store.add("a");
        store.add("b");
        drop(store);

        let reopened = FavoritesStore::open(storage);
        assert_eq!(reopened.list(), ["a", "b"]);
    }

    #[test]
    fn malformed_value_reads_as_empty() {
        let storage = MemoryStorage::new();
        storage.set(SAVED_PROMPTS_KEY, "{oops").unwrap();
        let store = FavoritesStore::open(storage.clone());
        assert!(store.is_empty());

        storage.set(SAVED_PROMPTS_KEY, "[1, 2]").unwrap();
        assert!(FavoritesStore::open(storage).is_empty());
    }

    #[test]
    fn duplicate_ids_in_storage_are_collapsed() {
        let storage = MemoryStorage::new();
        storage.set(SAVED_PROMPTS_KEY, r#"["1","2","1"]"#).unwrap();
        let store = FavoritesStore::open(storage);
        assert_eq!(store.list(), ["1", "2"]);
    }

    #[test]
    fn unavailable_storage_is_empty_and_noop() {
        let mut store = FavoritesStore::open(UnavailableStorage);
        assert!(store.is_empty());
        assert!(!store.add("1"));
        assert!(!store.contains("1"));
        assert!(!store.toggle("1"));
    }

    #[test]
    fn failed_write_keeps_previous_set() {
        let inner = MemoryStorage::new();
        inner.set(SAVED_PROMPTS_KEY, r#"["1"]"#).unwrap();
        let mut store = FavoritesStore::open(ReadOnlyStorage(inner));
        assert!(!store.add("2"));
        assert!(!store.remove("1"));
        assert!(!store.clear());
        assert_eq!(store.list(), ["1"]);
    }

    #[test]
    fn toggle_flips_saved_state() {
        let mut store = FavoritesStore::open(MemoryStorage::new());
        assert!(store.toggle("9"));
        assert!(!store.toggle("9"));
        assert!(store.is_empty());
    }

    #[test]
    fn reload_picks_up_external_writes() {
        let storage = MemoryStorage::new();
        let mut store = FavoritesStore::open(storage.clone());
        let mut other = FavoritesStore::open(storage);
        other.add("x");

        assert!(!store.contains("x"));
        store.reload();
        assert!(store.contains("x"));
    }

    #[test]
    fn clear_empties_the_set() {
        let mut store = FavoritesStore::open(MemoryStorage::new());
        assert!(!store.clear());
        store.add("1");
        store.add("2");
        assert!(store.clear());
        assert!(FavoritesStore::open(store.storage().clone()).is_empty());
    }
}
