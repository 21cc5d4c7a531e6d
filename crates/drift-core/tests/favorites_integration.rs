//! Integration tests for favorites persistence across store instances.

use std::collections::HashSet;

use drift_core::{
    Catalog, FavoritesStore, FileStorage, KeyValueStorage, UnavailableStorage, SAVED_PROMPTS_KEY,
};

#[test]
fn test_file_backed_roundtrip() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = FavoritesStore::open(FileStorage::new(dir.path()));
    store.add("4");
    store.add("12");
    store.add("7");
    store.remove("12");
    drop(store);

    // Fresh process start against the same directory.
    let reopened = FavoritesStore::open(FileStorage::new(dir.path()));
    let ids: HashSet<&str> = reopened.list().iter().map(String::as_str).collect();
    assert_eq!(ids, HashSet::from(["4", "7"]));
}

#[test]
fn test_persisted_format_is_json_array_of_strings() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    let mut store = FavoritesStore::open(storage.clone());
    store.add("1");
    store.add("2");

    let raw = storage.get(SAVED_PROMPTS_KEY).unwrap().unwrap();
    let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, vec!["1", "2"]);
    assert!(dir.path().join("drift_saved_prompts.json").exists());
}

#[test]
fn test_corrupt_file_reads_as_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("drift_saved_prompts.json"), "not json at all").unwrap();

    let mut store = FavoritesStore::open(FileStorage::new(dir.path()));
    assert!(store.is_empty());

    assert!(store.add("3"));
    let reopened = FavoritesStore::open(FileStorage::new(dir.path()));
    assert_eq!(reopened.list(), ["3"]);
}

#[test]
fn test_resolve_against_bundled_catalog() {
    let catalog = Catalog::bundled().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut store = FavoritesStore::open(FileStorage::new(dir.path()));
    store.add("10");
    store.add("gone-from-catalog");
    store.add("2");

    let saved = store.resolve(&catalog);
    let ids: Vec<&str> = saved.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "10"]);
}

#[test]
fn test_no_storage_context() {
    let mut store = FavoritesStore::open(UnavailableStorage);
    assert!(!store.add("1"));
    assert!(!store.remove("1"));
    assert!(store.list().is_empty());
    assert!(!store.contains("1"));
}
