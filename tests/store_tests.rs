//! Identity-store persistence tests.

use courier::error::CourierError;
use courier::session::{FileIdentityStore, IdentityStore, MemoryIdentityStore, StoredIdentities};

#[test]
fn file_store_round_trips_identities() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileIdentityStore::new(dir.path().join("identities.json"));

    assert!(store.load().unwrap().is_none());

    store
        .save(&StoredIdentities::new(
            Some("asst_1".to_string()),
            Some("thread_1".to_string()),
        ))
        .unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.assistant_id.as_deref(), Some("asst_1"));
    assert_eq!(loaded.thread_id.as_deref(), Some("thread_1"));
}

#[test]
fn file_store_clear_removes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileIdentityStore::new(dir.path().join("identities.json"));

    store
        .save(&StoredIdentities::new(Some("asst_1".to_string()), None))
        .unwrap();
    store.clear().unwrap();

    assert!(store.load().unwrap().is_none());
    // Clearing an already-missing file is fine.
    store.clear().unwrap();
}

#[test]
fn file_store_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileIdentityStore::new(dir.path().join("nested/deeper/identities.json"));

    store
        .save(&StoredIdentities::new(None, Some("thread_9".to_string())))
        .unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.thread_id.as_deref(), Some("thread_9"));
}

#[test]
fn corrupt_store_file_surfaces_a_typed_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("identities.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileIdentityStore::new(path);
    let err = store.load().unwrap_err();
    assert!(matches!(err, CourierError::Serialization(_)));
}

#[test]
fn memory_store_round_trips_and_clears() {
    let store = MemoryIdentityStore::new();
    assert!(store.load().unwrap().is_none());

    store
        .save(&StoredIdentities::new(Some("asst_1".to_string()), None))
        .unwrap();
    assert!(store.load().unwrap().is_some());

    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
}
