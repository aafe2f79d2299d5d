use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use session_store::{
    default_store_path, KeyValueBackend, MemoryBackend, SessionIdStore, SessionStoreError,
    SESSION_ID_KEY, SESSION_ID_PREFIX,
};
use tempfile::TempDir;

fn store_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = default_store_path(dir.path());
    (dir, path)
}

fn read_store(path: &PathBuf) -> Value {
    let raw = fs::read_to_string(path).expect("store file should exist");
    serde_json::from_str(&raw).expect("store file should be JSON")
}

#[test]
fn default_store_path_lives_under_hidden_directory() {
    let path = default_store_path(std::path::Path::new("/work"));
    assert_eq!(path, PathBuf::from("/work/.chat_widget/local_storage.json"));
}

#[test]
fn first_lookup_creates_and_persists_identifier() {
    let (_dir, path) = store_path();
    let mut store = SessionIdStore::open(&path);

    let session_id = store.get_or_create_session_id();

    assert!(session_id.as_str().starts_with(SESSION_ID_PREFIX));
    assert!(store.is_persistent());
    assert_eq!(read_store(&path)[SESSION_ID_KEY], session_id.as_str());
}

#[test]
fn identifier_is_stable_across_store_instances() {
    let (_dir, path) = store_path();

    let first = SessionIdStore::open(&path).get_or_create_session_id();
    let second = SessionIdStore::open(&path).get_or_create_session_id();

    assert_eq!(first, second);
}

#[test]
fn existing_identifier_is_reused_verbatim() {
    let (_dir, path) = store_path();
    fs::create_dir_all(path.parent().expect("parent")).expect("store dir");
    fs::write(&path, r#"{"cymbal_session_id":"session_legacy_abc"}"#).expect("seed store");

    let mut store = SessionIdStore::open(&path);

    assert_eq!(store.get_or_create_session_id().as_str(), "session_legacy_abc");
    assert!(store.is_persistent());
}

#[test]
fn cached_identifier_ignores_later_storage_changes() {
    let (_dir, path) = store_path();
    let mut store = SessionIdStore::open(&path);
    let first = store.get_or_create_session_id();

    fs::write(&path, r#"{"cymbal_session_id":"session_other"}"#).expect("overwrite store");

    assert_eq!(store.get_or_create_session_id(), first);
}

#[test]
fn corrupt_store_degrades_to_volatile_identifier_without_rewrite() {
    let (_dir, path) = store_path();
    fs::create_dir_all(path.parent().expect("parent")).expect("store dir");
    fs::write(&path, "{not json").expect("seed corrupt store");

    let mut store = SessionIdStore::open(&path);
    let first = store.get_or_create_session_id();
    let second = store.get_or_create_session_id();

    assert!(first.as_str().starts_with(SESSION_ID_PREFIX));
    assert_eq!(first, second);
    assert!(!store.is_persistent());
    assert_eq!(fs::read_to_string(&path).expect("still there"), "{not json");
}

#[test]
fn unwritable_location_degrades_to_volatile_identifier() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "file, not a directory").expect("blocker file");
    let path = blocker.join("local_storage.json");

    let mut store = SessionIdStore::open(&path);
    let session_id = store.get_or_create_session_id();

    assert!(session_id.as_str().starts_with(SESSION_ID_PREFIX));
    assert!(!store.is_persistent());
    assert_eq!(store.get_or_create_session_id(), session_id);
}

struct FailingBackend;

impl KeyValueBackend for FailingBackend {
    fn get(&self, _key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::io(
            "writing key-value store",
            key,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "quota exceeded"),
        ))
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

#[test]
fn custom_backend_write_failure_is_not_persistent() {
    let mut store = SessionIdStore::with_backend(Box::new(FailingBackend));

    let _ = store.get_or_create_session_id();

    assert!(!store.is_persistent());
}

#[test]
fn memory_backend_round_trips_values() {
    let mut backend = MemoryBackend::new();
    backend.set(SESSION_ID_KEY, "session_1").expect("memory write");

    assert_eq!(
        backend.get(SESSION_ID_KEY).expect("memory read").as_deref(),
        Some("session_1")
    );
    assert!(!backend.is_durable());
}
