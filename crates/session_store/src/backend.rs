use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::SessionStoreError;

/// String key-value storage that outlives (or not) the current process.
pub trait KeyValueBackend: Send {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionStoreError>;

    /// Whether values written here survive a restart.
    fn is_durable(&self) -> bool;

    /// Short human-readable location used in diagnostics.
    fn describe(&self) -> String;
}

/// Flat JSON object file, e.g. `{"cymbal_session_id": "session_..."}`.
///
/// Keys written by other tools are preserved on update. A missing file reads as
/// empty; an unreadable or malformed one is reported as an error and never
/// rewritten.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, SessionStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(SessionStoreError::io(
                    "reading key-value store",
                    &self.path,
                    source,
                ))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(SessionStoreError::NotAnObject {
                path: self.path.clone(),
            }),
            Err(source) => Err(SessionStoreError::json_parse(&self.path, source)),
        }
    }

    fn save(&self, map: &Map<String, Value>) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| {
                SessionStoreError::io("creating key-value store directory", parent, source)
            })?;
        }

        let body = serde_json::to_vec_pretty(map)
            .map_err(|source| SessionStoreError::json_serialize(&self.path, source))?;

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, body).map_err(|source| {
            SessionStoreError::io("writing key-value store", &staging, source)
        })?;
        fs::rename(&staging, &self.path).map_err(|source| {
            SessionStoreError::io("replacing key-value store", &self.path, source)
        })
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self
            .load()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let mut map = self.load()?;
        map.insert(key.to_owned(), Value::String(value.to_owned()));
        self.save(&map)
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Process-lifetime storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let backend = FileBackend::new(dir.path().join("absent.json"));

        assert_eq!(backend.get("k").expect("missing file is fine"), None);
    }

    #[test]
    fn set_preserves_unrelated_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"theme":"dark"}"#).expect("seed store");

        let mut backend = FileBackend::new(&path);
        backend.set("k", "v").expect("write");

        let stored: Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read back")).expect("json");
        assert_eq!(stored["theme"], "dark");
        assert_eq!(stored["k"], "v");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn non_object_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        fs::write(&path, "[1,2]").expect("seed store");

        let error = FileBackend::new(&path).get("k").expect_err("array root");
        assert!(matches!(error, SessionStoreError::NotAnObject { .. }));
    }

    #[test]
    fn non_string_values_read_as_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"k":42}"#).expect("seed store");

        assert_eq!(FileBackend::new(&path).get("k").expect("valid object"), None);
    }
}
