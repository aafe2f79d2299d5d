use std::fmt;
use std::path::Path;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::backend::{FileBackend, KeyValueBackend, MemoryBackend};

/// Storage key under which the session identifier is persisted.
pub const SESSION_ID_KEY: &str = "cymbal_session_id";
pub const SESSION_ID_PREFIX: &str = "session_";

/// Opaque conversation identifier carried in every run request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generates `session_<unix-millis>_<8 hex chars>`.
#[must_use]
pub fn generate_session_id() -> SessionId {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let suffix = Uuid::new_v4().simple().to_string();
    SessionId(format!("{SESSION_ID_PREFIX}{millis}_{}", &suffix[..8]))
}

/// Resolves and caches the durable session identifier.
///
/// The first call reads [`SESSION_ID_KEY`] from the backend, creating and
/// persisting a fresh identifier when absent. Later calls return the cached
/// value without touching storage, so one process always sees one identifier.
pub struct SessionIdStore {
    backend: Box<dyn KeyValueBackend>,
    cached: Option<SessionId>,
    degraded: bool,
}

impl SessionIdStore {
    /// Opens a file-backed store. Nothing is read until the first lookup.
    #[must_use]
    pub fn open(path: &Path) -> Self {
        Self::with_backend(Box::new(FileBackend::new(path)))
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(MemoryBackend::new()))
    }

    #[must_use]
    pub fn with_backend(backend: Box<dyn KeyValueBackend>) -> Self {
        Self {
            backend,
            cached: None,
            degraded: false,
        }
    }

    /// Returns the identifier for this client, creating it on first use.
    ///
    /// Never fails: storage errors degrade to an identifier that only lives
    /// as long as this store.
    pub fn get_or_create_session_id(&mut self) -> SessionId {
        if let Some(cached) = &self.cached {
            return cached.clone();
        }

        let session_id = self.resolve();
        self.cached = Some(session_id.clone());
        session_id
    }

    /// Whether the current identifier will survive a restart.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.backend.is_durable() && !self.degraded
    }

    fn resolve(&mut self) -> SessionId {
        let location = self.backend.describe();

        match self.backend.get(SESSION_ID_KEY) {
            Ok(Some(existing)) if !existing.trim().is_empty() => {
                tracing::debug!(store = %location, session_id = %existing, "reusing stored session id");
                return SessionId(existing);
            }
            Ok(_) => {}
            Err(error) => {
                // Leave unreadable storage untouched.
                self.degraded = true;
                let session_id = generate_session_id();
                tracing::warn!(
                    store = %location,
                    error = %error,
                    session_id = %session_id,
                    "session store unreadable; using volatile session id"
                );
                return session_id;
            }
        }

        let session_id = generate_session_id();
        match self.backend.set(SESSION_ID_KEY, session_id.as_str()) {
            Ok(()) => {
                tracing::debug!(store = %location, session_id = %session_id, "created session id");
            }
            Err(error) => {
                self.degraded = true;
                tracing::warn!(
                    store = %location,
                    error = %error,
                    session_id = %session_id,
                    "failed to persist session id; using volatile session id"
                );
            }
        }
        session_id
    }
}

impl fmt::Debug for SessionIdStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionIdStore")
            .field("backend", &self.backend.describe())
            .field("cached", &self.cached)
            .field("degraded", &self.degraded)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_follow_prefix_millis_hex_shape() {
        let id = generate_session_id();
        let rest = id
            .as_str()
            .strip_prefix(SESSION_ID_PREFIX)
            .expect("prefix");
        let (millis, suffix) = rest.split_once('_').expect("separator");

        assert!(millis.parse::<u64>().expect("numeric millis") > 1_600_000_000_000);
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(generate_session_id(), generate_session_id());
    }

    #[test]
    fn memory_store_caches_and_is_not_persistent() {
        let mut store = SessionIdStore::in_memory();

        let first = store.get_or_create_session_id();
        let second = store.get_or_create_session_id();

        assert_eq!(first, second);
        assert!(!store.is_persistent());
    }
}
