//! Durable session identity for the chat client.
//!
//! A single session identifier is persisted under [`SESSION_ID_KEY`] in a small
//! key-value file and reused across restarts. When the backing store cannot be
//! read or written the store degrades to an identifier that lives only for the
//! current process.

mod backend;
mod error;
mod paths;
mod store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::SessionStoreError;
pub use paths::{default_store_path, STORE_DIR, STORE_FILE_NAME};
pub use store::{generate_session_id, SessionId, SessionIdStore, SESSION_ID_KEY, SESSION_ID_PREFIX};
