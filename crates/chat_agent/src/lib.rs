//! Terminal chat client for the Cymbal Bank agent orchestrator.
//!
//! ## Provider bootstrap
//!
//! `CHAT_PROVIDER` selects the backend:
//!
//! - `orchestrator` (default) posts each message to `{CHAT_ORCHESTRATOR_URL}/run`
//!   (default `http://localhost:8090`), using `CHAT_APP_NAME` and `CHAT_USER_ID`
//!   when set
//! - `mock` replies locally with canned text, for demos and tests
//!
//! ## Session identity
//!
//! One session identifier is stored in `CHAT_STORE_PATH` (default
//! `./.chat_widget/local_storage.json`) and reused by every run from the same
//! directory. When that file cannot be read or written the client keeps going
//! with an identifier that lasts only for the current process.
//!
//! Exchange contract: [`app::SendController`] runs at most one exchange at a
//! time. A failed exchange only ever shows [`app::GENERIC_ERROR_MESSAGE`]; the
//! detail goes to the log configured by `CHAT_LOG_FILE` / `CHAT_DEBUG`.

pub mod app;
pub mod commands;
pub mod config;
pub mod log;
pub mod providers;
pub mod term;
