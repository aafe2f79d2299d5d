//! Terminal presentation layer for the chat client.
//!
//! [`Transcript`] renders conversation entries and the transient loading line;
//! [`EnvConfig`] and [`logging::init_logging`] carry the shared environment
//! switches and diagnostic sink used by the `chat_agent` binary.

pub mod config;
pub mod logging;
pub mod terminal;
pub mod transcript;

pub use config::{env_flag, env_string_opt, EnvConfig};
pub use logging::init_logging;
pub use terminal::terminal_columns;
pub use transcript::{
    format_entry, wrap_text, EntryKind, Transcript, TranscriptEntry, TranscriptOptions,
    DEFAULT_LOADING_TEXT,
};
