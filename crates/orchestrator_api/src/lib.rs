//! Transport-only client for the chat orchestrator HTTP service.
//!
//! This crate owns request building, response parsing, and reply extraction for
//! the orchestrator's `/run` and `/health` endpoints. It contains no UI coupling
//! and no conversation state; every call is a single-shot request.
//!
//! Reply extraction walks the returned events from last to first and takes the
//! first non-empty text fragment of the most recent event that has one. A body
//! that is valid JSON but carries no such fragment resolves to
//! [`FALLBACK_REPLY`] rather than an error.

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod headers;
pub mod payload;
pub mod url;

pub use client::{HealthStatus, OrchestratorClient};
pub use config::OrchestratorConfig;
pub use error::OrchestratorApiError;
pub use events::{ResponseEvent, RunResponse, FALLBACK_REPLY};
pub use payload::{MessageContent, MessagePart, MessageRole, RunRequest};
pub use reqwest::StatusCode;
pub use url::{normalize_health_url, normalize_run_url};
