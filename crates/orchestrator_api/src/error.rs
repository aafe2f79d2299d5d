use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Error as JsonError, Value};

#[derive(Debug)]
pub enum OrchestratorApiError {
    MissingAppName,
    MissingUserId,
    MissingSessionId,
    EmptyMessage,
    InvalidHeader(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    Parse(JsonError),
    Serialize(JsonError),
}

/// Coarse failure class used by callers that only distinguish transport from
/// parse problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    InvalidRequest,
    Transport,
    Parse,
}

impl OrchestratorApiError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingAppName
            | Self::MissingUserId
            | Self::MissingSessionId
            | Self::EmptyMessage
            | Self::InvalidHeader(_)
            | Self::Serialize(_) => ErrorClass::InvalidRequest,
            Self::Request(_) | Self::Status(..) => ErrorClass::Transport,
            Self::Parse(_) => ErrorClass::Parse,
        }
    }

    /// HTTP status for non-success responses.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status, _) => Some(*status),
            Self::Request(error) => error.status(),
            _ => None,
        }
    }
}

impl fmt::Display for OrchestratorApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAppName => write!(f, "app name is required"),
            Self::MissingUserId => write!(f, "user id is required"),
            Self::MissingSessionId => write!(f, "session id is required"),
            Self::EmptyMessage => write!(f, "message text must not be empty"),
            Self::InvalidHeader(message) => write!(f, "invalid header: {message}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Parse(error) => write!(f, "response is not valid JSON: {error}"),
            Self::Serialize(error) => write!(f, "serialization error: {error}"),
        }
    }
}

impl std::error::Error for OrchestratorApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(error) => Some(error),
            Self::Parse(error) | Self::Serialize(error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OrchestratorApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for OrchestratorApiError {
    fn from(error: JsonError) -> Self {
        Self::Parse(error)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    detail: Option<Value>,
    error: Option<ErrorPayloadFields>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayloadFields {
    message: Option<String>,
}

/// Summarise a non-success response body for diagnostics.
///
/// Understands FastAPI-style `{"detail": ...}` bodies (plain string or a list
/// of validation entries with `msg`) and `{"error": {"message": ...}}` bodies.
/// Anything else falls back to the raw body, or the canonical status reason when
/// the body is empty.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body.to_string()
        }
    };

    let Ok(parsed) = serde_json::from_str::<ErrorPayload>(body) else {
        return fallback();
    };

    if let Some(message) = parsed.detail.as_ref().and_then(detail_message) {
        return message;
    }

    if let Some(message) = parsed
        .error
        .and_then(|error| error.message)
        .filter(|message| !message.is_empty())
    {
        return message;
    }

    fallback()
}

fn detail_message(detail: &Value) -> Option<String> {
    match detail {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        Value::Array(entries) => {
            let messages = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .filter(|message| !message.is_empty())
                .collect::<Vec<_>>();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}
