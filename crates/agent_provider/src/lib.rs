//! Minimal provider-agnostic contract for one chat exchange.
//!
//! This crate defines the turn/role vocabulary shared by the controller and its
//! providers, plus the provider trait itself. It excludes transport details and
//! wire payloads; those live in provider implementations.

use std::fmt;

use async_trait::async_trait;

/// Error returned while constructing/configuring a provider before any exchange starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInitError {
    message: String,
}

impl ProviderInitError {
    /// Creates a new provider initialization error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProviderInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProviderInitError {}

impl From<String> for ProviderInitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ProviderInitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Model,
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One role-tagged message unit. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    text: String,
}

impl Turn {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.role.as_str(), self.text)
    }
}

/// Failure class of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Non-success status or network-level failure.
    Transport { status: Option<u16> },
    /// Response body was not valid structured data.
    Parse,
    /// Request could not be built from the given input/configuration.
    InvalidRequest,
    /// Operation is not offered by this provider.
    Unsupported,
}

/// Error returned by a failed exchange. The message is diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
}

impl ProviderError {
    #[must_use]
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport { status }, message)
    }

    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Parse, message)
    }

    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unsupported, message)
    }

    #[must_use]
    pub fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status when the failure was a non-success response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ProviderErrorKind::Transport { status } => status,
            _ => None,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ProviderErrorKind::Transport { status: Some(status) } => {
                write!(f, "transport error (HTTP {status}): {}", self.message)
            }
            ProviderErrorKind::Transport { status: None } => {
                write!(f, "transport error: {}", self.message)
            }
            ProviderErrorKind::Parse => write!(f, "parse error: {}", self.message),
            ProviderErrorKind::InvalidRequest => write!(f, "invalid request: {}", self.message),
            ProviderErrorKind::Unsupported => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Immutable metadata describing a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub provider_id: String,
    /// Human-readable target, e.g. the endpoint the provider talks to.
    pub target: String,
}

/// Provider interface for executing one exchange.
#[async_trait]
pub trait AgentProvider: Send + Sync + 'static {
    /// Returns provider identity metadata.
    fn profile(&self) -> ProviderProfile;

    /// Sends one user message and resolves to the reply text.
    ///
    /// A single call is one attempt; providers do not retry.
    async fn send_turn(&self, text: &str, session_id: &str) -> Result<String, ProviderError>;

    /// Reports remote service health as a short status string.
    ///
    /// Providers may return an unsupported error when no health check exists.
    async fn health(&self) -> Result<String, ProviderError> {
        Err(ProviderError::unsupported(
            "Health checks are not supported by this provider",
        ))
    }
}
