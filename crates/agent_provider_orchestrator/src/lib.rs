//! Orchestrator-backed implementation of the shared `agent_provider` contract.
//!
//! This adapter forwards one exchange to `orchestrator_api` and folds its
//! transport/parse error taxonomy into the provider-level `ProviderError`
//! classes consumed by `chat_agent`.

use std::sync::Arc;
use std::time::Duration;

use agent_provider::{
    AgentProvider, ProviderError, ProviderErrorKind, ProviderInitError, ProviderProfile,
};
use async_trait::async_trait;
use orchestrator_api::error::ErrorClass;
use orchestrator_api::{OrchestratorApiError, OrchestratorClient, OrchestratorConfig};

/// Stable provider identifier used by `chat_agent` startup selection.
pub const ORCHESTRATOR_PROVIDER_ID: &str = "orchestrator";

/// Runtime configuration for the orchestrator provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrchestratorProviderConfig {
    pub base_url: Option<String>,
    pub app_name: Option<String>,
    pub user_id: Option<String>,
    pub timeout: Option<Duration>,
}

impl OrchestratorProviderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn into_orchestrator_config(self) -> OrchestratorConfig {
        let mut config = OrchestratorConfig::new(self.base_url.unwrap_or_default());

        if let Some(app_name) = self.app_name.filter(|value| !value.trim().is_empty()) {
            config = config.with_app_name(app_name);
        }

        if let Some(user_id) = self.user_id.filter(|value| !value.trim().is_empty()) {
            config = config.with_user_id(user_id);
        }

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config
    }
}

#[async_trait]
trait TurnClient: Send + Sync {
    fn endpoint(&self) -> String;

    async fn send_turn(&self, text: &str, session_id: &str) -> Result<String, OrchestratorApiError>;

    async fn health(&self) -> Result<String, OrchestratorApiError>;
}

#[derive(Debug)]
struct DefaultTurnClient {
    client: OrchestratorClient,
}

#[async_trait]
impl TurnClient for DefaultTurnClient {
    fn endpoint(&self) -> String {
        self.client.run_endpoint()
    }

    async fn send_turn(&self, text: &str, session_id: &str) -> Result<String, OrchestratorApiError> {
        self.client.send_turn(text, session_id).await
    }

    async fn health(&self) -> Result<String, OrchestratorApiError> {
        Ok(self.client.health().await?.status)
    }
}

/// `AgentProvider` adapter backed by `orchestrator_api` transport primitives.
pub struct OrchestratorProvider {
    turn_client: Arc<dyn TurnClient>,
}

impl OrchestratorProvider {
    /// Creates a provider using real orchestrator HTTP transport.
    pub fn new(config: OrchestratorProviderConfig) -> Result<Self, ProviderInitError> {
        let client =
            OrchestratorClient::new(config.into_orchestrator_config()).map_err(map_init_error)?;

        Ok(Self {
            turn_client: Arc::new(DefaultTurnClient { client }),
        })
    }

    #[cfg(test)]
    fn with_turn_client_for_tests(turn_client: Arc<dyn TurnClient>) -> Self {
        Self { turn_client }
    }
}

#[async_trait]
impl AgentProvider for OrchestratorProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: ORCHESTRATOR_PROVIDER_ID.to_string(),
            target: self.turn_client.endpoint(),
        }
    }

    async fn send_turn(&self, text: &str, session_id: &str) -> Result<String, ProviderError> {
        self.turn_client
            .send_turn(text, session_id)
            .await
            .map_err(map_exchange_error)
    }

    async fn health(&self) -> Result<String, ProviderError> {
        self.turn_client.health().await.map_err(map_exchange_error)
    }
}

fn map_exchange_error(error: OrchestratorApiError) -> ProviderError {
    let kind = match error.class() {
        ErrorClass::Transport => ProviderErrorKind::Transport {
            status: error.status().map(|status| status.as_u16()),
        },
        ErrorClass::Parse => ProviderErrorKind::Parse,
        ErrorClass::InvalidRequest => ProviderErrorKind::InvalidRequest,
    };
    tracing::debug!(error = %error, "orchestrator exchange failed");
    ProviderError::new(kind, error.to_string())
}

fn map_init_error(error: OrchestratorApiError) -> ProviderInitError {
    ProviderInitError::new(format!(
        "Failed to initialize orchestrator provider: {error}"
    ))
}
