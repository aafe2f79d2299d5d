use std::sync::Arc;

use agent_provider::{AgentProvider, ProviderInitError};
use agent_provider_mock::{MockProvider, MOCK_PROVIDER_ID};
use agent_provider_orchestrator::{
    OrchestratorProvider, OrchestratorProviderConfig, ORCHESTRATOR_PROVIDER_ID,
};

use crate::config::ChatConfig;

pub fn provider_from_config(config: &ChatConfig) -> Result<Arc<dyn AgentProvider>, ProviderInitError> {
    match config.provider_id.as_str() {
        ORCHESTRATOR_PROVIDER_ID => {
            let mut provider_config = OrchestratorProviderConfig::new();
            if let Some(base_url) = &config.orchestrator_url {
                provider_config = provider_config.with_base_url(base_url.clone());
            }
            if let Some(app_name) = &config.app_name {
                provider_config = provider_config.with_app_name(app_name.clone());
            }
            if let Some(user_id) = &config.user_id {
                provider_config = provider_config.with_user_id(user_id.clone());
            }
            Ok(Arc::new(OrchestratorProvider::new(provider_config)?))
        }
        MOCK_PROVIDER_ID => Ok(Arc::new(MockProvider::default())),
        unknown => Err(ProviderInitError::new(format!(
            "Unsupported provider '{unknown}'. Available providers: {ORCHESTRATOR_PROVIDER_ID}, {MOCK_PROVIDER_ID}"
        ))),
    }
}
