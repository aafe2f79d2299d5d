//! Startup configuration read from the environment.
//!
//! Every value is fixed at boot. Unset or blank variables fall back to the
//! defaults below.

use std::path::{Path, PathBuf};

use chat_widget::env_string_opt;
use session_store::default_store_path;

pub const PROVIDER_ENV_VAR: &str = "CHAT_PROVIDER";
pub const ORCHESTRATOR_URL_ENV_VAR: &str = "CHAT_ORCHESTRATOR_URL";
pub const APP_NAME_ENV_VAR: &str = "CHAT_APP_NAME";
pub const USER_ID_ENV_VAR: &str = "CHAT_USER_ID";
pub const STORE_PATH_ENV_VAR: &str = "CHAT_STORE_PATH";
pub const WELCOME_MESSAGE_ENV_VAR: &str = "CHAT_WELCOME_MESSAGE";

pub const DEFAULT_WELCOME_MESSAGE: &str =
    "Welcome to Cymbal Bank! How can I help you with your finances today?";

pub const DEFAULT_SUGGESTED_QUERIES: [&str; 5] = [
    "How much did I spend on dining last month?",
    "Am I on track for my savings goals?",
    "What perks and benefits do I have?",
    "How is my investment portfolio performing?",
    "Can I schedule a meeting with a financial advisor?",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Provider identifier, e.g. `orchestrator` or `mock`.
    pub provider_id: String,
    pub orchestrator_url: Option<String>,
    pub app_name: Option<String>,
    pub user_id: Option<String>,
    pub store_path: PathBuf,
    pub welcome_message: String,
    pub suggested_queries: Vec<String>,
}

impl ChatConfig {
    /// Defaults relative to `cwd`, ignoring the environment.
    pub fn defaults(cwd: &Path) -> Self {
        Self {
            provider_id: agent_provider_orchestrator::ORCHESTRATOR_PROVIDER_ID.to_string(),
            orchestrator_url: None,
            app_name: None,
            user_id: None,
            store_path: default_store_path(cwd),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            suggested_queries: DEFAULT_SUGGESTED_QUERIES
                .iter()
                .map(|query| query.to_string())
                .collect(),
        }
    }

    pub fn from_env(cwd: &Path) -> Self {
        let defaults = Self::defaults(cwd);
        Self {
            provider_id: env_string_opt(PROVIDER_ENV_VAR)
                .map(|value| value.trim().to_ascii_lowercase())
                .unwrap_or(defaults.provider_id),
            orchestrator_url: env_string_opt(ORCHESTRATOR_URL_ENV_VAR),
            app_name: env_string_opt(APP_NAME_ENV_VAR),
            user_id: env_string_opt(USER_ID_ENV_VAR),
            store_path: env_string_opt(STORE_PATH_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            welcome_message: env_string_opt(WELCOME_MESSAGE_ENV_VAR)
                .unwrap_or(defaults.welcome_message),
            suggested_queries: defaults.suggested_queries,
        }
    }
}
