//! Deterministic mock implementation of the shared `agent_provider` contract.
//!
//! This crate contains no transport/protocol logic and is intended for local
//! development and controller-level testing. Replies come from an explicit
//! script first, then cycle through a fixed list of canned replies.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use agent_provider::{AgentProvider, ProviderError, ProviderProfile};
use async_trait::async_trait;

/// Stable provider identifier used for explicit startup selection.
pub const MOCK_PROVIDER_ID: &str = "mock";

/// One scripted outcome for the next exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    Text(String),
    Fail(ProviderError),
}

/// Exchange observed by the mock, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTurn {
    pub text: String,
    pub session_id: String,
}

#[derive(Debug, Default)]
struct MockState {
    script: VecDeque<MockReply>,
    next_canned: usize,
    recorded: Vec<RecordedTurn>,
}

/// Deterministic mock provider used by `chat_agent` tests and local runs.
#[derive(Debug)]
pub struct MockProvider {
    canned: Vec<String>,
    delay: Option<Duration>,
    state: Mutex<MockState>,
}

impl MockProvider {
    /// Creates a mock provider that cycles through `canned` replies.
    ///
    /// With no canned replies the mock echoes the submitted text.
    #[must_use]
    pub fn new(canned: Vec<String>) -> Self {
        Self {
            canned: sanitize_replies(canned),
            delay: None,
            state: Mutex::new(MockState::default()),
        }
    }

    /// Creates a mock that plays `script` in order before falling back to echo.
    #[must_use]
    pub fn scripted(script: impl IntoIterator<Item = MockReply>) -> Self {
        let provider = Self::new(Vec::new());
        lock_unpoisoned(&provider.state).script = script.into_iter().collect();
        provider
    }

    /// Delays every reply, simulating network latency.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_reply(&self, text: impl Into<String>) {
        lock_unpoisoned(&self.state)
            .script
            .push_back(MockReply::Text(text.into()));
    }

    pub fn push_failure(&self, error: ProviderError) {
        lock_unpoisoned(&self.state)
            .script
            .push_back(MockReply::Fail(error));
    }

    /// Returns every exchange received so far.
    #[must_use]
    pub fn recorded_turns(&self) -> Vec<RecordedTurn> {
        lock_unpoisoned(&self.state).recorded.clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        lock_unpoisoned(&self.state).recorded.len()
    }

    fn next_reply(&self, text: &str) -> MockReply {
        let mut state = lock_unpoisoned(&self.state);
        if let Some(scripted) = state.script.pop_front() {
            return scripted;
        }

        if self.canned.is_empty() {
            return MockReply::Text(format!("You said: {text}"));
        }

        let index = state.next_canned % self.canned.len();
        state.next_canned = state.next_canned.wrapping_add(1);
        MockReply::Text(self.canned[index].clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(vec![
            "Your checking account ending in 4421 has a balance of $2,310.55.".to_string(),
            "This month you spent $412.80 on dining, 18% more than last month.".to_string(),
            "Your Cymbal Rewards card earns 3x points on groceries through the end of the quarter.".to_string(),
            "You are 64% of the way to your emergency fund goal of $10,000.".to_string(),
        ])
        .with_delay(Duration::from_millis(400))
    }
}

#[async_trait]
impl AgentProvider for MockProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: MOCK_PROVIDER_ID.to_string(),
            target: "in-process".to_string(),
        }
    }

    async fn send_turn(&self, text: &str, session_id: &str) -> Result<String, ProviderError> {
        lock_unpoisoned(&self.state).recorded.push(RecordedTurn {
            text: text.to_string(),
            session_id: session_id.to_string(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_reply(text) {
            MockReply::Text(reply) => Ok(reply),
            MockReply::Fail(error) => Err(error),
        }
    }

    async fn health(&self) -> Result<String, ProviderError> {
        Ok("ok".to_string())
    }
}

fn sanitize_replies(replies: Vec<String>) -> Vec<String> {
    replies
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .collect()
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
