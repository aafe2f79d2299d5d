use std::sync::Arc;

use agent_provider::{AgentProvider, ProviderErrorKind, Turn};
use chat_widget::EntryKind;
use session_store::SessionId;

use crate::commands::{parse_slash_command, SlashCommand};
use crate::log::MessageLog;

/// Only text the transcript ever shows for a failed exchange.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error. Please make sure all agents are running and try again.";

/// Shown when `/health` fails; the detail only goes to the log.
pub const HEALTH_FAILED_MESSAGE: &str =
    "Orchestrator unreachable. Please make sure all agents are running.";

const HELP_TEXT: &str = "Commands: /help, /session, /health, /suggest [N], /quit. \
Enter sends; Alt+Enter inserts a new line; Ctrl-D quits.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    Idle,
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// An exchange is already in flight.
    Busy,
    /// A slash command ran. The message log is untouched.
    Command,
    Replied,
    Failed(ProviderErrorKind),
}

/// Presentation surface driven by the controller.
pub trait ChatView {
    fn render(&mut self, kind: EntryKind, text: &str);
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn set_input_enabled(&mut self, enabled: bool);
    fn clear_input(&mut self);
    fn focus_input(&mut self);
    /// Replaces the pending input text without submitting it.
    fn set_input(&mut self, text: &str);
    fn request_stop(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
    pub alt: bool,
}

impl KeyPress {
    #[must_use]
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            alt: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    InsertNewline,
    /// Handled by the line editor.
    Edit,
}

/// Enter submits; Enter with Shift or Alt inserts a newline instead.
#[must_use]
pub fn classify_key(press: KeyPress) -> KeyAction {
    match press.key {
        Key::Enter if press.shift || press.alt => KeyAction::InsertNewline,
        Key::Enter => KeyAction::Submit,
        Key::Char(_) | Key::Other => KeyAction::Edit,
    }
}

/// Owns the conversation and runs one exchange at a time.
pub struct SendController {
    provider: Arc<dyn AgentProvider>,
    session_id: SessionId,
    session_persistent: bool,
    log: MessageLog,
    state: ExchangeState,
    welcome_message: String,
    suggested_queries: Vec<String>,
    should_exit: bool,
}

impl SendController {
    pub fn new(provider: Arc<dyn AgentProvider>, session_id: SessionId) -> Self {
        Self {
            provider,
            session_id,
            session_persistent: true,
            log: MessageLog::new(),
            state: ExchangeState::Idle,
            welcome_message: crate::config::DEFAULT_WELCOME_MESSAGE.to_string(),
            suggested_queries: Vec::new(),
            should_exit: false,
        }
    }

    #[must_use]
    pub fn with_welcome_message(mut self, message: impl Into<String>) -> Self {
        self.welcome_message = message.into();
        self
    }

    #[must_use]
    pub fn with_suggested_queries(mut self, queries: Vec<String>) -> Self {
        self.suggested_queries = queries;
        self
    }

    #[must_use]
    pub fn with_session_persistence(mut self, persistent: bool) -> Self {
        self.session_persistent = persistent;
        self
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Renders the welcome message and hands focus to the input.
    pub fn start(&mut self, view: &mut dyn ChatView) {
        if !self.welcome_message.trim().is_empty() {
            view.render(EntryKind::System, &self.welcome_message);
        }
        view.set_input_enabled(true);
        view.focus_input();
    }

    pub async fn on_submit(&mut self, raw: &str, view: &mut dyn ChatView) -> SubmitOutcome {
        let text = raw.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        if self.state == ExchangeState::Sending {
            tracing::debug!("submit ignored while an exchange is in flight");
            return SubmitOutcome::Busy;
        }

        if let Some(command) = parse_slash_command(text) {
            self.run_command(command, view).await;
            return SubmitOutcome::Command;
        }

        self.exchange(text, view).await
    }

    async fn exchange(&mut self, text: &str, view: &mut dyn ChatView) -> SubmitOutcome {
        self.state = ExchangeState::Sending;
        view.set_input_enabled(false);

        self.log.append(Turn::user(text));
        view.render(EntryKind::User, text);
        view.clear_input();
        view.show_loading();

        tracing::debug!(
            session_id = %self.session_id,
            chars = text.chars().count(),
            "exchange started"
        );
        let result = self
            .provider
            .send_turn(text, self.session_id.as_str())
            .await;

        view.hide_loading();
        let outcome = match result {
            Ok(reply) => {
                view.render(EntryKind::Agent, &reply);
                self.log.append(Turn::model(reply));
                SubmitOutcome::Replied
            }
            Err(error) => {
                tracing::error!(
                    session_id = %self.session_id,
                    error = %error,
                    "exchange failed"
                );
                view.render(EntryKind::Error, GENERIC_ERROR_MESSAGE);
                SubmitOutcome::Failed(error.kind())
            }
        };

        self.state = ExchangeState::Idle;
        view.set_input_enabled(true);
        view.focus_input();
        outcome
    }

    async fn run_command(&mut self, command: SlashCommand, view: &mut dyn ChatView) {
        match command {
            SlashCommand::Help => view.render(EntryKind::System, HELP_TEXT),
            SlashCommand::Session => {
                let note = if self.session_persistent {
                    ""
                } else {
                    " (not persisted; storage unavailable)"
                };
                view.render(
                    EntryKind::System,
                    &format!("Session: {}{note}", self.session_id),
                );
            }
            SlashCommand::Health => self.check_health(view).await,
            SlashCommand::Suggest(None) => self.list_suggestions(view),
            SlashCommand::Suggest(Some(index)) => self.load_suggestion(index, view),
            SlashCommand::Quit => {
                self.should_exit = true;
                view.request_stop();
            }
        }
    }

    async fn check_health(&mut self, view: &mut dyn ChatView) {
        let target = self.provider.profile().target;
        match self.provider.health().await {
            Ok(status) => view.render(
                EntryKind::System,
                &format!("Orchestrator at {target}: {status}"),
            ),
            Err(error) => {
                tracing::warn!(target = %target, error = %error, "health check failed");
                view.render(EntryKind::Error, HEALTH_FAILED_MESSAGE);
            }
        }
    }

    fn list_suggestions(&self, view: &mut dyn ChatView) {
        if self.suggested_queries.is_empty() {
            view.render(EntryKind::System, "No suggested queries configured.");
            return;
        }

        let mut listing = String::from("Try asking (use /suggest N to load one):");
        for (index, query) in self.suggested_queries.iter().enumerate() {
            listing.push_str(&format!("\n{}. {query}", index + 1));
        }
        view.render(EntryKind::System, &listing);
    }

    fn load_suggestion(&self, index: usize, view: &mut dyn ChatView) {
        match index
            .checked_sub(1)
            .and_then(|position| self.suggested_queries.get(position))
        {
            Some(query) => {
                view.set_input(query);
                view.focus_input();
            }
            None => view.render(
                EntryKind::System,
                &format!(
                    "No suggestion #{index}; choose 1-{}.",
                    self.suggested_queries.len()
                ),
            ),
        }
    }
}
