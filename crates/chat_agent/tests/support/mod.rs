#![allow(dead_code)]

use std::sync::Arc;

use agent_provider::AgentProvider;
use chat_agent::app::{ChatView, SendController};
use chat_widget::EntryKind;
use session_store::SessionIdStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Render(EntryKind, String),
    ShowLoading,
    HideLoading,
    SetInputEnabled(bool),
    ClearInput,
    FocusInput,
    SetInput(String),
    RequestStop,
}

/// Records every view call in order.
#[derive(Debug, Default)]
pub struct ViewSpy {
    pub calls: Vec<ViewCall>,
    pub input_enabled: bool,
}

impl ViewSpy {
    pub fn rendered(&self) -> Vec<(EntryKind, String)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ViewCall::Render(kind, text) => Some((*kind, text.clone())),
                _ => None,
            })
            .collect()
    }
}

impl ChatView for ViewSpy {
    fn render(&mut self, kind: EntryKind, text: &str) {
        self.calls.push(ViewCall::Render(kind, text.to_string()));
    }

    fn show_loading(&mut self) {
        self.calls.push(ViewCall::ShowLoading);
    }

    fn hide_loading(&mut self) {
        self.calls.push(ViewCall::HideLoading);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.calls.push(ViewCall::SetInputEnabled(enabled));
    }

    fn clear_input(&mut self) {
        self.calls.push(ViewCall::ClearInput);
    }

    fn focus_input(&mut self) {
        self.calls.push(ViewCall::FocusInput);
    }

    fn set_input(&mut self, text: &str) {
        self.calls.push(ViewCall::SetInput(text.to_string()));
    }

    fn request_stop(&mut self) {
        self.calls.push(ViewCall::RequestStop);
    }
}

pub fn controller_with(provider: Arc<dyn AgentProvider>) -> SendController {
    let session_id = SessionIdStore::in_memory().get_or_create_session_id();
    SendController::new(provider, session_id)
}
