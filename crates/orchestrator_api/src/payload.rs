use serde::{Deserialize, Serialize};

/// Role tag carried by a message on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Model,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    pub role: MessageRole,
    pub parts: Vec<MessagePart>,
}

impl MessageContent {
    /// Single-part user message with the text kept verbatim.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            parts: vec![MessagePart { text: text.into() }],
        }
    }
}

/// Request body for the orchestrator `/run` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
    pub new_message: MessageContent,
    /// Always false: replies are read as one JSON document.
    #[serde(default)]
    pub streaming: bool,
}

impl RunRequest {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
            new_message: MessageContent::user_text(text),
            streaming: false,
        }
    }

    /// Text of the first part of the outgoing message.
    pub fn text(&self) -> Option<&str> {
        self.new_message
            .parts
            .first()
            .map(|part| part.text.as_str())
    }
}
