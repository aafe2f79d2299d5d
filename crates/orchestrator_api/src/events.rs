use serde_json::Value;

/// Reply used when a successful response carries no extractable text.
pub const FALLBACK_REPLY: &str =
    "I received your message but had trouble formatting the response. Please try again.";

/// One step of agent processing as reported by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseEvent {
    /// Optional author/role label; informational only.
    pub author: Option<String>,
    /// Non-empty text fragments from `content.parts`, in wire order.
    pub fragments: Vec<String>,
}

impl ResponseEvent {
    pub fn first_fragment(&self) -> Option<&str> {
        self.fragments.first().map(String::as_str)
    }

    fn from_value(value: &Value) -> Self {
        let author = value
            .get("author")
            .or_else(|| value.get("role"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        let fragments = value
            .get("content")
            .and_then(|content| content.get("parts"))
            .and_then(Value::as_array)
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(Value::as_str))
                    .filter(|text| !text.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Self { author, fragments }
    }
}

/// Parsed `/run` response.
///
/// Parsing is lenient: only `events[].content.parts[].text` is consumed and any
/// other shape simply yields fewer events or fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResponse {
    pub events: Vec<ResponseEvent>,
}

impl RunResponse {
    pub fn from_value(body: &Value) -> Self {
        let events = body
            .get("events")
            .and_then(Value::as_array)
            .map(|events| events.iter().map(ResponseEvent::from_value).collect())
            .unwrap_or_default();

        Self { events }
    }

    /// First fragment of the most recent event that has any text.
    pub fn reply_text(&self) -> Option<&str> {
        self.events
            .iter()
            .rev()
            .find_map(ResponseEvent::first_fragment)
    }

    /// [`Self::reply_text`] or [`FALLBACK_REPLY`].
    pub fn reply_or_fallback(&self) -> String {
        self.reply_text().unwrap_or(FALLBACK_REPLY).to_owned()
    }
}
