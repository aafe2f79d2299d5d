use orchestrator_api::{
    MessageRole, OrchestratorApiError, OrchestratorClient, OrchestratorConfig, RunRequest,
};
use serde_json::{json, Value};

#[test]
fn payload_serialization_matches_run_wire_shape() {
    let request = RunRequest::new("chat_orchestrator", "user_123", "session_1", "hi");
    let body = serde_json::to_value(&request).expect("serialize payload");

    assert_eq!(
        body,
        json!({
            "app_name": "chat_orchestrator",
            "user_id": "user_123",
            "session_id": "session_1",
            "new_message": {
                "role": "user",
                "parts": [{"text": "hi"}],
            },
            "streaming": false,
        })
    );
}

#[test]
fn run_request_keeps_text_verbatim() {
    let client = client();
    let inputs = [
        "What are my perks?",
        "multi\nline   spacing\tkept",
        "emoji 💳 and ünïcödé",
        "  leading and trailing spaces stay  ",
    ];

    for input in inputs {
        let request = client
            .run_request(input, "session_1")
            .expect("run request should build");
        let http_request = client
            .build_request(&request)
            .expect("build request")
            .build()
            .expect("request");
        let body = request_body_json(&http_request);

        assert_eq!(body["new_message"]["parts"][0]["text"], Value::from(input));
        assert_eq!(body["new_message"]["role"], "user");
        assert_eq!(body["streaming"], Value::Bool(false));
    }
}

#[test]
fn run_request_uses_configured_identifiers() {
    let config = OrchestratorConfig::new("http://localhost:9000")
        .with_app_name("bank_app")
        .with_user_id("user_42");
    let client = OrchestratorClient::new(config).expect("client");

    let request = client
        .run_request("balance?", "session_9")
        .expect("run request should build");

    assert_eq!(request.app_name, "bank_app");
    assert_eq!(request.user_id, "user_42");
    assert_eq!(request.session_id, "session_9");
    assert_eq!(request.new_message.role, MessageRole::User);
    assert!(!request.streaming);
}

#[test]
fn run_request_rejects_blank_text_and_session() {
    let client = client();

    assert!(matches!(
        client.run_request("   ", "session_1"),
        Err(OrchestratorApiError::EmptyMessage)
    ));
    assert!(matches!(
        client.run_request("hi", ""),
        Err(OrchestratorApiError::MissingSessionId)
    ));
}

#[test]
fn build_request_rejects_blank_configured_identifiers() {
    let config = OrchestratorConfig::default().with_app_name("  ");
    let client = OrchestratorClient::new(config).expect("client");
    let request = client
        .run_request("hi", "session_1")
        .expect("run request should build");

    let error = client
        .build_request(&request)
        .expect_err("blank app name should fail preflight");
    assert!(matches!(error, OrchestratorApiError::MissingAppName));
}

fn client() -> OrchestratorClient {
    OrchestratorClient::new(OrchestratorConfig::default()).expect("client")
}

fn request_body_json(request: &reqwest::Request) -> Value {
    let body = request
        .body()
        .expect("request should carry JSON body")
        .as_bytes()
        .expect("JSON body should be buffered bytes");
    serde_json::from_slice::<Value>(body).expect("request body should be valid JSON")
}
