use orchestrator_api::headers::{
    build_headers, default_user_agent, HEADER_ACCEPT, HEADER_CONTENT_TYPE, HEADER_USER_AGENT,
};
use orchestrator_api::OrchestratorConfig;

#[test]
fn header_map_contains_json_headers() {
    let config = OrchestratorConfig::default().insert_header("X-Extra", " value ");

    let headers = build_headers(&config, None);
    assert_eq!(
        headers.get(HEADER_CONTENT_TYPE).expect("content-type"),
        &"application/json".to_owned()
    );
    assert_eq!(
        headers.get(HEADER_ACCEPT).expect("accept"),
        &"application/json".to_owned()
    );
    assert_eq!(headers.get("x-extra").expect("custom"), &"value".to_owned());
}

#[test]
fn header_map_prefers_explicit_user_agent() {
    let config = OrchestratorConfig::default().with_user_agent("configured-agent");

    let explicit = build_headers(&config, Some("test-agent"));
    assert_eq!(
        explicit.get(HEADER_USER_AGENT).expect("user-agent"),
        &"test-agent".to_string()
    );

    let configured = build_headers(&config, None);
    assert_eq!(
        configured.get(HEADER_USER_AGENT).expect("user-agent"),
        &"configured-agent".to_string()
    );
}

#[test]
fn header_map_falls_back_to_client_user_agent() {
    let headers = build_headers(&OrchestratorConfig::default(), Some("   "));
    let user_agent = headers.get(HEADER_USER_AGENT).expect("user-agent");

    assert_eq!(user_agent, &default_user_agent());
    assert!(user_agent.starts_with("chat-widget/"));
}
