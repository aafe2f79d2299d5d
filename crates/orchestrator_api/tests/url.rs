use orchestrator_api::{normalize_health_url, normalize_run_url};

#[test]
fn url_normalization_keeps_existing_run_endpoint() {
    assert_eq!(
        normalize_run_url("http://localhost:8090/run"),
        "http://localhost:8090/run"
    );
}

#[test]
fn url_normalization_appends_run_to_base() {
    assert_eq!(
        normalize_run_url("http://localhost:8090"),
        "http://localhost:8090/run"
    );
    assert_eq!(
        normalize_run_url("https://orchestrator.example.com/api//"),
        "https://orchestrator.example.com/api/run"
    );
}

#[test]
fn url_normalization_defaults_blank_base() {
    assert_eq!(normalize_run_url("  "), "http://localhost:8090/run");
    assert_eq!(normalize_health_url(""), "http://localhost:8090/health");
}

#[test]
fn health_url_replaces_run_suffix() {
    assert_eq!(
        normalize_health_url("http://localhost:8090/run/"),
        "http://localhost:8090/health"
    );
    assert_eq!(
        normalize_health_url("http://localhost:8090/health"),
        "http://localhost:8090/health"
    );
}
