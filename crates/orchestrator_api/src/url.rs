/// Default base URL for a locally running orchestrator.
pub const DEFAULT_ORCHESTRATOR_BASE_URL: &str = "http://localhost:8090";

const RUN_PATH: &str = "/run";
const HEALTH_PATH: &str = "/health";

/// Normalize a base URL to the orchestrator run endpoint.
///
/// Normalization rules:
/// 1) blank input falls back to [`DEFAULT_ORCHESTRATOR_BASE_URL`]
/// 2) trailing slashes are dropped
/// 3) keep `/run` unchanged, append it otherwise
pub fn normalize_run_url(input: &str) -> String {
    let trimmed = base_without_endpoint(input);
    format!("{trimmed}{RUN_PATH}")
}

/// Normalize a base URL (or a run URL) to the orchestrator health endpoint.
pub fn normalize_health_url(input: &str) -> String {
    let trimmed = base_without_endpoint(input);
    format!("{trimmed}{HEALTH_PATH}")
}

fn base_without_endpoint(input: &str) -> &str {
    let base = if input.trim().is_empty() {
        DEFAULT_ORCHESTRATOR_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    trimmed
        .strip_suffix(RUN_PATH)
        .or_else(|| trimmed.strip_suffix(HEALTH_PATH))
        .unwrap_or(trimmed)
}
