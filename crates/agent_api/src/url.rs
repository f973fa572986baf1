/// Default base URL of a locally running agent backend.
pub const DEFAULT_AGENT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Path of the agent endpoint relative to the base URL.
pub const AGENT_PATH: &str = "/agent";

/// Normalize a base URL to the agent endpoint.
///
/// Normalization rules:
/// 1) an empty input means [`DEFAULT_AGENT_BASE_URL`]
/// 2) keep a URL already ending in `/agent` unchanged
/// 3) append `/agent` otherwise
pub fn normalize_agent_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_AGENT_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with(AGENT_PATH) {
        return trimmed.to_string();
    }
    format!("{trimmed}{AGENT_PATH}")
}
