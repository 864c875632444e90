pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5001";

/// Base URL of the statement service, `TREZO_API_URL` override first.
/// Trailing slashes are trimmed so endpoint joining stays predictable.
pub fn resolve_api_url(url_override: Option<&str>) -> String {
    let raw = match url_override {
        Some(value) => value.to_string(),
        None => match std::env::var("TREZO_API_URL") {
            Ok(value) if !value.trim().is_empty() => value,
            _ => DEFAULT_API_URL.to_string(),
        },
    };
    raw.trim_end_matches('/').to_string()
}
