//! OpenAI API error classification
//!
//! Turns raw HTTP status codes and error bodies into actionable messages.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;

use crate::error::PolishError;

/// Extracts `"message": "..."` from an OpenAI error body
static ERROR_MESSAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""message"\s*:\s*"((?:[^"\\]|\\.)*)""#)
        .expect("Invalid regex pattern for API error message")
});

/// Classify a non-success API response into a [`PolishError::Api`]
pub fn classify_api_error(status: StatusCode, body: &str) -> PolishError {
    let detail = extract_error_message(body).unwrap_or_else(|| preview(body));

    let message = if status == StatusCode::UNAUTHORIZED {
        format!("the API key was rejected ({})", detail)
    } else if is_quota_error(body) {
        format!("the account has no remaining quota ({})", detail)
    } else if status == StatusCode::TOO_MANY_REQUESTS || is_rate_limit_error(body) {
        format!("rate limit exceeded, wait a moment and try again ({})", detail)
    } else if status == StatusCode::NOT_FOUND && is_model_error(body) {
        format!("the configured model is not available ({})", detail)
    } else {
        format!("API error ({}): {}", status, detail)
    };

    PolishError::Api(message)
}

fn extract_error_message(body: &str) -> Option<String> {
    ERROR_MESSAGE_PATTERN
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace("\\\"", "\""))
        .filter(|m| !m.is_empty())
}

fn is_rate_limit_error(body: &str) -> bool {
    body.contains("rate_limit") || body.contains("Rate limit")
}

fn is_quota_error(body: &str) -> bool {
    body.contains("insufficient_quota")
}

fn is_model_error(body: &str) -> bool {
    body.contains("model_not_found") || body.contains("does not exist")
}

fn preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(200).collect()
}
