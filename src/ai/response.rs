//! Parsing of model responses

use serde::Deserialize;

use crate::error::{PolishError, Result};

/// Title and body parsed from a combined response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrContent {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct PrContentJson {
    title: String,
    #[serde(default)]
    body: String,
}

/// Extract JSON content from a response (handles markdown code blocks)
fn extract_json_from_markdown(response: &str) -> String {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```json") {
        let rest = &trimmed[start + "```json".len()..];
        let content = rest.find("```").map(|end| &rest[..end]).unwrap_or(rest);
        let json = content.trim();
        if json.starts_with('{') {
            return json.to_string();
        }
    }

    if !trimmed.contains("```json") {
        if let Some(start) = trimmed.find("```") {
            let rest = &trimmed[start + 3..];
            let content = rest.find("```").map(|end| &rest[..end]).unwrap_or(rest);
            let json = content.trim();
            if json.starts_with('{') {
                return json.to_string();
            }
        }
    }

    // Raw object anywhere in the response
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}

/// Parse a `{"title": ..., "body": ...}` response
pub fn parse_pr_content(response: &str) -> Result<PrContent> {
    let json_str = extract_json_from_markdown(response);

    if !json_str.starts_with('{') {
        return Err(PolishError::Api(format!(
            "response doesn't contain valid JSON. Got: {}",
            preview(response, 100)
        )));
    }

    if let Ok(parsed) = serde_json::from_str::<PrContentJson>(&json_str) {
        return Ok(PrContent {
            title: parsed.title,
            body: parsed.body,
        });
    }

    // Malformed JSON: pull the fields out by hand
    if let Some(title) = extract_json_field(&json_str, "title") {
        return Ok(PrContent {
            title,
            body: extract_json_field(&json_str, "body").unwrap_or_default(),
        });
    }

    Err(PolishError::Api(format!(
        "failed to parse response. Preview: {}...",
        preview(&json_str, 200)
    )))
}

/// Extract a string field from potentially malformed JSON
fn extract_json_field(json: &str, field: &str) -> Option<String> {
    let pattern = format!(r#""{}"\s*:\s*""#, regex::escape(field));
    let re = regex::Regex::new(&pattern).ok()?;
    let m = re.find(json)?;

    let mut value = String::new();
    let mut escaped = false;
    for c in json[m.end()..].chars() {
        if escaped {
            value.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
            value.push(c);
        } else if c == '"' {
            break;
        } else {
            value.push(c);
        }
    }

    Some(
        value
            .replace("\\n", "\n")
            .replace("\\r", "\r")
            .replace("\\t", "\t")
            .replace("\\\"", "\"")
            .replace("\\\\", "\\"),
    )
}

/// Turn a raw model reply into a single-line title
pub fn clean_title(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let line = line
        .trim_start_matches("Title:")
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

fn preview(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
