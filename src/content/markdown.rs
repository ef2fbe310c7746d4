//! Markdown helpers for descriptions

use crate::core::template::{RELATED_PLACEHOLDER, REQUIRED_SECTIONS};

const RELATED_HEADING: &str = "# Related Resources";

/// Remove a ```` ```markdown ```` / ```` ``` ```` wrapper around model output
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // Drop the info string on the opening fence
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => return trimmed.to_string(),
    };
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}

/// Whether every default-template heading is present
pub fn has_required_sections(text: &str) -> bool {
    REQUIRED_SECTIONS
        .iter()
        .all(|heading| text.lines().any(|line| line.trim() == *heading))
}

/// Line range of the related-resources section, heading included
fn related_section_range(lines: &[&str]) -> Option<(usize, usize)> {
    let start = lines
        .iter()
        .position(|line| line.trim().eq_ignore_ascii_case(RELATED_HEADING))?;
    let end = lines[start + 1..]
        .iter()
        .position(|line| line.starts_with("# "))
        .map(|offset| start + 1 + offset)
        .unwrap_or(lines.len());
    Some((start, end))
}

/// Body of the related-resources section, if the section exists
pub fn related_section_body(description: &str) -> Option<String> {
    let lines: Vec<&str> = description.lines().collect();
    let (start, end) = related_section_range(&lines)?;
    Some(lines[start + 1..end].join("\n").trim().to_string())
}

/// Replace the body of the related-resources section
///
/// Returns the description unchanged when there is no such section.
pub fn replace_related_section(description: &str, body: &str) -> String {
    let lines: Vec<&str> = description.lines().collect();
    let Some((start, end)) = related_section_range(&lines) else {
        return description.to_string();
    };

    let mut out: Vec<&str> = lines[..=start].to_vec();
    out.extend(body.lines());
    if end < lines.len() {
        out.push("");
        out.extend(&lines[end..]);
    }
    out.join("\n")
}

/// Drop the related-resources section when it holds only the placeholder
pub fn remove_placeholder_related_section(description: &str) -> String {
    let lines: Vec<&str> = description.lines().collect();
    let Some((start, end)) = related_section_range(&lines) else {
        return description.to_string();
    };

    let body = lines[start + 1..end].join("\n");
    let body = body.trim();
    if !body.is_empty() && body != RELATED_PLACEHOLDER {
        return description.to_string();
    }

    let mut out: Vec<&str> = lines[..start].to_vec();
    out.extend(&lines[end..]);
    out.join("\n").trim().to_string()
}
