//! Heuristic title and description generation
//!
//! Used when no API key is configured and as the fallback when the model
//! fails. Everything here is a pure function of the branch context.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::content::resources::{detect_related_resources, issue_references};
use crate::core::context::BranchContext;
use crate::core::template::{Template, TemplateValues, RELATED_PLACEHOLDER};

/// Maximum title length in characters
pub const MAX_TITLE_CHARS: usize = 80;

/// Title used when there is nothing to go on
pub const FALLBACK_TITLE: &str = "chore: update code";

const MIN_GOOD_COMMIT_CHARS: usize = 8;
const FILES_IN_SUMMARY: usize = 3;
const TEST_FILES_SHOWN: usize = 2;

/// Conventional commit types, best first
const TYPE_RANK: &[&str] = &[
    "feat", "fix", "perf", "refactor", "docs", "test", "build", "ci", "style", "chore", "revert",
];

static CONVENTIONAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(feat|fix|perf|refactor|docs|test|build|ci|style|chore|revert)(\([^)]*\))?!?:\s+\S")
        .expect("Invalid regex pattern for conventional commits")
});

static BAD_COMMIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)wip|temp|pls work|final|test|update code|bug fix|fix bug|pr for")
        .expect("Invalid regex pattern for low-quality commits")
});

/// Whether a commit subject is fit to become a title
fn is_good_commit(subject: &str) -> bool {
    subject.chars().count() >= MIN_GOOD_COMMIT_CHARS && !BAD_COMMIT_PATTERN.is_match(subject)
}

/// Conventional type of a subject, if it has one
fn commit_type(subject: &str) -> Option<&str> {
    CONVENTIONAL_PATTERN
        .captures(subject)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Lower is better; untyped subjects rank last
fn type_rank(subject: &str) -> usize {
    commit_type(subject)
        .and_then(|t| TYPE_RANK.iter().position(|known| *known == t))
        .unwrap_or(TYPE_RANK.len())
}

/// Best good subject; `min_by_key` keeps the earliest on ties
fn pick_lead<'a>(subjects: &[&'a str]) -> Option<&'a str> {
    subjects
        .iter()
        .copied()
        .filter(|s| is_good_commit(s))
        .min_by_key(|s| type_rank(s))
}

/// Conventional prefix guessed from keywords
fn guess_prefix(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    if lower.contains("fix") {
        "fix"
    } else if lower.contains("add") || lower.contains("implement") || lower.contains("feature") {
        "feat"
    } else if lower.contains("doc") {
        "docs"
    } else if lower.contains("refactor") {
        "refactor"
    } else if lower.contains("test") {
        "test"
    } else {
        "chore"
    }
}

/// Append ` (REF-1, #2)` when there are references
fn with_references(mut title: String, refs: &[String]) -> String {
    if !refs.is_empty() {
        title.push_str(&format!(" ({})", refs.join(", ")));
    }
    title
}

/// Conventional subjects pass through; others get a prefix and their references
fn conventionalize(subject: &str) -> String {
    if commit_type(subject).is_some() {
        return subject.to_string();
    }
    let title = format!("{}: {}", guess_prefix(subject), subject);
    with_references(title, &issue_references(subject))
}

/// Truncate to `max` characters without splitting a char
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}

fn title_from_branch(ctx: &BranchContext) -> Option<String> {
    let branch = ctx.branch.trim();
    if branch.is_empty() {
        return None;
    }

    let lower = branch.to_lowercase();
    let prefix = ["feat", "fix", "docs", "refactor"]
        .into_iter()
        .find(|p| lower.starts_with(p))
        .unwrap_or("chore");

    // Drop a leading "feat/" or "fix-" segment already expressed by the prefix
    let rest = if lower.starts_with(prefix) {
        branch
            .get(prefix.len()..)
            .unwrap_or(branch)
            .trim_start_matches(|c: char| !c.is_alphanumeric())
    } else {
        branch
    };
    let words: Vec<&str> = rest
        .split(|c| c == '-' || c == '_' || c == '/')
        .filter(|w| !w.is_empty())
        .collect();
    let body = if words.is_empty() {
        branch.to_string()
    } else {
        words.join(" ")
    };

    let mut title = format!("{prefix}: {body}");
    if let Some(file) = ctx.changed_files.first() {
        title.push_str(&format!(" [{file}]"));
    }
    let refs: Vec<String> = issue_references(branch)
        .into_iter()
        .filter(|r| !title.contains(r.as_str()))
        .collect();
    Some(with_references(title, &refs))
}

/// Heuristic PR title
pub fn heuristic_title(ctx: &BranchContext, template: Option<&Template>) -> String {
    if let Some(template) = template {
        let rendered = template.render(&title_values(ctx));
        if let Some(line) = rendered.lines().map(str::trim).find(|l| !l.is_empty()) {
            return truncate_chars(line, MAX_TITLE_CHARS);
        }
    }

    let subjects: Vec<&str> = ctx.subjects().into_iter().filter(|s| !s.is_empty()).collect();
    if let Some(lead) = pick_lead(&subjects) {
        let title = conventionalize(lead);
        let others = ctx.commits.len().saturating_sub(1);
        if others == 0 {
            return truncate_chars(&title, MAX_TITLE_CHARS);
        }
        let suffix = format!(
            " (+{} more commit{})",
            others,
            if others == 1 { "" } else { "s" }
        );
        let budget = MAX_TITLE_CHARS.saturating_sub(suffix.chars().count());
        return format!("{}{}", truncate_chars(&title, budget), suffix);
    }

    if let Some(title) = title_from_branch(ctx) {
        return truncate_chars(&title, MAX_TITLE_CHARS);
    }

    FALLBACK_TITLE.to_string()
}

fn title_values(ctx: &BranchContext) -> TemplateValues {
    TemplateValues {
        branch_name: ctx.branch.clone(),
        commit_messages: ctx.subjects().join("; "),
        changed_files: ctx.changed_files.join(", "),
        summary: ctx.subjects().first().map(|s| s.to_string()).unwrap_or_default(),
        files_summary: files_summary(&ctx.changed_files),
        diff_stat: ctx.diff_summary.to_string(),
        ..Default::default()
    }
}

/// `a, b, c, and N more files`
fn files_summary(files: &[String]) -> String {
    let shown: Vec<&str> = files.iter().take(FILES_IN_SUMMARY).map(String::as_str).collect();
    let extra = files.len().saturating_sub(FILES_IN_SUMMARY);
    match extra {
        0 => shown.join(", "),
        1 => format!("{}, and 1 more file", shown.join(", ")),
        n => format!("{}, and {} more files", shown.join(", "), n),
    }
}

fn testing_notes(ctx: &BranchContext) -> String {
    let tests = ctx.test_files();
    if tests.is_empty() {
        return "No test files detected. Please describe how this was tested.".to_string();
    }
    let mut shown = tests
        .iter()
        .take(TEST_FILES_SHOWN)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if tests.len() > TEST_FILES_SHOWN {
        shown.push_str(", ...");
    }
    format!("Test files updated: {shown}")
}

/// Values for rendering a description template
pub fn description_values(ctx: &BranchContext) -> TemplateValues {
    let subjects: Vec<&str> = ctx.subjects().into_iter().filter(|s| !s.is_empty()).collect();

    let summary = match subjects.first() {
        Some(first) => first.to_string(),
        None => format!("Changes on branch `{}`.", ctx.branch),
    };

    let mut changes = subjects
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");
    if !ctx.changed_files.is_empty() {
        if !changes.is_empty() {
            changes.push_str("\n\n");
        }
        changes.push_str(&format!(
            "**Main files changed:** {}",
            files_summary(&ctx.changed_files)
        ));
    }

    let detected = detect_related_resources(ctx);
    let related_resources = if detected.is_empty() {
        RELATED_PLACEHOLDER.to_string()
    } else {
        detected
            .iter()
            .map(|r| format!("- {r}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    TemplateValues {
        branch_name: ctx.branch.clone(),
        commit_messages: subjects.join("\n"),
        changed_files: ctx.changed_files.join("\n"),
        summary,
        changes,
        testing: testing_notes(ctx),
        related_resources,
        files_summary: files_summary(&ctx.changed_files),
        diff_stat: ctx.diff_summary.to_string(),
    }
}

/// Heuristic PR description
pub fn heuristic_description(ctx: &BranchContext, template: &Template) -> String {
    if ctx.commits.is_empty() {
        return "No detailed commit messages found. Consider explaining why this fix matters."
            .to_string();
    }

    let values = description_values(ctx);
    if template.has_placeholders() {
        template.render(&values).trim().to_string()
    } else {
        fill_sections(&template.text, &values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Summary,
    Changes,
    Testing,
}

fn classify_heading(line: &str) -> Option<SectionKind> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('#') {
        return None;
    }
    let title = trimmed.trim_start_matches('#').trim().to_lowercase();
    if title.contains("test") {
        Some(SectionKind::Testing)
    } else if title.contains("change") {
        Some(SectionKind::Changes)
    } else if title.contains("summary") || title.contains("description") || title.starts_with("what")
    {
        Some(SectionKind::Summary)
    } else {
        None
    }
}

/// Fill a placeholder-free template under its matching headings
fn fill_sections(template: &str, values: &TemplateValues) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut filled: Vec<SectionKind> = Vec::new();

    for line in template.lines() {
        out.push(line.to_string());
        let Some(kind) = classify_heading(line) else {
            continue;
        };
        if filled.contains(&kind) {
            continue;
        }
        filled.push(kind);
        let content = match kind {
            SectionKind::Summary => &values.summary,
            SectionKind::Changes => &values.changes,
            SectionKind::Testing => &values.testing,
        };
        out.push(content.clone());
    }

    let mut text = out.join("\n").trim_end().to_string();
    if filled.is_empty() {
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str("## Changes\n");
        text.push_str(&values.changes);
    }
    text
}
