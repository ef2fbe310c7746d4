//! Related resource detection and labelling

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::context::BranchContext;

/// `#123`, `ABC-123` and plain links
static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\d+|\b[A-Z]{2,}-\d+\b|https?://[^\s)>\]]+")
        .expect("Invalid regex pattern for resource references")
});

/// Issue references only, used in titles
static ISSUE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\d+|\b[A-Z]{2,}-\d+\b").expect("Invalid regex pattern for issue references")
});

static LABEL_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)jira\.|atlassian\.net/browse", "Jira Ticket"),
        (r"(?i)confluence|atlassian\.net/wiki", "Documentation"),
        (r"(?i)drive\.google\.com|docs\.google\.com", "Documentation"),
        (r"(?i)github\.com/[^/\s]+/[^/\s]+/issues/", "GitHub Issue"),
        (r"(?i)linear\.app", "Linear Ticket"),
    ]
    .into_iter()
    .map(|(pattern, label)| {
        (
            Regex::new(pattern).expect("Invalid regex pattern for resource label"),
            label,
        )
    })
    .collect()
});

/// References found in commit messages, the branch name and file names
pub fn detect_related_resources(ctx: &BranchContext) -> Vec<String> {
    let sources = ctx
        .commits
        .iter()
        .chain(std::iter::once(&ctx.branch))
        .chain(ctx.changed_files.iter());

    let found: BTreeSet<String> = sources
        .flat_map(|text| REFERENCE_PATTERN.find_iter(text))
        .map(|m| m.as_str().to_string())
        .collect();
    found.into_iter().collect()
}

/// Issue references (`#123`, `ABC-123`) in `text`, in order of appearance
pub fn issue_references(text: &str) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();
    for m in ISSUE_PATTERN.find_iter(text) {
        if !refs.iter().any(|r| r == m.as_str()) {
            refs.push(m.as_str().to_string());
        }
    }
    refs
}

/// Split user-entered lines into labelled links and everything else
pub fn label_resource_links(lines: &[String]) -> (Vec<String>, Vec<String>) {
    let mut labeled = Vec::new();
    let mut other = Vec::new();

    for line in lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        match LABEL_RULES.iter().find(|(re, _)| re.is_match(line)) {
            Some((_, label)) => labeled.push(format!("{}: {}", label, line)),
            None => other.push(line.to_string()),
        }
    }

    (labeled, other)
}

/// Body of the related-resources section for user-entered lines
pub fn format_related_resources(lines: &[String]) -> String {
    let (labeled, other) = label_resource_links(lines);
    let mut out: Vec<String> = labeled.iter().map(|l| format!("- {l}")).collect();

    if !other.is_empty() {
        if !out.is_empty() {
            out.push(String::new());
        }
        out.push("## Other".to_string());
        out.extend(other.iter().map(|l| format!("- {l}")));
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::context;

    #[test]
    fn test_detect_related_resources() {
        let ctx = context(
            "feature/PROJ-42-login",
            &["fix: crash (#12)", "docs: see https://example.com/spec for details"],
            &["docs/ADR-7.md"],
        );
        assert_eq!(
            detect_related_resources(&ctx),
            vec!["#12", "ADR-7", "PROJ-42", "https://example.com/spec"]
        );
    }

    #[test]
    fn test_detect_nothing() {
        let ctx = context("topic", &["chore: tidy"], &["src/lib.rs"]);
        assert!(detect_related_resources(&ctx).is_empty());
    }

    #[test]
    fn test_issue_references_dedup() {
        assert_eq!(
            issue_references("fix #3 and ABC-9, again #3"),
            vec!["#3", "ABC-9"]
        );
    }

    #[test]
    fn test_label_resource_links() {
        let lines = vec![
            "https://acme.atlassian.net/browse/PAY-1".to_string(),
            "https://github.com/acme/app/issues/7".to_string(),
            "https://linear.app/acme/issue/ENG-3".to_string(),
            "https://docs.google.com/document/d/abc".to_string(),
            "  ".to_string(),
            "see the standup notes".to_string(),
        ];
        let (labeled, other) = label_resource_links(&lines);
        assert_eq!(
            labeled,
            vec![
                "Jira Ticket: https://acme.atlassian.net/browse/PAY-1",
                "GitHub Issue: https://github.com/acme/app/issues/7",
                "Linear Ticket: https://linear.app/acme/issue/ENG-3",
                "Documentation: https://docs.google.com/document/d/abc",
            ]
        );
        assert_eq!(other, vec!["see the standup notes"]);
    }

    #[test]
    fn test_format_related_resources() {
        let lines = vec![
            "https://github.com/acme/app/issues/7".to_string(),
            "internal notes".to_string(),
        ];
        assert_eq!(
            format_related_resources(&lines),
            "- GitHub Issue: https://github.com/acme/app/issues/7\n\n## Other\n- internal notes"
        );
    }
}
