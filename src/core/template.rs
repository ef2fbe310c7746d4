//! PR template resolution
//!
//! Resolution order for descriptions:
//! 1. The `--template` value (inline text or a file path)
//! 2. A template checked into the repository
//! 3. The built-in skeleton
//!
//! Only an explicit path that does not exist is an error; everything else
//! falls through to the next option.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PolishError, Result};

/// Standard locations for repository PR templates, in order of precedence
const PR_TEMPLATE_PATHS: &[&str] = &[
    ".github/pull_request_template.md",
    ".github/PULL_REQUEST_TEMPLATE.md",
    "docs/pull_request_template.md",
    "pull_request_template.md",
];

/// Extensions that mark a `--template` value as a file path
const TEMPLATE_EXTENSIONS: &[&str] = &["md", "markdown", "txt", "tmpl", "template"];

/// Placeholder text under the related-resources heading
pub const RELATED_PLACEHOLDER: &str = "(Add links to issues, docs, or tickets here if relevant.)";

/// Built-in description skeleton
pub const DEFAULT_TEMPLATE: &str = "# Summary
{summary}

# Related Resources
{related_resources}

# Changes
{changes}

# Testing
{testing}

# Out of Scope
(Note any related work not addressed in this PR.)";

/// Section headings every default-template description must contain
pub const REQUIRED_SECTIONS: &[&str] = &[
    "# Summary",
    "# Related Resources",
    "# Changes",
    "# Testing",
    "# Out of Scope",
];

/// Where a template came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// Passed with `--template`
    Explicit,
    /// Found in the repository
    Repository(PathBuf),
    /// Built-in skeleton
    Default,
}

/// A resolved template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub text: String,
    pub origin: TemplateOrigin,
}

impl Template {
    /// The built-in description skeleton
    pub fn builtin() -> Self {
        Self {
            text: DEFAULT_TEMPLATE.to_string(),
            origin: TemplateOrigin::Default,
        }
    }

    pub fn is_default(&self) -> bool {
        self.origin == TemplateOrigin::Default
    }

    /// Whether the template uses any known placeholder
    pub fn has_placeholders(&self) -> bool {
        PLACEHOLDERS.iter().any(|p| self.text.contains(p))
    }

    /// Substitute known placeholders, leaving any other `{...}` untouched
    pub fn render(&self, values: &TemplateValues) -> String {
        let mut out = self.text.clone();
        for (placeholder, value) in values.pairs() {
            out = out.replace(placeholder, value);
        }
        out
    }
}

/// Placeholders understood by [`Template::render`]
pub const PLACEHOLDERS: &[&str] = &[
    "{branch_name}",
    "{commit_messages}",
    "{changed_files}",
    "{summary}",
    "{changes}",
    "{testing}",
    "{related_resources}",
    "{files_summary}",
    "{diff_stat}",
];

/// Values substituted into a template
#[derive(Debug, Clone, Default)]
pub struct TemplateValues {
    pub branch_name: String,
    pub commit_messages: String,
    pub changed_files: String,
    pub summary: String,
    pub changes: String,
    pub testing: String,
    pub related_resources: String,
    pub files_summary: String,
    pub diff_stat: String,
}

impl TemplateValues {
    fn pairs(&self) -> [(&'static str, &str); 9] {
        [
            ("{branch_name}", self.branch_name.as_str()),
            ("{commit_messages}", self.commit_messages.as_str()),
            ("{changed_files}", self.changed_files.as_str()),
            ("{summary}", self.summary.as_str()),
            ("{changes}", self.changes.as_str()),
            ("{testing}", self.testing.as_str()),
            ("{related_resources}", self.related_resources.as_str()),
            ("{files_summary}", self.files_summary.as_str()),
            ("{diff_stat}", self.diff_stat.as_str()),
        ]
    }
}

/// Resolve the description template
pub fn resolve_description_template(explicit: Option<&str>, repo_root: &Path) -> Result<Template> {
    if let Some(template) = load_explicit(explicit)? {
        return Ok(template);
    }

    if let Some((path, text)) = detect_pr_template(repo_root) {
        debug!(path = %path.display(), "using repository PR template");
        return Ok(Template {
            text,
            origin: TemplateOrigin::Repository(path),
        });
    }

    Ok(Template::builtin())
}

/// Resolve the title template; titles have no repository or built-in template
pub fn resolve_title_template(explicit: Option<&str>) -> Result<Option<Template>> {
    load_explicit(explicit)
}

fn load_explicit(explicit: Option<&str>) -> Result<Option<Template>> {
    let Some(value) = explicit.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };

    let path = Path::new(value);
    if path.is_file() {
        let text = fs::read_to_string(path)?;
        debug!(path = %path.display(), "using template file");
        return Ok(Some(Template {
            text,
            origin: TemplateOrigin::Explicit,
        }));
    }

    if looks_like_path(value) {
        return Err(PolishError::TemplateNotFound(path.to_path_buf()));
    }

    Ok(Some(Template {
        text: value.to_string(),
        origin: TemplateOrigin::Explicit,
    }))
}

/// Whether a `--template` value was meant as a file path rather than inline text
fn looks_like_path(value: &str) -> bool {
    if value.contains('\n') || value.contains('{') {
        return false;
    }
    let trimmed = value.trim();
    if trimmed.contains('/') || trimmed.contains('\\') {
        return true;
    }
    Path::new(trimmed)
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            TEMPLATE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Detect a PR template checked into the repository
///
/// Returns the path and content of the first readable candidate.
pub fn detect_pr_template(repo_root: &Path) -> Option<(PathBuf, String)> {
    for template_path in PR_TEMPLATE_PATHS {
        let full_path = repo_root.join(template_path);
        if full_path.is_file() {
            match fs::read_to_string(&full_path) {
                Ok(content) => return Some((full_path, content)),
                Err(_) => continue,
            }
        }
    }
    None
}
