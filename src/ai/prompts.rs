//! Prompt templates for AI generation

use crate::ai::diff::{fit_diff, MAX_DIFF_CHARS};
use crate::core::context::BranchContext;
use crate::core::template::Template;

/// System message sent with every request
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Token budgets per request kind
pub const TITLE_MAX_TOKENS: u32 = 64;
pub const DESCRIPTION_MAX_TOKENS: u32 = 768;
pub const COMBINED_MAX_TOKENS: u32 = 1024;
pub const VIBE_MAX_TOKENS: u32 = 256;

pub const GENERATION_TEMPERATURE: f32 = 0.2;
pub const VIBE_TEMPERATURE: f32 = 0.5;

/// Shared context block appended to every generation prompt
fn context_block(ctx: &BranchContext) -> String {
    let commits = if ctx.commits.is_empty() {
        "(none)".to_string()
    } else {
        ctx.subjects()
            .iter()
            .map(|s| format!("  - {s}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let files = if ctx.changed_files.is_empty() {
        "(none)".to_string()
    } else {
        ctx.changed_files.join(", ")
    };
    let diff = fit_diff(&ctx.diff, MAX_DIFF_CHARS);

    format!(
        r#"**Context:**
- Branch: `{branch}` (compared against `{base}`)
- Commit messages:
{commits}
- Changed files: {files}
- Diff stat: {stat}

Diff:
```
{diff}
```"#,
        branch = ctx.branch,
        base = ctx.base,
        stat = ctx.diff_summary,
    )
}

fn template_guide(template: Option<&Template>, what: &str) -> String {
    match template {
        Some(t) => format!("\nUse the following template as a guide for the {what}:\n{}\n", t.text),
        None => String::new(),
    }
}

/// Section rules for descriptions
fn description_rules(template: &Template) -> String {
    if template.is_default() {
        r#"Format the description in Markdown with exactly these section headings (do not add or remove sections):

# Summary
# Related Resources
# Changes
# Testing
# Out of Scope"#
            .to_string()
    } else {
        format!(
            "Format the description in Markdown following the structure of this template:\n{}",
            template.text
        )
    }
}

const DESCRIPTION_GUIDELINES: &str = r#"- ONLY use the information provided below. Do NOT invent, search, or assume any additional information.
- Start with a concise summary of what changed and why.
- Add a section for related resources (links to issues, docs, tickets) if any are present.
- Break down the changes in bullet points, explaining what, why, and how.
- Include a section on testing: how to test, scenarios considered, or what should be tested.
- Mention any out-of-scope work."#;

const TITLE_GUIDELINES: &str = r#"- Be concise and descriptive (ideally under 50 characters, max 80).
- Use imperative mood ("add", "fix", "update").
- Follow conventional commit style: prefix with feat, fix, docs, chore, etc.
- Reference issues or tickets if present (e.g. closes #123).
- Do NOT invent or assume extra context."#;

/// Prompt for a title alone
pub fn title_prompt(ctx: &BranchContext, template: Option<&Template>) -> String {
    format!(
        r#"You are an expert software engineer. Write a pull request TITLE for the following changes.

Requirements:
{TITLE_GUIDELINES}
- Respond with the title only, on a single line, without quotes.

{context}
{guide}"#,
        context = context_block(ctx),
        guide = template_guide(template, "title"),
    )
}

/// Prompt for a description alone
pub fn description_prompt(ctx: &BranchContext, template: &Template) -> String {
    format!(
        r#"You are an expert software engineer and code reviewer. Write a professional pull request description for the following changes.

Requirements:
{DESCRIPTION_GUIDELINES}

{rules}

Respond with the Markdown description only.

{context}"#,
        rules = description_rules(template),
        context = context_block(ctx),
    )
}

/// Prompt for title and description in one request
pub fn pr_content_prompt(ctx: &BranchContext, template: &Template) -> String {
    format!(
        r#"You are an expert software engineer and code reviewer. Write a pull request title and description for the following changes.

Requirements for the title:
{TITLE_GUIDELINES}

Requirements for the description:
{DESCRIPTION_GUIDELINES}

{rules}

{context}

Respond in this exact JSON format:
{{
  "title": "PR title here",
  "body": "PR description in Markdown here"
}}"#,
        rules = description_rules(template),
        context = context_block(ctx),
    )
}

/// Prompt for the vibe check review
pub fn vibe_check_prompt(ctx: &BranchContext) -> String {
    let commits = ctx
        .subjects()
        .iter()
        .map(|s| format!("  - {s}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an expert code reviewer. Analyze the following commit messages and changed files for pull request quality issues.

Instructions:
- Be concise and direct.
- Return a markdown bullet list of actionable warnings or suggestions, one per line starting with "- ".
- Flag low-quality or vague commit messages (for example "wip", "fix", "final", "pls work", "temp", "test").
- If more than 10 files are changed and no test files are present, flag it. If no test files are present at all, mention it.
- Flag commit messages that are empty or placeholders (like "." or "-").
- If everything looks good, say so in a single bullet.

**Context:**
- Commit messages:
{commits}
- Changed files: {files}
- Test files: {tests}"#,
        files = ctx.changed_files.join(", "),
        tests = match ctx.test_files() {
            t if t.is_empty() => "(none)".to_string(),
            t => t.join(", "),
        },
    )
}
