//! End-to-end tests for the prpolish binary

mod support;

use predicates::prelude::*;
use support::{prpolish_in, Workspace};
use tempfile::TempDir;

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    prpolish_in(dir.path(), home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate-title"))
        .stdout(predicate::str::contains("generate-desc"))
        .stdout(predicate::str::contains("vibe-check"))
        .stdout(predicate::str::contains("setup-gh"));
}

#[test]
fn test_generate_outside_repository() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    prpolish_in(dir.path(), home.path())
        .arg("generate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must be run inside a Git repository"));
}

#[test]
fn test_heuristic_title_without_api_key() {
    let ws = Workspace::new().with_login_branch();

    ws.cmd()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("feat: add login (+1 more commit)"))
        .stdout(predicate::str::contains("# Summary"))
        .stderr(predicate::str::contains("Warning").not());
}

#[test]
fn test_missing_template_aborts_before_generation() {
    let ws = Workspace::new().with_login_branch();

    ws.cmd()
        .args(["generate", "--template", "missing.md", "--save"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Template file not found: missing.md"))
        .stdout(predicate::str::contains("feat: add login").not());

    assert!(ws.drafts().is_empty());
}

#[test]
fn test_save_both_writes_two_drafts() {
    let ws = Workspace::new().with_login_branch();

    ws.cmd().args(["generate", "--save"]).assert().success();

    let drafts = ws.drafts();
    assert_eq!(drafts.len(), 2);
    let title = std::fs::read_to_string(ws.path().join("PR_TITLE_DRAFT.txt")).unwrap();
    assert_eq!(title.trim(), "feat: add login (+1 more commit)");
}

#[test]
fn test_save_title_writes_one_draft() {
    let ws = Workspace::new().with_login_branch();

    ws.cmd()
        .args(["generate", "--save", "title"])
        .assert()
        .success();
    assert_eq!(ws.drafts(), vec![ws.path().join("PR_TITLE_DRAFT.txt")]);
}

#[test]
fn test_generate_title_save_defaults_to_title() {
    let ws = Workspace::new().with_login_branch();

    ws.cmd()
        .args(["generate-title", "-s"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feat: add login (+1 more commit)"));
    assert_eq!(ws.drafts(), vec![ws.path().join("PR_TITLE_DRAFT.txt")]);
}

#[test]
fn test_generate_title_rejects_description_save() {
    let ws = Workspace::new().with_login_branch();

    ws.cmd()
        .args(["generate-title", "--save", "description"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--save description is not available here"));
    assert!(ws.drafts().is_empty());
}

#[test]
fn test_generate_desc_with_inline_template() {
    let ws = Workspace::new().with_login_branch();

    ws.cmd()
        .args(["generate-desc", "--template", "Branch {branch_name}: {commit_messages}", "-s"])
        .assert()
        .success();

    let desc = std::fs::read_to_string(ws.path().join("PR_DESCRIPTION_DRAFT.txt")).unwrap();
    assert_eq!(desc.trim(), "Branch feat/login: fix: typo\nfeat: add login");
}

#[test]
fn test_repository_template_is_used() {
    let ws = Workspace::new();
    ws.commit(
        ".github/pull_request_template.md",
        "## What\n\n## Checklist\n- [ ] tests\n",
        "chore: add PR template",
    );
    let ws = ws.with_login_branch();

    ws.cmd()
        .arg("generate-desc")
        .assert()
        .success()
        .stdout(predicate::str::contains("## What\nfix: typo"))
        .stdout(predicate::str::contains("- [ ] tests"));
}

#[test]
fn test_base_branch_has_no_changes() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes detected on this branch."));
}

#[test]
fn test_vibe_check_requires_api_key() {
    let ws = Workspace::new().with_login_branch();

    ws.cmd()
        .arg("vibe-check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_unreachable_api_falls_back_with_warning() {
    let ws = Workspace::new().with_login_branch();

    ws.cmd()
        .arg("generate")
        .env("OPENAI_API_KEY", "sk-test")
        .env("OPENAI_BASE_URL", "http://127.0.0.1:9/v1")
        .assert()
        .success()
        .stdout(predicate::str::contains("feat: add login (+1 more commit)"))
        .stderr(predicate::str::contains(
            "Warning: AI generation failed, using heuristic output instead",
        ));
}

#[test]
fn test_config_set_get_remove() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    prpolish_in(dir.path(), home.path())
        .args(["config", "set", "model", "gpt-4o-mini"])
        .assert()
        .success()
        .stdout(predicate::str::contains("model set to: gpt-4o-mini"));

    prpolish_in(dir.path(), home.path())
        .args(["config", "get", "model"])
        .assert()
        .success()
        .stdout(predicate::str::contains("model: gpt-4o-mini"))
        .stdout(predicate::str::contains("OpenAI API key: Not configured"));

    prpolish_in(dir.path(), home.path())
        .args(["config", "remove", "model"])
        .assert()
        .success()
        .stdout(predicate::str::contains("model reset to default: gpt-3.5-turbo"));
}

#[test]
fn test_config_rejects_bad_api_base() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    prpolish_in(dir.path(), home.path())
        .args(["config", "set", "api-base", "ftp://example.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid API base URL"));
}

#[cfg(unix)]
#[test]
fn test_fast_mode_surfaces_pr_cli_failure() {
    let ws = Workspace::new().with_login_branch();
    let remote = ws.add_bare_remote();
    let cli = ws.fake_pr_cli(
        r#"case "$1" in
  --version|auth) exit 0 ;;
  pr) echo "GraphQL: base branch not found" >&2; exit 4 ;;
esac"#,
    );

    ws.cmd()
        .args(["config", "set", "pr-cli", cli.to_str().unwrap()])
        .assert()
        .success();

    ws.cmd()
        .args(["generate", "--fast", "--save"])
        .assert()
        .code(4)
        .stdout(predicate::str::contains("✓ Branch pushed"))
        .stderr(predicate::str::contains("pr create` failed with exit code 4"))
        .stderr(predicate::str::contains("GraphQL: base branch not found"))
        .stderr(predicate::str::contains("Create the pull request manually with:"))
        .stderr(predicate::str::contains("feat: add login (+1 more commit)"));

    assert_eq!(ws.drafts().len(), 2);
    let pushed = git2::Repository::open_bare(remote.path()).unwrap();
    assert!(pushed.find_reference("refs/heads/feat/login").is_ok());
}

#[cfg(unix)]
#[test]
fn test_fast_mode_writes_drafts_before_failed_push() {
    let ws = Workspace::new().with_login_branch();
    let cli = ws.fake_pr_cli(r#"case "$1" in --version|auth) exit 0 ;; *) exit 9 ;; esac"#);

    ws.cmd()
        .args(["config", "set", "pr-cli", cli.to_str().unwrap()])
        .assert()
        .success();

    // No remote configured, so the push fails after drafts are saved
    ws.cmd()
        .args(["generate-desc", "--fast", "--save"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("`git push -u` failed"))
        .stderr(predicate::str::contains("Create the pull request manually with:"));

    assert_eq!(ws.drafts(), vec![ws.path().join("PR_DESCRIPTION_DRAFT.txt")]);
}
