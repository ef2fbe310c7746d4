//! Pull request creation through the GitHub CLI

use std::process::Command;

use tracing::debug;

use crate::core::process::{run_checked, run_interactive};
use crate::error::Result;

/// Where to get the GitHub CLI
pub const INSTALL_URL: &str = "https://cli.github.com/";

/// Parameters for creating a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrParams {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

/// Wrapper around the `gh` executable (or a compatible replacement)
#[derive(Debug, Clone)]
pub struct PrCli {
    program: String,
}

impl PrCli {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether `--version` runs successfully
    pub fn is_installed(&self) -> bool {
        run_checked(Command::new(&self.program).arg("--version")).is_ok()
    }

    /// Whether `auth status` reports a logged-in account
    pub fn is_authenticated(&self) -> bool {
        run_checked(Command::new(&self.program).args(["auth", "status"])).is_ok()
    }

    /// Run the interactive `auth login` flow
    pub fn login(&self) -> Result<()> {
        run_interactive(Command::new(&self.program).args(["auth", "login"]))
    }

    /// Open a pull request, returning the CLI's output (usually the PR URL)
    pub fn create_pr(&self, params: &CreatePrParams) -> Result<String> {
        debug!(head = %params.head, base = %params.base, "creating pull request");
        run_checked(Command::new(&self.program).args(create_args(params)))
    }
}

fn create_args(params: &CreatePrParams) -> Vec<String> {
    vec![
        "pr".to_string(),
        "create".to_string(),
        "--title".to_string(),
        params.title.clone(),
        "--body".to_string(),
        params.body.clone(),
        "--head".to_string(),
        params.head.clone(),
        "--base".to_string(),
        params.base.clone(),
    ]
}

/// Base branch name as the PR CLI expects it (`origin/main` -> `main`)
pub fn base_branch_name<'a>(base: &'a str, remote: &str) -> &'a str {
    base.strip_prefix(remote)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_args() {
        let params = CreatePrParams {
            title: "feat: add login".to_string(),
            body: "# Summary\nAdds login.".to_string(),
            head: "feat/login".to_string(),
            base: "main".to_string(),
        };
        assert_eq!(
            create_args(&params),
            vec![
                "pr",
                "create",
                "--title",
                "feat: add login",
                "--body",
                "# Summary\nAdds login.",
                "--head",
                "feat/login",
                "--base",
                "main"
            ]
        );
    }

    #[test]
    fn test_base_branch_name() {
        assert_eq!(base_branch_name("origin/trunk", "origin"), "trunk");
        assert_eq!(base_branch_name("main", "origin"), "main");
        assert_eq!(base_branch_name("originals", "origin"), "originals");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_cli_surfaces_exit_code() {
        use crate::error::PolishError;
        use crate::test_utils::fake_cli;

        let dir = tempfile::TempDir::new().unwrap();
        let cli = PrCli::new(&fake_cli(
            dir.path(),
            r#"case "$1" in --version) exit 0 ;; pr) echo "no default remote" >&2; exit 1 ;; *) exit 1 ;; esac"#,
        ));
        assert!(cli.is_installed());
        assert!(!cli.is_authenticated());

        let err = cli
            .create_pr(&CreatePrParams {
                title: "t".into(),
                body: "b".into(),
                head: "h".into(),
                base: "main".into(),
            })
            .unwrap_err();
        assert!(matches!(err, PolishError::Subprocess { code: Some(1), ref stderr, .. } if stderr == "no default remote"));
        assert!(err.to_string().contains("pr create` failed with exit code 1"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_program() {
        assert!(!PrCli::new("prpolish-no-such-cli").is_installed());
    }
}
