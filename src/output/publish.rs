//! Push the branch and open the pull request

use crate::content::GeneratedContent;
use crate::core::context::BranchContext;
use crate::core::git::GitRepository;
use crate::error::{PolishError, Result};
use crate::github::cli::{base_branch_name, INSTALL_URL};
use crate::github::{CreatePrParams, PrCli};
use crate::output::print_manual_instructions;

/// Pushes the current branch and opens a PR for it
pub struct Publisher<'a> {
    git: &'a GitRepository,
    cli: PrCli,
    remote: String,
}

impl<'a> Publisher<'a> {
    pub fn new(git: &'a GitRepository, cli: PrCli, remote: &str) -> Self {
        Self {
            git,
            cli,
            remote: remote.to_string(),
        }
    }

    /// Check the PR CLI before touching the remote
    pub fn ensure_ready(&self) -> Result<()> {
        if !self.cli.is_installed() {
            return Err(PolishError::Config(format!(
                "`{}` is not installed.\n\n  → Install it from {} or run 'prpolish setup-gh'.",
                self.cli.program(),
                INSTALL_URL
            )));
        }
        if !self.cli.is_authenticated() {
            return Err(PolishError::Config(format!(
                "`{}` is not authenticated.\n\n  → Run 'prpolish setup-gh' or '{} auth login'.",
                self.cli.program(),
                self.cli.program()
            )));
        }
        Ok(())
    }

    /// Push, then create the PR; returns the CLI's output
    ///
    /// Nothing is rolled back on failure. The title and description are
    /// printed so the PR can be opened by hand.
    pub fn publish(&self, ctx: &BranchContext, content: &GeneratedContent) -> Result<String> {
        println!("Pushing '{}' to '{}'...", ctx.branch, self.remote);
        if let Err(e) = self.git.push_branch(&self.remote, &ctx.branch) {
            print_manual_instructions(content);
            return Err(e);
        }
        println!("✓ Branch pushed");

        let params = CreatePrParams {
            title: content.title.clone(),
            body: content.description.clone(),
            head: ctx.branch.clone(),
            base: base_branch_name(&ctx.base, &self.remote).to_string(),
        };

        println!("Creating pull request...");
        match self.cli.create_pr(&params) {
            Ok(output) => Ok(output),
            Err(e) => {
                print_manual_instructions(content);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_repo;
    use tempfile::TempDir;

    #[test]
    fn test_missing_cli_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        init_repo(dir.path(), "main");
        let git = GitRepository::discover(dir.path()).unwrap();

        let publisher = Publisher::new(&git, PrCli::new("prpolish-no-such-cli"), "origin");
        let err = publisher.ensure_ready().unwrap_err();
        assert!(matches!(err, PolishError::Config(ref msg) if msg.contains("not installed")));
    }

    #[cfg(unix)]
    #[test]
    fn test_unauthenticated_cli_is_configuration_error() {
        use crate::test_utils::fake_cli;

        let dir = TempDir::new().unwrap();
        init_repo(dir.path(), "main");
        let git = GitRepository::discover(dir.path()).unwrap();

        let cli = fake_cli(
            dir.path(),
            r#"case "$1" in --version) exit 0 ;; *) exit 1 ;; esac"#,
        );
        let publisher = Publisher::new(&git, PrCli::new(&cli), "origin");
        let err = publisher.ensure_ready().unwrap_err();
        assert!(matches!(err, PolishError::Config(ref msg) if msg.contains("not authenticated")));
    }
}
