//! Branch context collection
//!
//! Gathers everything the generators need to know about the current branch
//! in one pass, so later stages never touch git.

use std::path::PathBuf;

use tracing::debug;

use crate::core::git::{DiffSummary, FileDiff, GitRepository};
use crate::error::Result;

/// Everything known about the branch being described
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    /// Current branch name
    pub branch: String,
    /// Branch the current branch is compared against
    pub base: String,
    /// Full commit messages, oldest first
    pub commits: Vec<String>,
    /// Paths changed on the branch
    pub changed_files: Vec<String>,
    /// Aggregate diff size
    pub diff_summary: DiffSummary,
    /// Per-file patches, used only for LLM prompts
    pub diff: Vec<FileDiff>,
}

impl BranchContext {
    /// True when the branch has neither commits nor changed files
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty() && self.changed_files.is_empty()
    }

    /// First line of every commit message
    pub fn subjects(&self) -> Vec<&str> {
        self.commits
            .iter()
            .map(|msg| msg.lines().next().unwrap_or("").trim())
            .collect()
    }

    /// Changed files that look like tests
    pub fn test_files(&self) -> Vec<&str> {
        self.changed_files
            .iter()
            .map(String::as_str)
            .filter(|f| is_test_file(f))
            .collect()
    }
}

/// Whether a path looks like a test file
pub fn is_test_file(path: &str) -> bool {
    path.contains("test") || path.ends_with(".test.js") || path.contains("__tests__")
}

/// Reads the current branch out of a repository
pub struct BranchInspector {
    git: GitRepository,
    remote: String,
}

impl BranchInspector {
    /// Inspector for the repository containing the current directory
    pub fn open_current_dir(remote: &str) -> Result<Self> {
        Ok(Self::new(GitRepository::open_current_dir()?, remote))
    }

    pub fn new(git: GitRepository, remote: &str) -> Self {
        Self {
            git,
            remote: remote.to_string(),
        }
    }

    /// Repository root, used for template auto-detection
    pub fn root_dir(&self) -> Result<PathBuf> {
        self.git.root_dir()
    }

    pub fn git(&self) -> &GitRepository {
        &self.git
    }

    /// Collect the branch context
    pub fn inspect(&self) -> Result<BranchContext> {
        let branch = self.git.current_branch()?;
        let base = self.git.base_branch(&self.remote)?;

        // Nothing to compare while sitting on the base itself
        if branch == base {
            debug!(%branch, "current branch is the base branch");
            return Ok(BranchContext {
                branch,
                base,
                commits: Vec::new(),
                changed_files: Vec::new(),
                diff_summary: DiffSummary::default(),
                diff: Vec::new(),
            });
        }

        let commits = self.git.commits_between(&base, &branch)?;
        let changed_files = self.git.changed_files_between(&base, &branch)?;
        let diff_summary = self.git.diff_summary_between(&base, &branch)?;
        let diff = self.git.file_diffs_between(&base, &branch)?;

        debug!(
            %branch,
            %base,
            commits = commits.len(),
            files = changed_files.len(),
            "inspected branch"
        );

        Ok(BranchContext {
            branch,
            base,
            commits,
            changed_files,
            diff_summary,
            diff,
        })
    }
}
