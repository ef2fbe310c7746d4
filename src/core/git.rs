//! Local git repository operations
//!
//! This module provides a wrapper around git2 for the read-only queries the
//! generator needs:
//! - Repository discovery and validation
//! - Current and base branch resolution
//! - Commit messages, changed files and diffs between two revisions
//!
//! Pushing goes through the system `git` binary so the user's credential
//! helpers and SSH agent keep working.

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Diff, DiffOptions, ErrorCode, Patch, Repository, Sort};
use tracing::debug;

use crate::core::process::run_checked;
use crate::error::{PolishError, Result};

/// Aggregate size of a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl std::fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} file{} changed, {} insertion{}(+), {} deletion{}(-)",
            self.files_changed,
            plural(self.files_changed),
            self.insertions,
            plural(self.insertions),
            self.deletions,
            plural(self.deletions)
        )
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// One file's share of a branch diff
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDiff {
    pub path: String,
    /// Unified patch with its `diff --git` header; empty for binary files
    pub patch: String,
    pub insertions: usize,
    pub deletions: usize,
    pub binary: bool,
}

/// Wrapper for local git repository operations
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the git repository containing the current directory
    pub fn open_current_dir() -> Result<Self> {
        Self::discover(".")
    }

    /// Discover a git repository from the given path
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|_| PolishError::NotGitRepository)?;
        Ok(Self { repo })
    }

    /// Check if the current directory is inside a git repository
    pub fn is_git_repository() -> bool {
        Repository::discover(".").is_ok()
    }

    /// Get the repository root directory
    pub fn root_dir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(|p| p.to_path_buf())
            .ok_or(PolishError::NotGitRepository)
    }

    /// Get the current branch name
    ///
    /// Fails with [`PolishError::DetachedHead`] when HEAD is not on a branch.
    pub fn current_branch(&self) -> Result<String> {
        match self.repo.head() {
            Ok(head) => {
                if head.is_branch() {
                    head.shorthand()
                        .map(|s| s.to_string())
                        .ok_or(PolishError::DetachedHead)
                } else {
                    Err(PolishError::DetachedHead)
                }
            }
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // No commits yet: HEAD is still a symbolic ref to the branch
                let head = self.repo.find_reference("HEAD")?;
                head.symbolic_target()
                    .and_then(|t| t.strip_prefix("refs/heads/"))
                    .map(|s| s.to_string())
                    .ok_or(PolishError::DetachedHead)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the branch the current branch is compared against
    ///
    /// Local `main` wins over local `master`; without either, the branch
    /// `refs/remotes/<remote>/HEAD` points at is used.
    pub fn base_branch(&self, remote: &str) -> Result<String> {
        for candidate in ["main", "master"] {
            if self
                .repo
                .find_branch(candidate, git2::BranchType::Local)
                .is_ok()
            {
                return Ok(candidate.to_string());
            }
        }

        let remote_head = format!("refs/remotes/{}/HEAD", remote);
        if let Ok(reference) = self.repo.find_reference(&remote_head) {
            if let Some(target) = reference.symbolic_target() {
                if let Some(name) = target.strip_prefix("refs/remotes/") {
                    return Ok(name.to_string());
                }
            }
        }

        Err(PolishError::NoBaseBranch {
            remote: remote.to_string(),
        })
    }

    /// Resolve a revision (branch, remote branch, or any revspec) to a commit
    fn resolve_commit(&self, rev: &str) -> Result<git2::Commit<'_>> {
        let obj = self
            .repo
            .revparse_single(&format!("refs/heads/{}", rev))
            .or_else(|_| self.repo.revparse_single(&format!("refs/remotes/{}", rev)))
            .or_else(|_| self.repo.revparse_single(rev))?;
        Ok(obj.peel_to_commit()?)
    }

    /// Get commit messages reachable from `head` but not from `base`
    ///
    /// Equivalent to `git log --reverse base..head`: oldest first, each
    /// message trimmed.
    pub fn commits_between(&self, base: &str, head: &str) -> Result<Vec<String>> {
        let base_commit = self.resolve_commit(base)?;
        let head_commit = self.resolve_commit(head)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(head_commit.id())?;
        revwalk.hide(base_commit.id())?;

        let mut messages = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            let message = commit.message().unwrap_or("").trim().to_string();
            messages.push(message);
        }

        debug!(base, head, count = messages.len(), "collected commits");
        Ok(messages)
    }

    /// Diff of `head` against its merge base with `base`
    ///
    /// This matches what a pull request shows: changes made on `base` after
    /// the branch point are not included.
    fn branch_diff(&self, base: &str, head: &str) -> Result<Diff<'_>> {
        let base_commit = self.resolve_commit(base)?;
        let head_commit = self.resolve_commit(head)?;

        let fork_point = match self.repo.merge_base(base_commit.id(), head_commit.id()) {
            Ok(oid) => self.repo.find_commit(oid)?,
            Err(_) => base_commit,
        };

        let base_tree = fork_point.tree()?;
        let head_tree = head_commit.tree()?;

        let diff = self.repo.diff_tree_to_tree(
            Some(&base_tree),
            Some(&head_tree),
            Some(&mut DiffOptions::new()),
        )?;
        Ok(diff)
    }

    /// Paths of files changed between `base` and `head`
    pub fn changed_files_between(&self, base: &str, head: &str) -> Result<Vec<String>> {
        let diff = self.branch_diff(base, head)?;
        let files = diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().into_owned())
            })
            .collect();
        Ok(files)
    }

    /// Per-file patches between `base` and `head`
    pub fn file_diffs_between(&self, base: &str, head: &str) -> Result<Vec<FileDiff>> {
        let diff = self.branch_diff(base, head)?;
        let mut files = Vec::new();

        for (idx, delta) in diff.deltas().enumerate() {
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();

            // libgit2 may yield no patch for binary files
            let file = match Patch::from_diff(&diff, idx)? {
                Some(mut patch) if !patch.delta().flags().is_binary() => {
                    let (_, insertions, deletions) = patch.line_stats()?;
                    let text = String::from_utf8_lossy(&patch.to_buf()?).into_owned();
                    FileDiff {
                        path,
                        patch: text,
                        insertions,
                        deletions,
                        binary: false,
                    }
                }
                _ => FileDiff {
                    path,
                    binary: true,
                    ..Default::default()
                },
            };
            files.push(file);
        }

        Ok(files)
    }

    /// Files changed, insertions and deletions between `base` and `head`
    pub fn diff_summary_between(&self, base: &str, head: &str) -> Result<DiffSummary> {
        let stats = self.branch_diff(base, head)?.stats()?;
        Ok(DiffSummary {
            files_changed: stats.files_changed(),
            insertions: stats.insertions(),
            deletions: stats.deletions(),
        })
    }

    /// Push a branch and set its upstream using system git
    pub fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let root = self.root_dir()?;
        run_checked(
            Command::new("git")
                .current_dir(root)
                .args(["push", "-u", remote, branch]),
        )?;
        Ok(())
    }
}
