//! Common test support utilities and fixtures

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use git2::{Repository, Signature};
use tempfile::TempDir;

/// A throwaway repository plus an isolated home for config files
pub struct Workspace {
    pub repo_dir: TempDir,
    pub home: TempDir,
    repo: Repository,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Repository on `main` with one initial commit
    pub fn new() -> Self {
        let repo_dir = TempDir::new().expect("Failed to create temp directory");
        let home = TempDir::new().expect("Failed to create temp home");
        let repo = Repository::init(repo_dir.path()).expect("Failed to init repository");
        repo.set_head("refs/heads/main").expect("Failed to set HEAD");

        let ws = Self {
            repo_dir,
            home,
            repo,
        };
        ws.commit("README.md", "# demo\n", "initial commit");
        ws
    }

    pub fn path(&self) -> &Path {
        self.repo_dir.path()
    }

    /// Write a file and commit it on the current branch
    pub fn commit(&self, path: &str, contents: &str, message: &str) {
        let full_path = self.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&full_path, contents).expect("Failed to write file");

        let mut index = self.repo.index().expect("Failed to open index");
        index.add_path(Path::new(path)).expect("Failed to stage file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let signature = Signature::now("Test User", "test@example.com").expect("Bad signature");
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .expect("Failed to commit");
    }

    /// Create a branch at HEAD and switch to it
    pub fn checkout_new_branch(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to read HEAD");
        self.repo.branch(name, &head, false).expect("Failed to create branch");
        self.repo
            .set_head(&format!("refs/heads/{}", name))
            .expect("Failed to switch branch");
    }

    /// Feature branch with `fix: typo` then `feat: add login`
    pub fn with_login_branch(self) -> Self {
        self.checkout_new_branch("feat/login");
        self.commit("src/typo.rs", "// fixed\n", "fix: typo");
        self.commit("src/login.rs", "fn login() {}\n", "feat: add login");
        self
    }

    /// Bare repository registered as `origin`
    pub fn add_bare_remote(&self) -> TempDir {
        let remote_dir = TempDir::new().expect("Failed to create remote directory");
        Repository::init_bare(remote_dir.path()).expect("Failed to init bare remote");
        self.repo
            .remote("origin", &remote_dir.path().to_string_lossy())
            .expect("Failed to add remote");
        remote_dir
    }

    /// Executable stand-in for the PR CLI, stored in the temp home
    #[cfg(unix)]
    pub fn fake_pr_cli(&self, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.home.path().join("fake-gh");
        fs::write(&path, format!("#!/bin/sh\n{}\n", script)).expect("Failed to write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        path
    }

    /// Draft files present in the repository directory
    pub fn drafts(&self) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = fs::read_dir(self.path())
            .expect("Failed to list repository")
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with("PR_") && n.ends_with("_DRAFT.txt"))
                    .unwrap_or(false)
            })
            .collect();
        found.sort();
        found
    }

    /// `prpolish` running inside the repository with a clean environment
    pub fn cmd(&self) -> Command {
        prpolish_in(self.path(), self.home.path())
    }
}

/// `prpolish` with no API key, no editor, and config under `home`
pub fn prpolish_in(cwd: &Path, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("prpolish").expect("binary not built");
    cmd.current_dir(cwd)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("APPDATA", home)
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_BASE_URL")
        .env_remove("VISUAL")
        .env_remove("EDITOR")
        .env_remove("RUST_LOG")
        .write_stdin("");
    cmd
}
