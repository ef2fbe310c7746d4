//! Shared fixtures for unit tests.

use std::fs;
use std::path::Path;

use git2::{Oid, Repository, Signature};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::core::context::BranchContext;
use crate::core::git::DiffSummary;

/// Initialise a repository whose HEAD points at `default_branch`
pub fn init_repo(dir: &Path, default_branch: &str) -> Repository {
    let repo = Repository::init(dir).unwrap();
    repo.set_head(&format!("refs/heads/{}", default_branch))
        .unwrap();
    repo
}

/// Write `contents` to `path` and commit it on the current branch
pub fn commit_file(repo: &Repository, path: &str, contents: &str, message: &str) -> Oid {
    let workdir = repo.workdir().unwrap();
    let full_path = workdir.join(path);
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&full_path, contents).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(path)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let signature = Signature::now("Test User", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )
    .unwrap()
}

/// Create a branch at HEAD and switch to it
pub fn checkout_new_branch(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch(name, &head, false).unwrap();
    repo.set_head(&format!("refs/heads/{}", name)).unwrap();
}

/// Executable shell script standing in for the PR CLI; returns its path
#[cfg(unix)]
pub fn fake_cli(dir: &Path, script: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-gh");
    fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

/// Build an in-memory branch context without touching git
pub fn context(branch: &str, commits: &[&str], files: &[&str]) -> BranchContext {
    BranchContext {
        branch: branch.to_string(),
        base: "main".to_string(),
        commits: commits.iter().map(|c| c.to_string()).collect(),
        changed_files: files.iter().map(|f| f.to_string()).collect(),
        diff_summary: DiffSummary {
            files_changed: files.len(),
            insertions: files.len() * 10,
            deletions: files.len(),
        },
        diff: Vec::new(),
    }
}

/// Answer exactly one HTTP request with `status` and `body`
///
/// Returns an API base URL pointing at the listener.
pub async fn serve_once(status: u16, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{}/v1", addr)
}

/// Consume headers and a `Content-Length` body
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                return;
            }
        }
    }
}
