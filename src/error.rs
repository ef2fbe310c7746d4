//! Custom error types for prpolish
//!
//! User-friendly error messages for all failure scenarios, plus a coarse
//! classification used to decide between recovering and aborting.

use std::path::PathBuf;

use thiserror::Error;

/// Coarse error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Environment or setup problem the user has to fix
    Configuration,
    /// An explicitly requested resource does not exist
    NotFound,
    /// The LLM API failed (network, auth, rate limit, bad response)
    ExternalService,
    /// An external program exited unsuccessfully
    Subprocess,
    /// Local file or git failure
    Io,
    /// Everything else (bad input, cancellation)
    Other,
}

/// Main error type for the prpolish application
#[derive(Error, Debug)]
pub enum PolishError {
    /// Not running in a git repository
    #[error("This command must be run inside a Git repository.\n\n  → Run 'git init' to create one, or navigate to an existing git project.")]
    NotGitRepository,

    /// HEAD does not point at a branch
    #[error("HEAD is detached, so there is no branch to describe.\n\n  → Check out the branch you want to open a PR for: git switch <branch>")]
    DetachedHead,

    /// No comparison point for the current branch
    #[error("Cannot determine the base branch to compare against.\n\n  → Create a local 'main' or 'master' branch, or fetch the remote so '{remote}/HEAD' is known:\n    git remote set-head {remote} --auto")]
    NoBaseBranch { remote: String },

    /// No OpenAI API key configured for an AI-only feature
    #[error("The OPENAI_API_KEY environment variable is not set.\n\n  → Set it to use LLM features, for example:\n    export OPENAI_API_KEY=sk-...")]
    MissingApiKey,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Explicit template path does not exist
    #[error("Template file not found: {}\n\n  → Check the path passed to --template, or pass the template text inline.", .0.display())]
    TemplateNotFound(PathBuf),

    /// OpenAI API error
    #[error("AI generation failed: {0}")]
    Api(String),

    /// The API answered, but with nothing usable
    #[error("Unusable response from API: {0}")]
    MalformedResponse(String),

    /// Network request error
    #[error("Network request failed: {0}\n\n  → Check your internet connection.")]
    Network(#[from] reqwest::Error),

    /// External program exited unsuccessfully
    #[error("`{command}` failed{}", subprocess_detail(.code, .stderr))]
    Subprocess {
        /// Command line that was run (program and subcommand)
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured stderr, verbatim
        stderr: String,
    },

    /// External program could not be started at all
    #[error("Could not run `{program}`: {source}\n\n  → Make sure it is installed and on your PATH.")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Git operation error
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),

    /// Operation cancelled by user
    #[error("Operation cancelled.")]
    Cancelled,
}

impl PolishError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PolishError::NotGitRepository
            | PolishError::DetachedHead
            | PolishError::NoBaseBranch { .. }
            | PolishError::MissingApiKey
            | PolishError::Config(_)
            | PolishError::Toml(_) => ErrorKind::Configuration,
            PolishError::TemplateNotFound(_) => ErrorKind::NotFound,
            PolishError::Api(_)
            | PolishError::MalformedResponse(_)
            | PolishError::Network(_)
            | PolishError::Json(_) => ErrorKind::ExternalService,
            PolishError::Subprocess { .. } | PolishError::Spawn { .. } => ErrorKind::Subprocess,
            PolishError::Git(_) | PolishError::Io(_) => ErrorKind::Io,
            PolishError::InvalidInput(_) | PolishError::Cancelled => ErrorKind::Other,
        }
    }

    /// Process exit status for this error
    ///
    /// Subprocess failures propagate the child's exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            PolishError::Subprocess {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Exit code and stderr suffix for subprocess failures
fn subprocess_detail(code: &Option<i32>, stderr: &str) -> String {
    let mut detail = String::new();
    if let Some(code) = code {
        detail.push_str(&format!(" with exit code {}", code));
    }
    if !stderr.is_empty() {
        detail.push_str(":\n");
        detail.push_str(stderr);
    }
    detail
}

impl From<toml::de::Error> for PolishError {
    fn from(err: toml::de::Error) -> Self {
        PolishError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for PolishError {
    fn from(err: toml::ser::Error) -> Self {
        PolishError::Toml(err.to_string())
    }
}

/// Result type alias using PolishError
pub type Result<T> = std::result::Result<T, PolishError>;
