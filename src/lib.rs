//! prpolish - pull request title and description generator
//!
//! Reads the current branch, produces a PR title and description with
//! OpenAI or commit/file heuristics, and can save drafts, copy to the
//! clipboard, run an AI "vibe check", and open the PR through the GitHub CLI.

pub mod ai;
pub mod cli;
pub mod content;
pub mod core;
pub mod error;
pub mod github;
pub mod output;
pub mod vibe;

#[cfg(test)]
mod test_utils;

pub use error::{PolishError, Result};
