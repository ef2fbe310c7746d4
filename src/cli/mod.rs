//! CLI module for prpolish
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod commands;
pub mod config;
pub mod generate;
pub mod prompt;
pub mod setup;
pub mod vibe;

pub use commands::{Cli, Commands};
