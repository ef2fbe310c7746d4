//! Core functionality for prpolish
//!
//! This module contains shared business logic including:
//! - Git repository operations
//! - Branch context collection
//! - PR template resolution
//! - Subprocess execution
//! - Application configuration

pub mod config;
pub mod context;
pub mod git;
pub mod process;
pub mod template;

pub use config::{Config, Settings};
pub use context::{BranchContext, BranchInspector};
pub use git::GitRepository;
pub use template::Template;
