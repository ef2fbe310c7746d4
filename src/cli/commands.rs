//! CLI command definitions using clap
//!
//! Defines the command structure for the `prpolish` CLI tool.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::content::Parts;
use crate::core::config::SettingKey;

/// prpolish - polished pull request titles and descriptions
///
/// Generates PR content from the current branch using OpenAI when
/// OPENAI_API_KEY is set, and commit/file heuristics otherwise.
#[derive(Parser, Debug)]
#[command(name = "prpolish", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a PR title and description
    Generate(GenerateArgs),

    /// Generate a PR title only
    GenerateTitle(GenerateTitleArgs),

    /// Generate a PR description only
    GenerateDesc(GenerateDescArgs),

    /// Review commits and tests with the AI vibe check
    VibeCheck,

    /// Check the GitHub CLI is installed and authenticated
    SetupGh,

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Generate Commands
// ─────────────────────────────────────────────────────────────────────────────

/// What to write to draft files
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SaveTarget {
    Title,
    Description,
    Both,
}

impl From<SaveTarget> for Parts {
    fn from(target: SaveTarget) -> Self {
        match target {
            SaveTarget::Title => Parts::Title,
            SaveTarget::Description => Parts::Description,
            SaveTarget::Both => Parts::Both,
        }
    }
}

/// Options shared by every generate command
#[derive(Args, Debug, Clone)]
pub struct SharedArgs {
    /// Template text or path to a template file
    #[arg(long)]
    pub template: Option<String>,

    /// Skip prompts: save drafts, push the branch and open the PR
    #[arg(short, long)]
    pub fast: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub shared: SharedArgs,

    /// Save drafts to PR_TITLE_DRAFT.txt / PR_DESCRIPTION_DRAFT.txt
    #[arg(short, long, value_enum, num_args = 0..=1, default_missing_value = "both")]
    pub save: Option<SaveTarget>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateTitleArgs {
    #[command(flatten)]
    pub shared: SharedArgs,

    /// Save the title to PR_TITLE_DRAFT.txt
    #[arg(short, long, value_enum, num_args = 0..=1, default_missing_value = "title")]
    pub save: Option<SaveTarget>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateDescArgs {
    #[command(flatten)]
    pub shared: SharedArgs,

    /// Save the description to PR_DESCRIPTION_DRAFT.txt
    #[arg(short, long, value_enum, num_args = 0..=1, default_missing_value = "description")]
    pub save: Option<SaveTarget>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        key: ConfigKey,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: ConfigKey,
    },

    /// Reset a configuration value to its default
    Remove {
        /// Configuration key
        key: ConfigKey,
    },

    /// Print the configuration file path
    Path,
}

/// Available configuration keys
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ConfigKey {
    /// Chat model used for generation
    Model,

    /// Base URL of the chat-completions API
    #[value(name = "api-base")]
    ApiBase,

    /// Git remote to push to
    Remote,

    /// Program used to open pull requests
    #[value(name = "pr-cli")]
    PrCli,
}

impl From<ConfigKey> for SettingKey {
    fn from(key: ConfigKey) -> Self {
        match key {
            ConfigKey::Model => SettingKey::Model,
            ConfigKey::ApiBase => SettingKey::ApiBase,
            ConfigKey::Remote => SettingKey::Remote,
            ConfigKey::PrCli => SettingKey::PrCli,
        }
    }
}
