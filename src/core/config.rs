//! Application configuration management
//!
//! Handles loading and saving persistent settings:
//! - OpenAI model and API base URL
//! - Git remote used when pushing
//! - Pull request CLI program
//!
//! ## Environment
//!
//! - `OPENAI_API_KEY` - API key; its presence enables the AI features
//! - `OPENAI_BASE_URL` - overrides the configured API base URL
//!
//! Priority: env var > config file > default

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{PolishError, Result};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const API_BASE_ENV: &str = "OPENAI_BASE_URL";

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_REMOTE: &str = "origin";
const DEFAULT_PR_CLI: &str = "gh";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Chat model used for generation and vibe checks
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the chat-completions API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Remote the branch is pushed to before opening a PR
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Program used to open pull requests
    #[serde(default = "default_pr_cli")]
    pub pr_cli: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_remote() -> String {
    DEFAULT_REMOTE.to_string()
}

fn default_pr_cli() -> String {
    DEFAULT_PR_CLI.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            remote: default_remote(),
            pr_cli: default_pr_cli(),
        }
    }
}

/// Keys accepted by `prpolish config`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Model,
    ApiBase,
    Remote,
    PrCli,
}

impl SettingKey {
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::Model => "model",
            SettingKey::ApiBase => "api-base",
            SettingKey::Remote => "remote",
            SettingKey::PrCli => "pr-cli",
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if it does not exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            Self::from_toml(&contents)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "prpolish", "prpolish")
            .ok_or_else(|| PolishError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Read a setting as a string
    pub fn get(&self, key: SettingKey) -> &str {
        match key {
            SettingKey::Model => &self.model,
            SettingKey::ApiBase => &self.api_base,
            SettingKey::Remote => &self.remote,
            SettingKey::PrCli => &self.pr_cli,
        }
    }

    /// Update a setting, validating the new value
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(PolishError::InvalidInput(format!(
                "'{}' cannot be empty",
                key.name()
            )));
        }

        match key {
            SettingKey::Model => self.model = value.to_string(),
            SettingKey::ApiBase => {
                parse_api_base(value)?;
                self.api_base = value.trim_end_matches('/').to_string();
            }
            SettingKey::Remote => self.remote = value.to_string(),
            SettingKey::PrCli => self.pr_cli = value.to_string(),
        }
        Ok(())
    }

    /// Reset a setting to its default
    pub fn reset(&mut self, key: SettingKey) {
        let defaults = Config::default();
        match key {
            SettingKey::Model => self.model = defaults.model,
            SettingKey::ApiBase => self.api_base = defaults.api_base,
            SettingKey::Remote => self.remote = defaults.remote,
            SettingKey::PrCli => self.pr_cli = defaults.pr_cli,
        }
    }

    fn validate(&self) -> Result<()> {
        parse_api_base(&self.api_base)?;
        Ok(())
    }
}

fn parse_api_base(value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| PolishError::Config(format!("Invalid API base URL '{}': {}", value, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PolishError::Config(format!(
            "Invalid API base URL '{}': unsupported scheme '{}'",
            value, other
        ))),
    }
}

/// Resolved settings for a single run: config file plus environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    /// API key, if one is configured
    pub api_key: Option<SecretString>,
}

impl Settings {
    /// Load the config file and read the environment
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    /// Combine a config with environment values from `lookup`
    pub fn resolve<F>(mut config: Config, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .map(SecretString::from);

        if let Some(base) = lookup(API_BASE_ENV).filter(|b| !b.trim().is_empty()) {
            parse_api_base(base.trim())?;
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }

        Ok(Self { config, api_key })
    }

    /// Whether AI features are available
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Get a masked version of a key for display (shows first 4 and last 4 chars)
pub fn mask_secret(secret: &SecretString) -> String {
    let exposed = secret.expose_secret();
    let chars: Vec<char> = exposed.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
