//! Configuration CLI command handlers

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::{mask_secret, Config, SettingKey, Settings};
use crate::error::Result;

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => handle_set(key.into(), &value),
        ConfigCommand::Get { key } => handle_get(key),
        ConfigCommand::Remove { key } => handle_remove(key.into()),
        ConfigCommand::Path => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
    }
}

/// Handle setting a configuration value
fn handle_set(key: SettingKey, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    println!("{} set to: {}", key.name(), config.get(key));
    Ok(())
}

/// Handle getting a configuration value
///
/// Shows the effective value, environment overrides included.
fn handle_get(key: ConfigKey) -> Result<()> {
    let settings = Settings::load()?;
    let key = SettingKey::from(key);
    println!("{}: {}", key.name(), settings.config.get(key));

    if key == SettingKey::Model {
        match &settings.api_key {
            Some(api_key) => println!("OpenAI API key: {}", mask_secret(api_key)),
            None => println!("OpenAI API key: Not configured"),
        }
    }
    Ok(())
}

/// Handle removing a configuration value
fn handle_remove(key: SettingKey) -> Result<()> {
    let mut config = Config::load()?;
    config.reset(key);
    config.save()?;

    println!("{} reset to default: {}", key.name(), config.get(key));
    Ok(())
}
