//! Config command: inspects and edits the persisted configuration.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ConfigManager;

/// Config command options.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration action to run.
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Set a configuration value
    Set {
        /// Key to set (provider, model, lang, openai_api_key, github_token,
        /// azure_devops_token)
        key: String,
        /// Value to store
        value: String,
    },
}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        let manager = ConfigManager::new();

        match self.action {
            ConfigAction::Show => {
                let config = manager.load()?;
                println!("provider: {}", config.provider);
                println!("model: {}", config.model);
                println!("lang: {}", config.lang);
                println!("openai_api_key: {}", mask(&config.openai_api_key));
                println!("github_token: {}", mask(&config.github_token));
                println!("azure_devops_token: {}", mask(&config.azure_devops_token));
            }
            ConfigAction::Set { key, value } => {
                // Edit the file contents, not the env-overridden view, so a
                // session variable never gets baked into the file.
                let mut config = manager.load_file()?;
                config.set(&key, &value)?;
                manager.save(&config)?;
                println!("✅ Set {key}.");
            }
        }

        Ok(())
    }
}

/// Masks a secret down to its last four characters.
fn mask(secret: &Option<String>) -> String {
    match secret {
        None => "(unset)".to_string(),
        Some(s) if s.chars().count() <= 4 => "****".to_string(),
        Some(s) => {
            let tail: String = s.chars().skip(s.chars().count() - 4).collect();
            format!("****{tail}")
        }
    }
}
