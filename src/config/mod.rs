//! Configuration management.
//!
//! Settings live in `~/.gitscribe/config.json` and individual values can be
//! overridden through `GITSCRIBE_*` environment variables. The configuration
//! is loaded once at process entry and passed by reference into the workflows
//! and adapters.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::Lang;
use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM provider name (currently only "openai").
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier passed to the LLM API.
    #[serde(default = "default_model")]
    pub model: String,

    /// Default output language.
    #[serde(default)]
    pub lang: Lang,

    /// OpenAI API key.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// GitHub personal access token.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Azure DevOps personal access token.
    #[serde(default)]
    pub azure_devops_token: Option<String>,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            lang: Lang::default(),
            openai_api_key: None,
            github_token: None,
            azure_devops_token: None,
        }
    }
}

impl AppConfig {
    /// Applies `GITSCRIBE_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("GITSCRIBE_PROVIDER") {
            self.provider = v;
        }
        if let Ok(v) = env::var("GITSCRIBE_MODEL") {
            self.model = v;
        }
        if let Ok(v) = env::var("GITSCRIBE_LANG") {
            match v.to_lowercase().as_str() {
                "es" => self.lang = Lang::Es,
                "en" => self.lang = Lang::En,
                _ => {}
            }
        }
        if let Ok(v) = env::var("GITSCRIBE_OPENAI_API_KEY").or_else(|_| env::var("OPENAI_API_KEY"))
        {
            self.openai_api_key = Some(v);
        }
        if let Ok(v) = env::var("GITSCRIBE_GITHUB_TOKEN").or_else(|_| env::var("GITHUB_TOKEN")) {
            self.github_token = Some(v);
        }
        if let Ok(v) =
            env::var("GITSCRIBE_AZURE_DEVOPS_TOKEN").or_else(|_| env::var("AZURE_DEVOPS_TOKEN"))
        {
            self.azure_devops_token = Some(v);
        }
    }

    /// Sets a configuration value by dotted key name.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), ConfigError> {
        match key {
            "provider" => self.provider = value.to_string(),
            "model" => self.model = value.to_string(),
            "lang" => match value.to_lowercase().as_str() {
                "en" => self.lang = Lang::En,
                "es" => self.lang = Lang::Es,
                other => return Err(ConfigError::UnknownKey(format!("lang value: {other}"))),
            },
            "openai_api_key" => self.openai_api_key = Some(value.to_string()),
            "github_token" => self.github_token = Some(value.to_string()),
            "azure_devops_token" => self.azure_devops_token = Some(value.to_string()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

/// Loads and persists [`AppConfig`] at a known path.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }
}

impl ConfigManager {
    /// Creates a manager for the default config location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager with a custom config path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Returns the default config path (`~/.gitscribe/config.json`).
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gitscribe")
            .join("config.json")
    }

    /// Loads the configuration, applying environment overrides on top.
    ///
    /// A missing file yields the defaults rather than an error.
    pub fn load(&self) -> Result<AppConfig> {
        let mut config = self.load_file()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads the configuration file without environment overrides.
    pub fn load_file(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            return Ok(AppConfig::default());
        }

        let content =
            std::fs::read_to_string(&self.config_path).map_err(|source| ConfigError::Read {
                path: self.config_path.display().to_string(),
                source,
            })?;

        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.config_path.display().to_string(),
            source,
        })?;

        Ok(config)
    }

    /// Persists the configuration to disk.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {parent:?}"))?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        std::fs::write(&self.config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", self.config_path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_when_file_missing() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.json"));

        let config = manager.load_file().unwrap();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.lang, Lang::En);
        assert!(config.github_token.is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        let manager = ConfigManager::with_path(path.clone());

        let mut config = AppConfig::default();
        config.set("model", "gpt-4o-mini").unwrap();
        config.set("lang", "es").unwrap();
        config.set("github_token", "ghp_test").unwrap();
        manager.save(&config).unwrap();
        assert!(path.exists());

        let loaded = manager.load_file().unwrap();
        assert_eq!(loaded.model, "gpt-4o-mini");
        assert_eq!(loaded.lang, Lang::Es);
        assert_eq!(loaded.github_token.as_deref(), Some("ghp_test"));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut config = AppConfig::default();
        let err = config.set("nonsense", "value").unwrap_err();
        assert!(err.to_string().contains("unknown config key"));
    }

    #[test]
    fn parse_error_names_the_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let manager = ConfigManager::with_path(path);
        let err = manager.load_file().unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }
}
