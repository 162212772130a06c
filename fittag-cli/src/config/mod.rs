use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::session::Session;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "FITTAG_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Stored login state, written by `fittag session set`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long notifications stay on screen
    #[serde(default = "default_notification_seconds")]
    pub notification_seconds: u64,

    /// Base URL routine illustrations are served from
    #[serde(default = "default_asset_base_url")]
    pub asset_base_url: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_notification_seconds() -> u64 {
    4
}

fn default_asset_base_url() -> String {
    "http://localhost:5173".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_seconds: default_notification_seconds(),
            asset_base_url: default_asset_base_url(),
        }
    }
}

impl UiConfig {
    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_seconds)
    }
}

impl Config {
    /// Get config directory path (~/.fittag/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".fittag"))
    }

    /// Get config file path, honouring `FITTAG_CONFIG`
    pub fn config_file() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default location
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file(),
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load configuration from file, using defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file()?)
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).context("Failed to create config directory")?;
            }
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Session to inject into flows, if both token and user id are stored
    pub fn session(&self) -> Option<Session> {
        Session::new(&self.session.token, &self.session.user_id)
    }

    /// Check if a usable session is stored
    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// Store a session
    pub fn set_session(&mut self, token: String, user_id: String) {
        self.session.token = token;
        self.session.user_id = user_id;
    }

    /// Forget the stored session
    pub fn clear_session(&mut self) {
        self.session.token.clear();
        self.session.user_id.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.ui.notification_duration(), Duration::from_secs(4));
        assert!(!config.is_authenticated());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [session]
            token = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.session.token, "abc");
        // user id still missing
        assert!(config.session().is_none());
    }

    #[test]
    fn test_session_lifecycle() {
        let mut config = Config::default();

        config.set_session("tok".to_string(), "42".to_string());
        let session = config.session().unwrap();
        assert_eq!(session.token(), "tok");
        assert_eq!(session.user_id(), "42");

        config.clear_session();
        assert!(!config.is_authenticated());
    }
}
