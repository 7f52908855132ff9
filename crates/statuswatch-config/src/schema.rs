//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::loader::ConfigLoader;

/// Root configuration.
///
/// Field aliases accept the camelCase keys of the legacy `config.json`
/// (`checkInterval`, `botToken`) so that file loads without edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Display name used in alert titles and log lines.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Health endpoint probed on every cycle.
    #[serde(default = "default_health_url")]
    pub health_url: String,

    /// Delay in milliseconds between the end of one check and the start of the next.
    #[serde(default = "default_check_interval", alias = "checkInterval")]
    pub check_interval: u64,

    /// Webhook URLs receiving alerts.
    #[serde(default)]
    pub webhooks: Vec<String>,

    /// Chat channel IDs receiving alerts through the bot API.
    #[serde(default)]
    pub channels: Vec<String>,

    /// Bot credential used for channel posts.
    #[serde(default, alias = "botToken")]
    pub bot_token: Option<String>,

    /// Base URL of the chat platform REST API.
    #[serde(default = "default_discord_api_base")]
    pub discord_api_base: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Check interval as a [`Duration`].
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval)
    }

    /// Bot token, treating an empty string as unset.
    pub fn bot_token(&self) -> Option<&str> {
        self.bot_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Whether any notification target is configured.
    pub fn has_targets(&self) -> bool {
        !self.webhooks.is_empty() || !self.channels.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            health_url: default_health_url(),
            check_interval: default_check_interval(),
            webhooks: Vec::new(),
            channels: Vec::new(),
            bot_token: None,
            discord_api_base: default_discord_api_base(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_service_name() -> String {
    "Wplace".to_string()
}

fn default_health_url() -> String {
    "https://backend.wplace.live/health".to_string()
}

fn default_check_interval() -> u64 {
    60_000
}

fn default_discord_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to also write rolling log files.
    #[serde(default = "default_true")]
    pub file: bool,

    /// Log file directory. Supports `~`. Defaults to `~/.statuswatch/logs`.
    #[serde(default)]
    pub directory: Option<String>,
}

impl LoggingConfig {
    /// Resolved log directory, or `None` when file logging is disabled.
    pub fn log_dir(&self) -> Option<PathBuf> {
        if !self.file {
            return None;
        }
        match self.directory {
            Some(ref dir) => Some(PathBuf::from(ConfigLoader::expand_path(dir))),
            None => Some(
                dirs::home_dir()
                    .map(|h| h.join(".statuswatch"))
                    .unwrap_or_else(|| PathBuf::from(".statuswatch"))
                    .join("logs"),
            ),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_true(),
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
