//! Alert manager for dispatching alerts to channels.

use reqwest::Client;
use tracing::{error, info};

use statuswatch_config::Config;

use crate::error::MonitorError;

use super::alert_channels::{DiscordChannel, WebhookChannel};
use super::alerts::{AlertChannel, StatusAlert};

/// Alert manager.
///
/// Deliveries are independent: a failing target is logged and skipped.
pub struct AlertManager {
    channels: Vec<Box<dyn AlertChannel>>,
}

impl AlertManager {
    /// Create a manager with no targets.
    pub fn new() -> Self {
        Self {
            channels: Vec::new(),
        }
    }

    /// Create from config.
    ///
    /// Webhooks come first, then bot channels. Channels are skipped when no
    /// bot token is configured.
    pub fn from_config(config: &Config, client: Client) -> Self {
        let mut manager = Self::new();

        for webhook in &config.webhooks {
            manager.add_channel(Box::new(WebhookChannel::new(webhook, client.clone())));
        }

        match config.bot_token() {
            Some(token) => {
                for channel in &config.channels {
                    manager.add_channel(Box::new(DiscordChannel::new(
                        &config.discord_api_base,
                        channel,
                        token,
                        client.clone(),
                    )));
                }
            }
            None if !config.channels.is_empty() => {
                error!(
                    "{} channel(s) configured without a bot token, skipping them",
                    config.channels.len()
                );
            }
            None => {}
        }

        info!("Alert targets: {:?}", manager.targets());
        manager
    }

    /// Add a channel.
    pub fn add_channel(&mut self, channel: Box<dyn AlertChannel>) {
        self.channels.push(channel);
    }

    /// Loggable identifiers of every target.
    pub fn targets(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.target()).collect()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Send an alert to all channels, returning the failures.
    pub async fn send(&self, alert: &StatusAlert) -> Vec<MonitorError> {
        let mut errors = Vec::new();

        for channel in &self.channels {
            if let Err(e) = channel.send(alert).await {
                error!("Failed to send alert via {}: {}", channel.target(), e);
                errors.push(e);
            }
        }

        errors
    }
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new()
    }
}
