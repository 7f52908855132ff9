//! Alert channel implementations (webhooks, bot channel posts).

#[cfg(test)]
#[path = "alert_channels_tests.rs"]
mod tests;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::MonitorError;

use super::alerts::{AlertChannel, StatusAlert};

/// Incoming webhook channel.
///
/// Success is `204 No Content`; any other status is a failure.
pub struct WebhookChannel {
    webhook_url: String,
    target: String,
    client: Client,
}

impl WebhookChannel {
    /// Create a new webhook channel.
    pub fn new(webhook_url: impl Into<String>, client: Client) -> Self {
        let webhook_url = webhook_url.into();
        let target = match webhook_id(&webhook_url) {
            Some(id) => format!("webhook {}", id),
            None => "webhook <unknown id>".to_string(),
        };
        Self {
            webhook_url,
            target,
            client,
        }
    }
}

/// Numeric id from a `/webhooks/<id>/<token>` URL. The token is never exposed.
pub fn webhook_id(webhook_url: &str) -> Option<String> {
    let url = url::Url::parse(webhook_url).ok()?;
    let mut segments = url.path_segments()?;
    segments.find(|s| *s == "webhooks")?;
    let id = segments.next()?;
    // The id must be followed by a token segment.
    segments.next()?;
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
        Some(id.to_string())
    } else {
        None
    }
}

#[async_trait]
impl AlertChannel for WebhookChannel {
    fn name(&self) -> &str {
        "webhook"
    }

    fn target(&self) -> &str {
        &self.target
    }

    async fn send(&self, alert: &StatusAlert) -> Result<(), MonitorError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&alert.payload())
            .send()
            .await
            .map_err(|e| MonitorError::Delivery {
                target: self.target.clone(),
                message: e.without_url().to_string(),
            })?;

        if response.status() == StatusCode::NO_CONTENT {
            debug!("Alert sent via {}", self.target);
            Ok(())
        } else {
            Err(MonitorError::UnexpectedStatus {
                target: self.target.clone(),
                expected: StatusCode::NO_CONTENT.as_u16(),
                actual: response.status().as_u16(),
            })
        }
    }
}

/// Bot channel: posts to `{api_base}/channels/{id}/messages`.
///
/// Success is `200 OK`; any other status is a failure.
pub struct DiscordChannel {
    api_base: String,
    channel_id: String,
    bot_token: String,
    target: String,
    client: Client,
}

impl DiscordChannel {
    /// Create a new channel.
    pub fn new(
        api_base: impl Into<String>,
        channel_id: impl Into<String>,
        bot_token: impl Into<String>,
        client: Client,
    ) -> Self {
        let channel_id = channel_id.into();
        Self {
            api_base: api_base.into(),
            target: format!("channel {}", channel_id),
            channel_id,
            bot_token: bot_token.into(),
            client,
        }
    }

    /// Messages endpoint for this channel.
    pub fn messages_url(&self) -> String {
        format!(
            "{}/channels/{}/messages",
            self.api_base.trim_end_matches('/'),
            self.channel_id
        )
    }
}

#[async_trait]
impl AlertChannel for DiscordChannel {
    fn name(&self) -> &str {
        "channel"
    }

    fn target(&self) -> &str {
        &self.target
    }

    async fn send(&self, alert: &StatusAlert) -> Result<(), MonitorError> {
        let response = self
            .client
            .post(self.messages_url())
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&alert.payload())
            .send()
            .await
            .map_err(|e| MonitorError::Delivery {
                target: self.target.clone(),
                message: e.to_string(),
            })?;

        if response.status() == StatusCode::OK {
            debug!("Alert sent to {}", self.target);
            Ok(())
        } else {
            Err(MonitorError::UnexpectedStatus {
                target: self.target.clone(),
                expected: StatusCode::OK.as_u16(),
                actual: response.status().as_u16(),
            })
        }
    }
}
