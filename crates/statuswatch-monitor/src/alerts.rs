//! Alert types and core trait definitions.

#[cfg(test)]
#[path = "alerts_tests.rs"]
mod tests;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MonitorError;
use crate::state::{format_utc, ServiceStatus, TransitionReport};

/// Embed color for "went up" alerts.
pub const COLOR_UP: u32 = 4362485;
/// Embed color for "went down" alerts.
pub const COLOR_DOWN: u32 = 16078658;

impl ServiceStatus {
    /// Get embed color for alerts announcing this status.
    pub fn color(&self) -> u32 {
        match self {
            ServiceStatus::Up => COLOR_UP,
            ServiceStatus::Down | ServiceStatus::Unknown => COLOR_DOWN,
        }
    }
}

/// Name/value pair rendered below the alert description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertField {
    pub name: String,
    pub value: String,
}

/// A status change alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusAlert {
    /// Alert title.
    pub title: String,
    /// Alert description.
    pub description: String,
    /// Embed color.
    pub color: u32,
    /// Optional fields.
    pub fields: Vec<AlertField>,
}

impl StatusAlert {
    /// Build the alert announcing a transition.
    pub fn from_transition(service: &str, report: &TransitionReport) -> Self {
        let mut fields = Vec::new();

        if !report.since_start {
            fields.push(AlertField {
                name: format!("{} since", report.status.previous().title()),
                value: format_utc(report.previous_since),
            });
        }

        if report.status == ServiceStatus::Down {
            if let Some(uptime) = report.backend_uptime {
                fields.push(AlertField {
                    name: "Backend uptime".to_string(),
                    value: uptime.to_string(),
                });
            }
        }

        Self {
            title: format!("{} just went {}!", service, report.status),
            description: report.previous_state_text(),
            color: report.status.color(),
            fields,
        }
    }

    /// Look up a field value by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// JSON message body shared by webhooks and channel posts.
    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!({ "embeds": [self] })
    }
}

/// Alert channel trait.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    /// Channel kind.
    fn name(&self) -> &str;

    /// Identifier of the concrete target, safe to log.
    fn target(&self) -> &str;

    /// Send an alert.
    async fn send(&self, alert: &StatusAlert) -> Result<(), MonitorError>;
}
