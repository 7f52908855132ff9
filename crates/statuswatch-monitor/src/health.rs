//! Health endpoint probing.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::MonitorError;
use crate::state::Elapsed;

/// Outcome of one successful health request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckResult {
    /// HTTP status code.
    pub status_code: u16,
    /// Raw response body.
    pub body: String,
}

impl HealthCheckResult {
    /// Create a result from a status code and body.
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// The service counts as up only on HTTP 200.
    pub fn is_up(&self) -> bool {
        self.status_code == StatusCode::OK.as_u16()
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, MonitorError> {
        serde_json::from_str(&self.body).map_err(|e| MonitorError::InvalidPayload(e.to_string()))
    }
}

/// Something that can be asked for the health of the monitored service.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Probed URL, used in log lines.
    fn url(&self) -> &str;

    /// Perform one health request.
    ///
    /// Any HTTP response, whatever its status, is `Ok`. `Err` means the
    /// request could not be completed.
    async fn probe(&self) -> Result<HealthCheckResult, MonitorError>;
}

/// Probe issuing a plain `GET` against the health URL.
pub struct HttpHealthProbe {
    url: String,
    client: Client,
}

impl HttpHealthProbe {
    /// Create a new probe.
    pub fn new(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    fn url(&self) -> &str {
        &self.url
    }

    async fn probe(&self) -> Result<HealthCheckResult, MonitorError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| MonitorError::Probe(e.to_string()))?;

        let status = response.status();
        // An unreadable body only matters for payload parsing, not for up/down.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read health response body from {}: {}", self.url, e);
                String::new()
            }
        };

        debug!("Health check {} returned {}", self.url, status);
        Ok(HealthCheckResult::new(status.as_u16(), body))
    }
}

/// Extract the backend-reported uptime from a health payload.
///
/// Expects an `uptime` field holding seconds, either as a number or as a
/// string with a numeric prefix (`"9429.19s"`).
pub fn parse_uptime(payload: &serde_json::Value) -> Option<Elapsed> {
    let seconds = match payload.get("uptime")? {
        serde_json::Value::String(s) => leading_number(s)?,
        serde_json::Value::Number(n) => n.as_f64()?,
        _ => return None,
    };

    if seconds.is_finite() && seconds >= 0.0 {
        Some(Elapsed::from_seconds(seconds))
    } else {
        None
    }
}

fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}
