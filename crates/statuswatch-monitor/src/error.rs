//! Monitor errors.

use thiserror::Error;

/// Monitor error types.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The health request could not be performed at all.
    #[error("Health check failed: {0}")]
    Probe(String),

    /// The health body was not valid JSON.
    #[error("Invalid health payload: {0}")]
    InvalidPayload(String),

    /// Alert delivery failed at the transport level.
    #[error("Alert delivery to {target} failed: {message}")]
    Delivery { target: String, message: String },

    /// Alert target answered with a status other than the expected one.
    #[error("Alert target {target} returned {actual}, expected {expected}")]
    UnexpectedStatus {
        target: String,
        expected: u16,
        actual: u16,
    },

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
