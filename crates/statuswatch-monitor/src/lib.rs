//! # statuswatch Monitor
//!
//! Polls a single health endpoint and reports up/down transitions.
//!
//! ## Features
//!
//! - Fixed-delay polling loop ([`Monitor::run`])
//! - Up/down state tracking with uptime extraction ([`MonitorState`])
//! - Alert delivery to webhooks and bot channels ([`AlertManager`])

pub mod error;
pub mod health;
pub mod state;
pub mod alerts;
pub mod alert_channels;
pub mod alert_manager;
pub mod monitor;

pub use error::MonitorError;
pub use health::{HealthCheckResult, HealthProbe, HttpHealthProbe};
pub use state::{Elapsed, MonitorState, Observation, ServiceStatus, SteadyReport, TransitionReport};
pub use alerts::{AlertChannel, AlertField, StatusAlert};
pub use alert_channels::{DiscordChannel, WebhookChannel};
pub use alert_manager::AlertManager;
pub use monitor::{CycleOutcome, Monitor};
