//! The polling loop tying probe, state and alerts together.

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, warn};

use statuswatch_config::Config;

use crate::alert_manager::AlertManager;
use crate::alerts::StatusAlert;
use crate::error::MonitorError;
use crate::health::{HealthProbe, HttpHealthProbe};
use crate::state::{MonitorState, Observation, ServiceStatus};

/// What one check cycle did.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The health request could not be made. State is untouched.
    ProbeFailed(MonitorError),
    /// First status since start.
    Initial(ServiceStatus),
    /// Status confirmed.
    Steady(ServiceStatus),
    /// Status changed and the alert was dispatched.
    Notified {
        alert: StatusAlert,
        failures: Vec<MonitorError>,
    },
}

/// Single-service monitor.
pub struct Monitor {
    service_name: String,
    interval: Duration,
    probe: Box<dyn HealthProbe>,
    alerts: AlertManager,
    state: MonitorState,
}

impl Monitor {
    /// Create a new monitor with fresh state.
    pub fn new(
        service_name: impl Into<String>,
        interval: Duration,
        probe: Box<dyn HealthProbe>,
        alerts: AlertManager,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            interval,
            probe,
            alerts,
            state: MonitorState::new(),
        }
    }

    /// Create from config, sharing one HTTP client between probe and alerts.
    pub fn from_config(config: &Config) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .user_agent(concat!("statuswatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MonitorError::HttpClient(e.to_string()))?;

        let probe = HttpHealthProbe::new(&config.health_url, client.clone());
        let alerts = AlertManager::from_config(config, client);

        Ok(Self::new(
            config.service_name.clone(),
            config.check_interval(),
            Box::new(probe),
            alerts,
        ))
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one check cycle, including alert delivery.
    pub async fn check_once(&mut self) -> CycleOutcome {
        let result = match self.probe.probe().await {
            Ok(result) => result,
            Err(e) => {
                warn!("Failed to check status of {}: {}", self.probe.url(), e);
                return CycleOutcome::ProbeFailed(e);
            }
        };

        match self.state.observe(&result, Utc::now()) {
            Observation::BecameKnown(status) => {
                debug!("{} is {} at first check", self.service_name, status);
                CycleOutcome::Initial(status)
            }
            Observation::Steady(report) => {
                info!("{}", report.summary(&self.service_name));
                CycleOutcome::Steady(report.status)
            }
            Observation::Transition(report) => {
                info!("{}", report.summary(&self.service_name));
                let alert = StatusAlert::from_transition(&self.service_name, &report);
                let failures = self.alerts.send(&alert).await;
                CycleOutcome::Notified { alert, failures }
            }
        }
    }

    /// Poll forever.
    ///
    /// The first check runs immediately; afterwards the interval is measured
    /// from the end of one cycle to the start of the next.
    pub async fn run(mut self) {
        info!(
            "Monitoring {} at {} every {:?} ({} alert target(s))",
            self.service_name,
            self.probe.url(),
            self.interval,
            self.alerts.len()
        );

        loop {
            self.check_once().await;
            tokio::time::sleep(self.interval).await;
        }
    }
}
