//! Up/down state tracking.

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::health::{parse_uptime, HealthCheckResult};

/// Observed status of the monitored service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServiceStatus {
    /// No check has completed since start.
    #[default]
    Unknown,
    /// Health endpoint answered 200.
    Up,
    /// Health endpoint answered anything else.
    Down,
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceStatus::Unknown => write!(f, "unknown"),
            ServiceStatus::Up => write!(f, "up"),
            ServiceStatus::Down => write!(f, "down"),
        }
    }
}

impl ServiceStatus {
    /// Status for a check result.
    pub fn from_up(is_up: bool) -> Self {
        if is_up {
            ServiceStatus::Up
        } else {
            ServiceStatus::Down
        }
    }

    /// The status the service was in before transitioning to this one.
    pub fn previous(&self) -> Self {
        match self {
            ServiceStatus::Up => ServiceStatus::Down,
            ServiceStatus::Down => ServiceStatus::Up,
            ServiceStatus::Unknown => ServiceStatus::Unknown,
        }
    }

    /// Capitalized label, as used in alert field names.
    pub fn title(&self) -> &'static str {
        match self {
            ServiceStatus::Unknown => "Unknown",
            ServiceStatus::Up => "Up",
            ServiceStatus::Down => "Down",
        }
    }
}

/// A span of time with millisecond to hour views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elapsed {
    seconds: f64,
}

impl Elapsed {
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Time from `earlier` to `later`.
    pub fn between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> Self {
        let millis = (later - earlier).num_milliseconds();
        Self::from_seconds(millis as f64 / 1000.0)
    }

    pub fn as_millis(&self) -> f64 {
        self.seconds * 1000.0
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    pub fn as_minutes(&self) -> f64 {
        self.seconds / 60.0
    }

    pub fn as_hours(&self) -> f64 {
        self.as_minutes() / 60.0
    }

    /// Hours rounded to the nearest whole hour.
    pub fn rounded_hours(&self) -> i64 {
        self.as_hours().round() as i64
    }
}

impl std::fmt::Display for Elapsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} hour(s)", self.rounded_hours())
    }
}

/// Format a timestamp the way HTTP dates read (`Tue, 14 Oct 2025 12:00:00 GMT`).
pub fn format_utc(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// A change between up and down that should be announced.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionReport {
    /// New status.
    pub status: ServiceStatus,
    /// When the previous status was entered.
    pub previous_since: DateTime<Utc>,
    /// How long the previous status lasted.
    pub previous_duration: Elapsed,
    /// The previous status was entered at the first check, not observed as a change.
    pub since_start: bool,
    /// Backend uptime from the last healthy payload. Only set when going down.
    pub backend_uptime: Option<Elapsed>,
}

impl TransitionReport {
    /// "It was down for 3 hour(s)" or "It was down since I started (3 hour(s) ago)".
    pub fn previous_state_text(&self) -> String {
        let previous = self.status.previous();
        if self.since_start {
            format!(
                "It was {} since I started ({} ago)",
                previous, self.previous_duration
            )
        } else {
            format!("It was {} for {}", previous, self.previous_duration)
        }
    }

    /// Log line for the transition.
    pub fn summary(&self, service: &str) -> String {
        let mut line = format!(
            "{} just went {}! {}",
            service,
            self.status,
            self.previous_state_text()
        );
        if let Some(uptime) = self.backend_uptime {
            line.push_str(&format!(", and the backends uptime was {}", uptime));
        }
        line
    }
}

/// A check that confirmed the current status.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyReport {
    pub status: ServiceStatus,
    /// Start of the current status, once a real transition has been observed.
    pub since: Option<DateTime<Utc>>,
    /// Time spent in the current status.
    pub elapsed: Elapsed,
}

impl SteadyReport {
    /// Log line for the steady state.
    pub fn summary(&self, service: &str) -> String {
        match self.since {
            Some(since) => format!(
                "{} has been {} since {}",
                service,
                self.status,
                format_utc(since)
            ),
            None => format!(
                "{} has been {} since I started ({} ago)",
                service, self.status, self.elapsed
            ),
        }
    }
}

/// What a single check meant for the tracked state.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// First status since start. Nothing to compare against, nothing to announce.
    BecameKnown(ServiceStatus),
    /// Status flipped and should be announced.
    Transition(TransitionReport),
    /// Status unchanged.
    Steady(SteadyReport),
}

/// Tracked state of the monitored service.
///
/// Starts [`ServiceStatus::Unknown`] on every process start.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    status: ServiceStatus,
    has_transitioned_since_start: bool,
    last_transition_at: Option<DateTime<Utc>>,
    last_health: Option<serde_json::Value>,
}

impl MonitorState {
    /// Create a fresh, unknown state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ServiceStatus {
        self.status
    }

    /// Whether an announced transition has happened since start.
    pub fn has_transitioned_since_start(&self) -> bool {
        self.has_transitioned_since_start
    }

    pub fn last_transition_at(&self) -> Option<DateTime<Utc>> {
        self.last_transition_at
    }

    /// Last successfully parsed health payload.
    pub fn last_health(&self) -> Option<&serde_json::Value> {
        self.last_health.as_ref()
    }

    /// Uptime reported by the last healthy payload.
    pub fn backend_uptime(&self) -> Option<Elapsed> {
        self.last_health.as_ref().and_then(parse_uptime)
    }

    /// Whether a check with the given outcome changes the status.
    pub fn is_transition(&self, is_up: bool) -> bool {
        match self.status {
            ServiceStatus::Unknown => true,
            ServiceStatus::Down => is_up,
            ServiceStatus::Up => !is_up,
        }
    }

    /// Fold one health check result into the state.
    pub fn observe(&mut self, result: &HealthCheckResult, now: DateTime<Utc>) -> Observation {
        let is_up = result.is_up();
        let transitioned = self.is_transition(is_up);

        if is_up {
            match result.json() {
                Ok(payload) => self.last_health = Some(payload),
                Err(e) => warn!("Failed to parse health response: {}", e),
            }
        }

        if !transitioned {
            // Not Unknown here, so a transition time exists.
            let since = self.last_transition_at.unwrap_or(now);
            return Observation::Steady(SteadyReport {
                status: self.status,
                since: self.has_transitioned_since_start.then_some(since),
                elapsed: Elapsed::between(since, now),
            });
        }

        let status = ServiceStatus::from_up(is_up);
        self.status = status;

        match self.last_transition_at.replace(now) {
            Some(previous_since) => {
                let report = TransitionReport {
                    status,
                    previous_since,
                    previous_duration: Elapsed::between(previous_since, now),
                    since_start: !self.has_transitioned_since_start,
                    backend_uptime: if is_up { None } else { self.backend_uptime() },
                };
                self.has_transitioned_since_start = true;
                Observation::Transition(report)
            }
            None => Observation::BecameKnown(status),
        }
    }
}
