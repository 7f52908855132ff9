//! Tests for alert construction.

use super::*;
use crate::state::Elapsed;
use chrono::{TimeZone, Utc};

fn report(status: ServiceStatus, since_start: bool, uptime: Option<f64>) -> TransitionReport {
    TransitionReport {
        status,
        previous_since: Utc.with_ymd_and_hms(2025, 10, 14, 12, 0, 0).unwrap(),
        previous_duration: Elapsed::from_seconds(2.0 * 3600.0),
        since_start,
        backend_uptime: uptime.map(Elapsed::from_seconds),
    }
}

#[test]
fn test_went_down_alert() {
    let alert = StatusAlert::from_transition(
        "Wplace",
        &report(ServiceStatus::Down, false, Some(50.0 * 3600.0)),
    );

    assert_eq!(alert.title, "Wplace just went down!");
    assert_eq!(alert.description, "It was up for 2 hour(s)");
    assert_eq!(alert.color, COLOR_DOWN);
    assert_eq!(alert.field("Up since"), Some("Tue, 14 Oct 2025 12:00:00 GMT"));
    assert_eq!(alert.field("Backend uptime"), Some("50 hour(s)"));
}

#[test]
fn test_went_up_alert_has_no_uptime() {
    let alert = StatusAlert::from_transition(
        "Wplace",
        &report(ServiceStatus::Up, false, Some(3600.0)),
    );

    assert_eq!(alert.title, "Wplace just went up!");
    assert_eq!(alert.color, COLOR_UP);
    assert_eq!(alert.field("Down since"), Some("Tue, 14 Oct 2025 12:00:00 GMT"));
    assert!(alert.field("Backend uptime").is_none());
}

#[test]
fn test_since_start_alert_omits_since_field() {
    let alert = StatusAlert::from_transition("Wplace", &report(ServiceStatus::Down, true, None));

    assert_eq!(alert.description, "It was up since I started (2 hour(s) ago)");
    assert!(alert.fields.is_empty());
}

#[test]
fn test_payload_shape() {
    let alert = StatusAlert::from_transition("Wplace", &report(ServiceStatus::Up, false, None));
    let payload = alert.payload();

    let embed = &payload["embeds"][0];
    assert_eq!(embed["title"], "Wplace just went up!");
    assert_eq!(embed["color"], COLOR_UP);
    assert_eq!(embed["fields"][0]["name"], "Down since");
    assert_eq!(payload["embeds"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_status_color() {
    assert_eq!(ServiceStatus::Up.color(), 4362485);
    assert_eq!(ServiceStatus::Down.color(), 16078658);
}
