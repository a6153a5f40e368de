//! Alert and event records
//!
//! Read-only shapes received from the external alert API and rendered by the
//! NovaTrace dashboard. Nothing here mutates or produces records.
//!
//! - `Alert`: one broker alert for a transient candidate
//! - `Event`: a grouped occurrence referencing one or more alerts
//! - `BrokerStatus`: health summary shown on the status view
//! - `AlertFilter`: the dashboard's broker/tag dropdown selection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single alert as published by a broker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: String,
    /// Broker that distributed the alert (e.g. "fink", "alerce")
    pub broker: String,
    /// Survey object identifier
    #[serde(default)]
    pub object_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Right ascension in degrees
    #[serde(default)]
    pub ra: Option<f64>,
    /// Declination in degrees
    #[serde(default)]
    pub dec: Option<f64>,
    #[serde(default)]
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub magnitude_error: Option<f64>,
    /// Photometric band
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default)]
    pub classification: Option<String>,
    /// Original broker payload, untouched
    #[serde(default)]
    pub raw: serde_json::Value,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Alert {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Raw payload as indented JSON for preformatted display
    pub fn pretty_raw(&self) -> String {
        pretty_json(&self.raw)
    }

    /// `"RA 123.4567°, Dec -12.3456°"` when both coordinates are known
    pub fn coordinates(&self) -> Option<String> {
        match (self.ra, self.dec) {
            (Some(ra), Some(dec)) => Some(format!("RA {:.4}°, Dec {:+.4}°", ra, dec)),
            _ => None,
        }
    }
}

/// An event grouping related alerts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: String,
    /// Origin of the event (broker, crossmatch service, ...)
    pub source: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub alert_ids: Vec<String>,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Event {
    pub fn pretty_payload(&self) -> String {
        pretty_json(&self.payload)
    }
}

/// Broker connectivity as reported by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BrokerState {
    Online,
    Degraded,
    Offline,
}

/// Per-broker status row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrokerStatus {
    pub broker: String,
    pub state: BrokerState,
    #[serde(default)]
    pub last_alert_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub alerts_last_hour: u64,
}

/// Dropdown selection on the alert list. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub broker: Option<String>,
    pub tag: Option<String>,
}

impl AlertFilter {
    pub fn broker(mut self, broker: impl Into<String>) -> Self {
        self.broker = Some(broker.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn matches(&self, alert: &Alert) -> bool {
        let broker_ok = self.broker.as_deref().map_or(true, |b| alert.broker == b);
        let tag_ok = self.tag.as_deref().map_or(true, |t| alert.has_tag(t));
        broker_ok && tag_ok
    }

    /// Matching alerts, newest first
    pub fn apply<'a>(&self, alerts: &'a [Alert]) -> Vec<&'a Alert> {
        let mut matched: Vec<&Alert> = alerts.iter().filter(|a| self.matches(a)).collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matched
    }

    /// Distinct brokers, sorted, for populating the broker dropdown
    pub fn broker_options(alerts: &[Alert]) -> Vec<String> {
        alerts
            .iter()
            .map(|a| a.broker.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct tags, sorted, for populating the tag dropdown
    pub fn tag_options(alerts: &[Alert]) -> Vec<String> {
        alerts
            .iter()
            .flat_map(|a| a.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn alert(id: &str, broker: &str, hour: u32, tags: &[&str]) -> Alert {
        Alert {
            id: id.to_string(),
            broker: broker.to_string(),
            object_id: None,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            ra: None,
            dec: None,
            magnitude: None,
            magnitude_error: None,
            band: None,
            classification: None,
            raw: serde_json::Value::Null,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_deserialize_minimal_alert() {
        let json = r#"{
            "id": "ZTF24aaabcde-1",
            "broker": "fink",
            "timestamp": "2024-03-01T12:00:00Z",
            "ra": 150.025,
            "dec": -2.5,
            "raw": {"candid": 2517301234015015003}
        }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.broker, "fink");
        assert!(alert.tags.is_empty());
        assert_eq!(alert.coordinates().as_deref(), Some("RA 150.0250°, Dec -2.5000°"));
        assert!(alert.pretty_raw().contains("\"candid\""));
    }

    #[test]
    fn test_deserialize_event() {
        let json = r#"{
            "id": "evt-7",
            "source": "crossmatch",
            "timestamp": "2024-03-01T13:30:00Z",
            "alert_ids": ["a1", "a2"]
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.alert_ids.len(), 2);
        assert_eq!(event.pretty_payload(), "null");
    }

    #[test]
    fn test_broker_status_state() {
        let status: BrokerStatus =
            serde_json::from_str(r#"{"broker": "alerce", "state": "degraded"}"#).unwrap();
        assert_eq!(status.state, BrokerState::Degraded);
        assert_eq!(status.alerts_last_hour, 0);
    }

    #[test]
    fn test_filter_matches() {
        let alerts = vec![
            alert("a", "fink", 1, &["sn"]),
            alert("b", "alerce", 3, &["sn", "kilonova"]),
            alert("c", "fink", 2, &[]),
        ];

        let all = AlertFilter::default().apply(&alerts);
        assert_eq!(all.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(), vec!["b", "c", "a"]);

        let fink = AlertFilter::default().broker("fink").apply(&alerts);
        assert_eq!(fink.len(), 2);

        let sn_fink = AlertFilter::default().broker("fink").tag("sn").apply(&alerts);
        assert_eq!(sn_fink.len(), 1);
        assert_eq!(sn_fink[0].id, "a");
    }

    #[test]
    fn test_dropdown_options() {
        let alerts = vec![
            alert("a", "fink", 1, &["sn"]),
            alert("b", "alerce", 3, &["sn", "kilonova"]),
        ];
        assert_eq!(AlertFilter::broker_options(&alerts), vec!["alerce", "fink"]);
        assert_eq!(AlertFilter::tag_options(&alerts), vec!["kilonova", "sn"]);
    }
}
