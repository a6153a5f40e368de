//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use novatrace::records::{Alert, AlertFilter, BrokerStatus, Event};

/// Global dashboard state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Alerts fetched from the backend
    pub alerts: RwSignal<Vec<Alert>>,
    /// Events fetched from the backend
    pub events: RwSignal<Vec<Event>>,
    /// Broker status rows
    pub brokers: RwSignal<Vec<BrokerStatus>>,
    /// Dropdown selection on the alert list
    pub filter: RwSignal<AlertFilter>,
    /// Payload shown in the preformatted modal
    pub detail: RwSignal<Option<Detail>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Last successful fetch (ms since epoch)
    pub last_sync: RwSignal<Option<i64>>,
}

/// Titled JSON block for the modal
#[derive(Clone, Debug, PartialEq)]
pub struct Detail {
    pub title: String,
    pub body: String,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState::new();
    provide_context(state.clone());
    state
}

impl GlobalState {
    pub fn new() -> Self {
        Self {
            alerts: create_rw_signal(Vec::new()),
            events: create_rw_signal(Vec::new()),
            brokers: create_rw_signal(Vec::new()),
            filter: create_rw_signal(AlertFilter::default()),
            detail: create_rw_signal(None),
            loading: create_rw_signal(false),
            error: create_rw_signal(None),
            last_sync: create_rw_signal(None),
        }
    }

    /// Alerts passing the current filter, newest first
    pub fn visible_alerts(&self) -> Vec<Alert> {
        let filter = self.filter.get();
        self.alerts
            .with(|alerts| filter.apply(alerts).into_iter().cloned().collect())
    }

    /// Set the broker dropdown; an empty value means "all"
    pub fn select_broker(&self, broker: String) {
        self.filter
            .update(|f| f.broker = (!broker.is_empty()).then_some(broker));
    }

    /// Set the tag dropdown; an empty value means "all"
    pub fn select_tag(&self, tag: String) {
        self.filter.update(|f| f.tag = (!tag.is_empty()).then_some(tag));
    }

    pub fn show_detail(&self, title: impl Into<String>, body: String) {
        self.detail.set(Some(Detail {
            title: title.into(),
            body,
        }));
    }

    pub fn close_detail(&self) {
        self.detail.set(None);
    }

    pub fn mark_synced(&self) {
        self.last_sync.set(Some(chrono::Utc::now().timestamp_millis()));
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn alert(id: &str, broker: &str, minute: u32, tags: &[&str]) -> Alert {
        Alert {
            id: id.to_string(),
            broker: broker.to_string(),
            object_id: None,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap(),
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
    fn test_filter_selection() {
        let runtime = create_runtime();
        let state = GlobalState::new();
        state.alerts.set(vec![
            alert("a1", "alerce", 1, &["sn"]),
            alert("a2", "fink", 2, &["sn"]),
            alert("a3", "alerce", 3, &["agn"]),
        ]);

        state.select_broker("alerce".to_string());
        let ids: Vec<String> = state.visible_alerts().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a3", "a1"]);

        state.select_tag("sn".to_string());
        assert_eq!(state.visible_alerts().len(), 1);

        // empty dropdown value resets to "all"
        state.select_broker(String::new());
        state.select_tag(String::new());
        assert_eq!(state.filter.get_untracked(), AlertFilter::default());
        assert_eq!(state.visible_alerts().len(), 3);

        runtime.dispose();
    }

    #[test]
    fn test_detail_modal() {
        let runtime = create_runtime();
        let state = GlobalState::new();
        state.show_detail("Alert a1", "{}".to_string());
        assert_eq!(state.detail.get_untracked().map(|d| d.title), Some("Alert a1".to_string()));
        state.close_detail();
        assert!(state.detail.get_untracked().is_none());
        runtime.dispose();
    }
}
