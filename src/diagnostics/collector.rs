// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! Sessions log through a cloned [`DiagnosticsHandle`]; the owner of the
//! [`DiagnosticsCollector`] drains the channel into the circular buffer on its
//! own schedule (typically once per UI tick).

use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};

use super::{
    BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, DiagnosticReport,
    SessionStateEvent, UserAction,
};

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Events are sent via a bounded channel to avoid blocking the UI thread.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Logs a user action event.
    ///
    /// Non-blocking; the event is dropped if the channel is full.
    pub fn log_action(&self, action: UserAction) {
        self.log_action_with_details(action, None);
    }

    /// Logs a user action event with optional details.
    pub fn log_action_with_details(&self, action: UserAction, details: Option<String>) {
        self.send(DiagnosticEventKind::UserAction { action, details });
    }

    /// Logs a session state change.
    pub fn log_state(&self, state: SessionStateEvent) {
        self.send(DiagnosticEventKind::SessionState { state });
    }

    /// Logs a failure that was absorbed.
    pub fn log_warning(&self, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Warning {
            message: message.into(),
        });
    }

    /// Logs a failure that was surfaced to the user.
    pub fn log_error(&self, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Error {
            message: message.into(),
        });
    }

    fn send(&self, kind: DiagnosticEventKind) {
        // Non-blocking send - drop if channel is full
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Central collector for diagnostic events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    /// Sender stored to create handles.
    event_tx: Sender<DiagnosticEvent>,
    /// When collection started (monotonic clock for duration calculations).
    collection_started_at: Instant,
    /// When collection started (wall clock for report metadata).
    collection_started_at_utc: DateTime<Utc>,
}

/// Channel capacity between handles and the collector.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

impl DiagnosticsCollector {
    /// Creates a new diagnostics collector with the specified buffer capacity.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves every pending event from the channel into the buffer.
    pub fn process_pending(&mut self) {
        self.buffer.extend(self.event_rx.try_iter());
    }

    /// Returns the number of events currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if no events are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Clears all stored events.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Returns the buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports all collected events as a JSON diagnostic report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        let report = DiagnosticReport::build(
            self.collection_started_at,
            self.collection_started_at_utc,
            self.buffer.iter(),
        );
        serde_json::to_string_pretty(&report)
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_new_creates_empty_buffer() {
        let collector = DiagnosticsCollector::default();
        assert!(collector.is_empty());
        assert_eq!(collector.capacity(), BufferCapacity::default().value());
    }

    #[test]
    fn handle_events_arrive_after_processing() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log_action(UserAction::NavigateNext);
        handle.log_state(SessionStateEvent::SequenceExhausted);
        handle.log_warning("mark seen failed");
        assert!(collector.is_empty());

        collector.process_pending();
        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticEventKind::UserAction {
                    action: UserAction::NavigateNext,
                    details: None,
                },
                DiagnosticEventKind::SessionState {
                    state: SessionStateEvent::SequenceExhausted,
                },
                DiagnosticEventKind::Warning {
                    message: "mark seen failed".to_string(),
                },
            ]
        );
    }

    #[test]
    fn full_channel_drops_events() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        for _ in 0..=DEFAULT_CHANNEL_CAPACITY {
            handle.log_action(UserAction::TogglePause);
        }
        collector.process_pending();
        assert_eq!(collector.len(), DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn handle_is_clone() {
        let mut collector = DiagnosticsCollector::default();
        let a = collector.handle();
        let b = a.clone();
        a.log_error("delete failed");
        b.log_action(UserAction::Close);
        collector.process_pending();
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn export_json_contains_events_and_tallies() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        handle.log_action(UserAction::OpenGroup {
            story_count: 3,
            is_own: false,
        });
        handle.log_warning("roster fetch failed");
        collector.process_pending();

        let json = collector.export_json().expect("export should succeed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["events"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["events"][0]["type"], "user_action");
        assert_eq!(value["events"][0]["action"]["action"], "open_group");
        assert_eq!(value["warnings"], 1);
        assert_eq!(value["errors"], 0);
    }

    #[test]
    fn clear_removes_all_events() {
        let mut collector = DiagnosticsCollector::default();
        collector.handle().log_action(UserAction::HoldPause);
        collector.process_pending();
        collector.clear();
        assert!(collector.is_empty());
    }
}
