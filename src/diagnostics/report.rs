// SPDX-License-Identifier: MPL-2.0
//! JSON export of a session's diagnostic events.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{DiagnosticEvent, DiagnosticEventKind};

/// Snapshot of the collector, serialized by `DiagnosticsCollector::export_json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagnosticReport {
    pub report_id: String,
    pub crate_version: String,
    /// RFC 3339, wall clock.
    pub generated_at: String,
    pub collection_started_at: String,
    pub collection_duration_ms: u64,
    /// Absorbed failures (mark-seen, roster).
    pub warnings: usize,
    /// Failures shown to the user.
    pub errors: usize,
    pub events: Vec<ReportEntry>,
}

/// One event, timed relative to the start of collection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportEntry {
    pub at_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl DiagnosticReport {
    pub(super) fn build<'a>(
        started_at: Instant,
        started_at_utc: DateTime<Utc>,
        events: impl IntoIterator<Item = &'a DiagnosticEvent>,
    ) -> Self {
        let events: Vec<ReportEntry> = events
            .into_iter()
            .map(|event| ReportEntry {
                at_ms: millis_between(started_at, event.timestamp),
                kind: event.kind.clone(),
            })
            .collect();
        let count = |pred: fn(&DiagnosticEventKind) -> bool| {
            events.iter().filter(|entry| pred(&entry.kind)).count()
        };
        let warnings = count(|kind| matches!(kind, DiagnosticEventKind::Warning { .. }));
        let errors = count(|kind| matches!(kind, DiagnosticEventKind::Error { .. }));

        Self {
            report_id: Uuid::new_v4().to_string(),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now().to_rfc3339(),
            collection_started_at: started_at_utc.to_rfc3339(),
            collection_duration_ms: millis_between(started_at, Instant::now()),
            warnings,
            errors,
            events,
        }
    }
}

fn millis_between(from: Instant, to: Instant) -> u64 {
    u64::try_from(to.saturating_duration_since(from).as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::UserAction;
    use std::time::Duration;

    fn event(kind: DiagnosticEventKind, at: Instant) -> DiagnosticEvent {
        DiagnosticEvent::with_timestamp(kind, at)
    }

    #[test]
    fn entries_are_timed_from_collection_start() {
        let start = Instant::now();
        let events = [
            event(
                DiagnosticEventKind::UserAction {
                    action: UserAction::NavigateNext,
                    details: None,
                },
                start + Duration::from_millis(1_500),
            ),
            // Recorded before collection started; clamps to zero.
            event(
                DiagnosticEventKind::Warning {
                    message: "w".to_string(),
                },
                start,
            ),
        ];
        let report = DiagnosticReport::build(start + Duration::from_millis(10), Utc::now(), &events);

        let times: Vec<_> = report.events.iter().map(|e| e.at_ms).collect();
        assert_eq!(times, vec![1_490, 0]);
        assert_eq!(report.crate_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn failures_are_tallied_by_severity() {
        let start = Instant::now();
        let warning = |message: &str| {
            event(
                DiagnosticEventKind::Warning {
                    message: message.to_string(),
                },
                start,
            )
        };
        let events = [
            warning("mark seen failed for a"),
            warning("roster fetch failed"),
            event(
                DiagnosticEventKind::Error {
                    message: "delete failed".to_string(),
                },
                start,
            ),
        ];
        let report = DiagnosticReport::build(start, Utc::now(), &events);

        assert_eq!(report.warnings, 2);
        assert_eq!(report.errors, 1);
        assert_eq!(report.events.len(), 3);
    }

    #[test]
    fn each_report_gets_its_own_id() {
        let start = Instant::now();
        let a = DiagnosticReport::build(start, Utc::now(), std::iter::empty());
        let b = DiagnosticReport::build(start, Utc::now(), std::iter::empty());
        assert_ne!(a.report_id, b.report_id);
    }
}
