// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording story session activity.
//!
//! Sessions emit structured events (user actions, phase changes, absorbed
//! failures) into a memory-bounded circular buffer that can be exported as a
//! JSON report.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event with a tagged [`DiagnosticEventKind`]
//! - [`DiagnosticsCollector`]: Owns the buffer, hands out [`DiagnosticsHandle`]s
//! - [`DiagnosticReport`]: JSON export with failure tallies

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, SessionStateEvent, UserAction};
pub use report::{DiagnosticReport, ReportEntry};
