// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for story session activity.
//!
//! This module defines the events captured while a story group is being
//! viewed: what the user did, how the session moved between phases, and the
//! background failures that were absorbed instead of surfaced.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// User-initiated actions that can be captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    // ==========================================================================
    // Session Actions
    // ==========================================================================
    /// Open an author's story group.
    OpenGroup {
        /// Number of stories in the group.
        story_count: usize,
        /// Whether the group belongs to the current viewer.
        is_own: bool,
    },

    /// Close the viewer explicitly.
    Close,

    // ==========================================================================
    // Navigation Actions
    // ==========================================================================
    /// Tap in the right zone.
    NavigateNext,

    /// Tap in the left zone.
    NavigatePrevious,

    // ==========================================================================
    // Playback Actions
    // ==========================================================================
    /// Tap in the center zone.
    TogglePause,

    /// Long-press started.
    HoldPause,

    /// Long-press released.
    HoldRelease,

    /// Dismiss drag released.
    DismissDrag {
        /// Whether the drag passed a threshold.
        committed: bool,
    },

    // ==========================================================================
    // Owner Actions
    // ==========================================================================
    /// Delete the current story.
    DeleteStory,
}

/// Session state changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionStateEvent {
    /// The session moved between phases.
    PhaseChanged {
        /// Phase before the transition.
        from: String,
        /// Phase after the transition.
        to: String,
    },

    /// The last story finished or was skipped.
    SequenceExhausted,

    /// A story left the sequence (deletion or external removal).
    StoryRemoved {
        /// Stories left in the sequence.
        remaining: usize,
    },

    /// The current story's media could not be loaded.
    MediaFailed,
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    /// Creates a new diagnostic event with a specific timestamp.
    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// User-initiated action.
    UserAction {
        /// The specific action performed.
        action: UserAction,
        /// Optional additional details (e.g., story id).
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// Session state change.
    SessionState {
        /// The state change.
        state: SessionStateEvent,
    },

    /// Background failure that was absorbed.
    Warning {
        /// Brief description of the warning
        message: String,
    },

    /// Failure surfaced to the user.
    Error {
        /// Brief description of the error
        message: String,
    },
}
