// SPDX-License-Identifier: MPL-2.0
//! Story session phases.
//!
//! Exactly one phase holds at any instant. `Closing` is transitional: the
//! screen runs its exhausted/dismiss callback and then finalizes to `Closed`.

use super::newtypes::Progress;

/// Phase of a story playback session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Phase {
    /// Active item's media is loading; the clock is not running.
    #[default]
    Loading,
    /// Clock running.
    Playing,
    /// Clock frozen at the given fraction.
    Paused(Progress),
    /// Dismiss drag in progress; the clock is frozen.
    Dragging,
    /// Sequence exhausted or dismiss committed; waiting for finalization.
    Closing,
    /// Terminal.
    Closed,
}

impl Phase {
    /// Returns true while the clock is running.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true when paused by tap, long-press or a pending action.
    #[must_use]
    pub fn is_paused(self) -> bool {
        matches!(self, Self::Paused(_))
    }

    /// Returns true during a dismiss drag.
    #[must_use]
    pub fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging)
    }

    /// Returns true for `Closing` and `Closed`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closing | Self::Closed)
    }

    /// Returns true when progress is meaningful for display.
    #[must_use]
    pub fn shows_progress(self) -> bool {
        !self.is_terminal()
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused(_) => "paused",
            Self::Dragging => "dragging",
            Self::Closing => "closing",
            Self::Closed => "closed",
        }
    }
}
