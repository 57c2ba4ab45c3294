// SPDX-License-Identifier: MPL-2.0
//! Native media playback port definition.
//!
//! Video stories are not timed by the core: the platform player owns the
//! clock and reports it through periodic [`PlayerStatus`] callbacks, which the
//! session mirrors as progress.

use std::time::Duration;

/// Periodic status reported by the native player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStatus {
    /// Current position in milliseconds.
    pub position_ms: u64,
    /// Total duration in milliseconds (0 while unknown).
    pub duration_ms: u64,
    /// Whether the player is currently advancing.
    pub is_playing: bool,
    /// Set on the single callback that follows end of playback.
    pub did_just_finish: bool,
}

impl PlayerStatus {
    /// Status for a player advancing at `position_ms` out of `duration_ms`.
    #[must_use]
    pub fn playing(position_ms: u64, duration_ms: u64) -> Self {
        Self {
            position_ms,
            duration_ms,
            is_playing: true,
            did_just_finish: false,
        }
    }

    /// Status emitted once playback reached the end.
    #[must_use]
    pub fn finished(duration_ms: u64) -> Self {
        Self {
            position_ms: duration_ms,
            duration_ms,
            is_playing: false,
            did_just_finish: true,
        }
    }

    /// Reported position as a [`Duration`].
    #[must_use]
    pub fn position(&self) -> Duration {
        Duration::from_millis(self.position_ms)
    }

    /// Reported duration, `None` while the player does not know it yet.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        (self.duration_ms > 0).then(|| Duration::from_millis(self.duration_ms))
    }
}

/// Port for the native media playback primitive.
///
/// The screen owns the player; the session only asks for play, pause and
/// seek through effects.
pub trait MediaPlayer {
    /// Starts or resumes playback.
    fn play(&mut self);

    /// Pauses playback, keeping the position.
    fn pause(&mut self);

    /// Moves to a position.
    fn seek(&mut self, position: Duration);
}
