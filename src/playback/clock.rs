// SPDX-License-Identifier: MPL-2.0
//! Progress clock for the active story.
//!
//! Photos are self-timed: progress runs from 0 to 1 over a fixed duration and
//! can be paused and resumed without a visual jump. Videos are player-driven:
//! the clock only mirrors the native player's reported position.
//!
//! Time is injected (`now: Instant`) so every transition is a pure function of
//! its inputs and can be tested without a render loop.

use crate::application::port::PlayerStatus;
use crate::domain::story::Progress;
use std::time::{Duration, Instant};

/// What drives progress for the item being started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// Internal timer over the given duration.
    Timed(Duration),
    /// Native player status callbacks.
    Player,
}

/// Outcome of feeding time or a player status into the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// Nothing changed (stopped, paused or already completed).
    Idle,
    /// Progress moved.
    Advanced,
    /// The item reached its end. Emitted at most once per start.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drive {
    Stopped,
    Timed {
        total: Duration,
        /// Start of the current running segment; `None` while paused.
        anchor: Option<Instant>,
        /// Progress at the start of the current segment.
        anchor_progress: Progress,
    },
    Player {
        playing: bool,
    },
}

/// Normalized progress of the active story.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressClock {
    drive: Drive,
    progress: Progress,
    completed: bool,
}

impl Default for ProgressClock {
    fn default() -> Self {
        Self {
            drive: Drive::Stopped,
            progress: Progress::ZERO,
            completed: false,
        }
    }
}

impl ProgressClock {
    /// Creates a stopped clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh run from 0.
    pub fn start(&mut self, source: ClockSource, now: Instant) {
        self.progress = Progress::ZERO;
        self.completed = false;
        self.drive = match source {
            ClockSource::Timed(total) => Drive::Timed {
                total,
                anchor: Some(now),
                anchor_progress: Progress::ZERO,
            },
            ClockSource::Player => Drive::Player { playing: true },
        };
    }

    /// Freezes progress at its current fraction.
    ///
    /// Returns false when the clock was not running (idempotent).
    pub fn pause(&mut self, now: Instant) -> bool {
        let current = self.sample(now);
        match &mut self.drive {
            Drive::Timed {
                anchor,
                anchor_progress,
                ..
            } if anchor.is_some() => {
                *anchor = None;
                *anchor_progress = current;
                self.progress = current;
                true
            }
            Drive::Player { playing } if *playing => {
                *playing = false;
                true
            }
            _ => false,
        }
    }

    /// Restarts toward 1 from the frozen fraction.
    ///
    /// Returns the remaining time for self-timed items, `None` otherwise.
    pub fn resume(&mut self, now: Instant) -> Option<Duration> {
        if self.completed {
            return None;
        }
        let progress = self.progress;
        match &mut self.drive {
            Drive::Timed {
                total,
                anchor,
                anchor_progress,
            } => {
                if anchor.is_none() {
                    *anchor = Some(now);
                    *anchor_progress = progress;
                }
                Some(progress.remaining_of(*total))
            }
            Drive::Player { playing } => {
                *playing = true;
                None
            }
            Drive::Stopped => None,
        }
    }

    /// Sets progress back to 0 without completing; a running clock keeps running.
    pub fn reset(&mut self, now: Instant) {
        self.progress = Progress::ZERO;
        self.completed = false;
        if let Drive::Timed {
            anchor,
            anchor_progress,
            ..
        } = &mut self.drive
        {
            *anchor_progress = Progress::ZERO;
            if anchor.is_some() {
                *anchor = Some(now);
            }
        }
    }

    /// Stops the clock entirely (session close or item change).
    pub fn stop(&mut self) {
        self.drive = Drive::Stopped;
    }

    /// Advances a self-timed clock to `now`.
    pub fn tick(&mut self, now: Instant) -> ClockEvent {
        if self.completed || !matches!(self.drive, Drive::Timed { anchor: Some(_), .. }) {
            return ClockEvent::Idle;
        }
        self.progress = self.sample(now);
        if self.progress.is_complete() {
            self.complete();
            ClockEvent::Completed
        } else {
            ClockEvent::Advanced
        }
    }

    /// Mirrors a native player status into progress.
    pub fn on_player_status(&mut self, status: PlayerStatus) -> ClockEvent {
        if self.completed {
            return ClockEvent::Idle;
        }
        let Drive::Player { playing } = &mut self.drive else {
            return ClockEvent::Idle;
        };
        *playing = status.is_playing;
        if status.did_just_finish {
            self.complete();
            return ClockEvent::Completed;
        }
        match status.duration() {
            Some(total) => {
                self.progress = Progress::from_ratio(status.position(), total);
                ClockEvent::Advanced
            }
            None => ClockEvent::Idle,
        }
    }

    fn complete(&mut self) {
        self.progress = Progress::COMPLETE;
        self.completed = true;
        if let Drive::Timed {
            anchor,
            anchor_progress,
            ..
        } = &mut self.drive
        {
            *anchor = None;
            *anchor_progress = Progress::COMPLETE;
        }
    }

    fn sample(&self, now: Instant) -> Progress {
        match self.drive {
            Drive::Timed {
                total,
                anchor: Some(anchor),
                anchor_progress,
            } => {
                if total.is_zero() {
                    return Progress::COMPLETE;
                }
                let elapsed = now.saturating_duration_since(anchor);
                let delta = elapsed.as_secs_f64() / total.as_secs_f64();
                Progress::new(anchor_progress.value() + delta as f32)
            }
            _ => self.progress,
        }
    }

    /// Current progress.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Time left for a self-timed item.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        match self.drive {
            Drive::Timed { total, .. } => Some(self.progress.remaining_of(total)),
            _ => None,
        }
    }

    /// Whether progress is currently advancing.
    #[must_use]
    pub fn is_running(&self) -> bool {
        match self.drive {
            Drive::Timed { anchor, .. } => anchor.is_some(),
            Drive::Player { playing } => playing && !self.completed,
            Drive::Stopped => false,
        }
    }

    /// Whether the clock has fired its completion for the current run.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the clock mirrors a native player.
    #[must_use]
    pub fn is_player_driven(&self) -> bool {
        matches!(self.drive, Drive::Player { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    const TEN_SECONDS: Duration = Duration::from_millis(10_000);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn timed_clock_advances_linearly() {
        let t0 = Instant::now();
        let mut clock = ProgressClock::new();
        clock.start(ClockSource::Timed(TEN_SECONDS), t0);

        assert_eq!(clock.tick(t0 + ms(2_500)), ClockEvent::Advanced);
        assert_abs_diff_eq!(clock.progress().value(), 0.25, epsilon = 1e-4);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let t0 = Instant::now();
        let mut clock = ProgressClock::new();
        clock.start(ClockSource::Timed(TEN_SECONDS), t0);

        assert_eq!(clock.tick(t0 + ms(10_001)), ClockEvent::Completed);
        assert_eq!(clock.tick(t0 + ms(12_000)), ClockEvent::Idle);
        assert_eq!(clock.progress(), Progress::COMPLETE);
    }

    #[test]
    fn resume_continues_from_paused_fraction() {
        let t0 = Instant::now();
        let mut clock = ProgressClock::new();
        clock.start(ClockSource::Timed(TEN_SECONDS), t0);

        assert!(clock.pause(t0 + ms(4_000)));
        assert_abs_diff_eq!(clock.progress().value(), 0.4, epsilon = 1e-4);

        // Time spent paused does not count.
        let remaining = clock.resume(t0 + ms(9_000)).expect("timed clock");
        assert_abs_diff_eq!(remaining.as_secs_f64(), 6.0, epsilon = 1e-3);

        clock.tick(t0 + ms(12_000));
        assert_abs_diff_eq!(clock.progress().value(), 0.7, epsilon = 1e-4);
        assert_eq!(clock.tick(t0 + ms(15_000)), ClockEvent::Completed);
    }

    #[test]
    fn pause_is_idempotent() {
        let t0 = Instant::now();
        let mut clock = ProgressClock::new();
        clock.start(ClockSource::Timed(TEN_SECONDS), t0);

        assert!(clock.pause(t0 + ms(3_000)));
        let frozen = clock.progress();
        assert!(!clock.pause(t0 + ms(8_000)));
        assert_abs_diff_eq!(clock.progress().value(), frozen.value(), epsilon = F32_EPSILON);
        assert_eq!(clock.tick(t0 + ms(9_000)), ClockEvent::Idle);
    }

    #[test]
    fn reset_returns_to_zero_without_completion() {
        let t0 = Instant::now();
        let mut clock = ProgressClock::new();
        clock.start(ClockSource::Timed(TEN_SECONDS), t0);
        clock.tick(t0 + ms(6_000));

        clock.reset(t0 + ms(6_000));
        assert_eq!(clock.progress(), Progress::ZERO);
        assert!(!clock.is_completed());
        assert!(clock.is_running());

        clock.tick(t0 + ms(7_000));
        assert_abs_diff_eq!(clock.progress().value(), 0.1, epsilon = 1e-4);
    }

    #[test]
    fn reset_while_paused_stays_paused() {
        let t0 = Instant::now();
        let mut clock = ProgressClock::new();
        clock.start(ClockSource::Timed(TEN_SECONDS), t0);
        clock.pause(t0 + ms(5_000));

        clock.reset(t0 + ms(5_000));
        assert!(!clock.is_running());
        assert_eq!(clock.remaining(), Some(TEN_SECONDS));
    }

    #[test]
    fn player_driven_clock_mirrors_status() {
        let t0 = Instant::now();
        let mut clock = ProgressClock::new();
        clock.start(ClockSource::Player, t0);

        // Ticks do not move a player-driven clock.
        assert_eq!(clock.tick(t0 + ms(5_000)), ClockEvent::Idle);

        assert_eq!(
            clock.on_player_status(PlayerStatus::playing(3_000, 12_000)),
            ClockEvent::Advanced
        );
        assert_abs_diff_eq!(clock.progress().value(), 0.25, epsilon = 1e-4);
        assert!(clock.remaining().is_none());
    }

    #[test]
    fn player_finish_completes_immediately() {
        let t0 = Instant::now();
        let mut clock = ProgressClock::new();
        clock.start(ClockSource::Player, t0);
        clock.on_player_status(PlayerStatus::playing(1_000, 12_000));

        assert_eq!(
            clock.on_player_status(PlayerStatus::finished(12_000)),
            ClockEvent::Completed
        );
        assert_eq!(
            clock.on_player_status(PlayerStatus::finished(12_000)),
            ClockEvent::Idle
        );
    }

    #[test]
    fn player_status_without_duration_is_ignored() {
        let mut clock = ProgressClock::new();
        clock.start(ClockSource::Player, Instant::now());
        assert_eq!(
            clock.on_player_status(PlayerStatus::playing(500, 0)),
            ClockEvent::Idle
        );
        assert_eq!(clock.progress(), Progress::ZERO);
    }

    #[test]
    fn player_status_ignored_by_timed_clock() {
        let t0 = Instant::now();
        let mut clock = ProgressClock::new();
        clock.start(ClockSource::Timed(TEN_SECONDS), t0);
        assert_eq!(
            clock.on_player_status(PlayerStatus::finished(1_000)),
            ClockEvent::Idle
        );
        assert!(!clock.is_completed());
    }

    #[test]
    fn stopped_clock_ignores_everything() {
        let t0 = Instant::now();
        let mut clock = ProgressClock::new();
        clock.start(ClockSource::Timed(TEN_SECONDS), t0);
        clock.stop();

        assert!(!clock.is_running());
        assert!(!clock.pause(t0));
        assert!(clock.resume(t0).is_none());
        assert_eq!(clock.tick(t0 + ms(20_000)), ClockEvent::Idle);
    }
}
