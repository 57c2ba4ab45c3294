// SPDX-License-Identifier: MPL-2.0
//! Story playback newtypes.
//!
//! This module provides type-safe wrappers for playback values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Progress
// =============================================================================

/// Normalized playback progress of the active story, guaranteed to be within 0.0–1.0.
///
/// Non-finite inputs (NaN from a zero-length division) collapse to 0.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Progress(f32);

impl Progress {
    /// Progress at the beginning of an item.
    pub const ZERO: Self = Self(0.0);
    /// Progress at the end of an item.
    pub const COMPLETE: Self = Self(1.0);

    /// Creates a new progress value, clamping to the valid range.
    #[must_use]
    pub fn new(fraction: f32) -> Self {
        if fraction.is_finite() {
            Self(fraction.clamp(0.0, 1.0))
        } else {
            Self::ZERO
        }
    }

    /// Builds a progress value from an elapsed/total pair.
    ///
    /// A zero total yields [`Progress::ZERO`].
    #[must_use]
    pub fn from_ratio(elapsed: Duration, total: Duration) -> Self {
        if total.is_zero() {
            return Self::ZERO;
        }
        Self::new((elapsed.as_secs_f64() / total.as_secs_f64()) as f32)
    }

    /// Returns the raw fraction.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true once the item has fully elapsed.
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= 1.0
    }

    /// Returns the part of `total` that is still ahead of this progress.
    #[must_use]
    pub fn remaining_of(self, total: Duration) -> Duration {
        total.mul_f64(f64::from(1.0 - self.0))
    }
}

// =============================================================================
// Display Duration
// =============================================================================

/// Display duration bounds for photo stories, in milliseconds.
pub mod duration_bounds {
    /// Shortest allowed photo display time.
    pub const MIN_MS: u64 = 1_000;
    /// Longest allowed photo display time.
    pub const MAX_MS: u64 = 60_000;
    /// Display time used when a photo story does not carry one.
    pub const DEFAULT_MS: u64 = 7_000;
}

/// How long a photo story stays on screen, guaranteed to be within 1–60 seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayDuration(u64);

impl DisplayDuration {
    /// Creates a new display duration, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(duration_bounds::MIN_MS, duration_bounds::MAX_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the value as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for DisplayDuration {
    fn default() -> Self {
        Self(duration_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Roster Epoch
// =============================================================================

/// Monotonic counter stamped on every viewer-roster request.
///
/// A response is only applied when its epoch equals the session's current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RosterEpoch(u64);

impl RosterEpoch {
    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the following epoch.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
