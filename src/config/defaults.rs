// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Playback**: Photo display time and clock tick rate
//! - **Gestures**: Tap slop, long-press delay, dismiss thresholds
//! - **Diagnostics**: Event buffer capacity

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Display time of a photo story without its own duration (in milliseconds).
pub const DEFAULT_PHOTO_DURATION_MS: u64 = 7_000;

/// Minimum photo display time (in milliseconds).
pub const MIN_PHOTO_DURATION_MS: u64 = 1_000;

/// Maximum photo display time (in milliseconds).
pub const MAX_PHOTO_DURATION_MS: u64 = 60_000;

/// Interval between progress ticks while the clock runs (in milliseconds).
pub const PROGRESS_TICK_MS: u64 = 16;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Movement under which a pointer is still considered stationary (in pixels).
pub const DEFAULT_TAP_SLOP_PX: f32 = 10.0;

/// Hold time before a stationary press becomes a long-press (in milliseconds).
pub const DEFAULT_LONG_PRESS_MS: u64 = 250;

/// Downward travel that commits a dismiss drag (in pixels).
pub const DEFAULT_DISMISS_THRESHOLD_PX: f32 = 150.0;

/// Downward release speed that commits a dismiss drag (in pixels per second).
pub const DEFAULT_DISMISS_VELOCITY_PX_PER_SEC: f32 = 1_000.0;

/// Height of the header band where drags are not dismiss-intent (in pixels).
pub const DEFAULT_DRAG_TOP_INSET_PX: f32 = 64.0;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1_000;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Playback validation
    assert!(MIN_PHOTO_DURATION_MS > 0);
    assert!(MIN_PHOTO_DURATION_MS <= DEFAULT_PHOTO_DURATION_MS);
    assert!(MAX_PHOTO_DURATION_MS >= DEFAULT_PHOTO_DURATION_MS);
    assert!(PROGRESS_TICK_MS > 0);
    assert!(PROGRESS_TICK_MS < MIN_PHOTO_DURATION_MS);

    // Gesture validation
    assert!(DEFAULT_TAP_SLOP_PX > 0.0);
    assert!(DEFAULT_LONG_PRESS_MS > 0);
    assert!(DEFAULT_DISMISS_THRESHOLD_PX > DEFAULT_TAP_SLOP_PX);
    assert!(DEFAULT_DISMISS_VELOCITY_PX_PER_SEC > 0.0);
    assert!(DEFAULT_DRAG_TOP_INSET_PX >= 0.0);

    // Diagnostics validation
    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
