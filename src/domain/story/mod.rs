// SPDX-License-Identifier: MPL-2.0
//! Story domain types.
//!
//! This module contains story-related value objects and enums that are
//! independent of any presentation or infrastructure concerns.

pub mod newtypes;
pub mod phase;
pub mod rail;
pub mod types;

// Re-export commonly used types
pub use newtypes::{DisplayDuration, Progress, RosterEpoch};
pub use phase::Phase;
pub use rail::{RailEntry, StoriesRail};
pub use types::{
    AuthorId, FilterPreset, MediaKind, MediaRef, Story, StoryGroup, StoryId, Viewer, ViewerRoster,
};
