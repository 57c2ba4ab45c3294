// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the playback core remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`story`]: Story backend (group fetch, seen reporting, viewer roster, deletion)
//! - [`player`]: Native media playback primitive and its status callback
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles, no HTTP client types)
//! - [`StoryService`] is `Send + Sync` so one instance can serve concurrent tasks
//! - Methods return `Result` with [`ServiceError`](crate::error::ServiceError)
//! - No `async fn` - use Iced's `Task` return type pattern in callers
//!
//! # Example
//!
//! ```ignore
//! use story_lens::application::port::StoryService;
//! use story_lens::domain::story::AuthorId;
//!
//! fn count_unseen(service: &impl StoryService, author: &AuthorId) -> usize {
//!     service
//!         .fetch_story_group(author)
//!         .map(|stories| stories.iter().filter(|s| !s.seen_by_current_viewer).count())
//!         .unwrap_or(0)
//! }
//! ```

pub mod player;
pub mod story;

// Re-export main types for convenience
pub use player::{MediaPlayer, PlayerStatus};
pub use story::StoryService;
