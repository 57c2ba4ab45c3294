// SPDX-License-Identifier: MPL-2.0
//! User interface components following the Elm-style "state down, messages up" pattern.
//!
//! # Screens
//!
//! - [`story_viewer`] - Full-screen story playback with gestures and progress segments
//!
//! # Shared Infrastructure
//!
//! - [`design_tokens`] - Design system constants (colors, opacity, spacing, sizing)
//! - [`filter_overlay`] - Filter preset to color layer mapping
//! - [`notifications`] - Toast notification system for user feedback

pub mod design_tokens;
pub mod filter_overlay;
pub mod notifications;
pub mod story_viewer;
