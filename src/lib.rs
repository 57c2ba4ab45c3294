// SPDX-License-Identifier: MPL-2.0
//! `story_lens` plays ephemeral story groups inside an Iced application.
//!
//! The playback core in [`playback`] is a message-driven state machine: it
//! advances a per-story progress clock, interprets taps, holds and dismiss
//! drags, records views once, and keeps the owner's viewer roster in step
//! with the active story. It performs no I/O; effects are carried out by
//! [`ui::story_viewer`] against the ports in [`application::port`].

#![doc(html_root_url = "https://docs.rs/story_lens/0.1.0")]

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod playback;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
