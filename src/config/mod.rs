// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use story_lens::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.photo_duration_ms = Some(5_000);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.photo_duration_ms, Some(5_000));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

mod defaults;

pub use defaults::*;

use crate::domain::story::DisplayDuration;
use crate::error::Result;
use crate::playback::gesture::GestureSettings;
use crate::playback::session::SessionSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "StoryLens";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub photo_duration_ms: Option<u64>,
    #[serde(default)]
    pub tap_slop_px: Option<f32>,
    #[serde(default)]
    pub long_press_ms: Option<u64>,
    #[serde(default)]
    pub dismiss_threshold_px: Option<f32>,
    #[serde(default)]
    pub dismiss_velocity_px_per_sec: Option<f32>,
    #[serde(default)]
    pub drag_top_inset_px: Option<f32>,
    #[serde(default)]
    pub diagnostics_buffer_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            photo_duration_ms: Some(DEFAULT_PHOTO_DURATION_MS),
            tap_slop_px: Some(DEFAULT_TAP_SLOP_PX),
            long_press_ms: Some(DEFAULT_LONG_PRESS_MS),
            dismiss_threshold_px: Some(DEFAULT_DISMISS_THRESHOLD_PX),
            dismiss_velocity_px_per_sec: Some(DEFAULT_DISMISS_VELOCITY_PX_PER_SEC),
            drag_top_inset_px: Some(DEFAULT_DRAG_TOP_INSET_PX),
            diagnostics_buffer_capacity: Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        }
    }
}

impl Config {
    /// Gesture thresholds, falling back to defaults for missing or negative values.
    #[must_use]
    pub fn gesture_settings(&self) -> GestureSettings {
        let positive = |value: Option<f32>, default: f32| {
            value.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(default)
        };
        GestureSettings {
            tap_slop_px: positive(self.tap_slop_px, DEFAULT_TAP_SLOP_PX),
            long_press_delay: Duration::from_millis(
                self.long_press_ms.unwrap_or(DEFAULT_LONG_PRESS_MS),
            ),
            dismiss_threshold_px: positive(self.dismiss_threshold_px, DEFAULT_DISMISS_THRESHOLD_PX),
            dismiss_velocity_px_per_sec: positive(
                self.dismiss_velocity_px_per_sec,
                DEFAULT_DISMISS_VELOCITY_PX_PER_SEC,
            ),
            top_inset_px: positive(self.drag_top_inset_px, DEFAULT_DRAG_TOP_INSET_PX),
        }
    }

    /// Session tunables derived from this configuration.
    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            default_photo_duration: DisplayDuration::from_millis(
                self.photo_duration_ms.unwrap_or(DEFAULT_PHOTO_DURATION_MS),
            ),
            gestures: self.gesture_settings(),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
