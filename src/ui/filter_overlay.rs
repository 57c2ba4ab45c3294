// SPDX-License-Identifier: MPL-2.0
//! Filter preset to compositing overlay.
//!
//! A filter is drawn as a flat color layer over the media. This is a pure
//! mapping with no state; the same preset always yields the same overlay.

use crate::domain::story::FilterPreset;
use crate::ui::design_tokens::{opacity, palette};
use iced::Color;

/// Flat color layer drawn over a story.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterOverlay {
    /// Layer color, fully opaque.
    pub color: Color,
    /// Layer opacity in 0.0–1.0.
    pub opacity: f32,
}

impl FilterOverlay {
    /// The layer color with its opacity applied, ready for a container background.
    #[must_use]
    pub fn composited(self) -> Color {
        Color {
            a: self.opacity,
            ..self.color
        }
    }
}

/// Resolves the overlay for a preset, `None` for [`FilterPreset::Original`].
#[must_use]
pub fn resolve(preset: FilterPreset) -> Option<FilterOverlay> {
    let (color, opacity) = match preset {
        FilterPreset::Original => return None,
        FilterPreset::Warm => (palette::TINT_WARM, opacity::FILTER_MEDIUM),
        FilterPreset::Cool => (palette::TINT_COOL, opacity::FILTER_MEDIUM),
        FilterPreset::Sepia => (palette::TINT_SEPIA, opacity::FILTER_STRONG),
        FilterPreset::Noir => (palette::BLACK, opacity::FILTER_STRONG),
        FilterPreset::Fade => (palette::WHITE, opacity::FILTER_MEDIUM),
        FilterPreset::Rose => (palette::TINT_ROSE, opacity::FILTER_LIGHT),
    };
    Some(FilterOverlay { color, opacity })
}
