// SPDX-License-Identifier: MPL-2.0
//! Design tokens shared by the story screens.
//!
//! - **Palette**: base, status and filter tint colors
//! - **Opacity**: standardized opacity levels
//! - **Spacing**: 8px grid
//! - **Sizing**: progress segments and header band
//!
//! ```
//! use story_lens::ui::design_tokens::{opacity, palette};
//! use iced::Color;
//!
//! let scrim = Color {
//!     a: opacity::OVERLAY_MEDIUM,
//!     ..palette::BLACK
//! };
//! assert_eq!(scrim.a, 0.5);
//! ```

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);

    // Status
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);

    // Filter tints (alpha applied separately)
    pub const TINT_WARM: Color = Color::from_rgb(1.0, 0.6, 0.2);
    pub const TINT_COOL: Color = Color::from_rgb(0.2, 0.5, 1.0);
    pub const TINT_SEPIA: Color = Color::from_rgb(0.44, 0.26, 0.08);
    pub const TINT_ROSE: Color = Color::from_rgb(1.0, 0.4, 0.6);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OPAQUE: f32 = 1.0;

    /// Filter overlays stay light enough to keep the media readable.
    pub const FILTER_LIGHT: f32 = 0.15;
    pub const FILTER_MEDIUM: f32 = 0.25;
    pub const FILTER_STRONG: f32 = 0.35;
}

// ============================================================================
// Spacing Scale (8px grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
}

// ============================================================================
// Sizing
// ============================================================================

pub mod sizing {
    /// Height of one progress segment in the header.
    pub const PROGRESS_SEGMENT: f32 = 3.0;
    /// Gap between progress segments.
    pub const PROGRESS_GAP: f32 = 4.0;
    pub const TOAST_WIDTH: f32 = 320.0;
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::FILTER_LIGHT < opacity::FILTER_MEDIUM);
    assert!(opacity::FILTER_MEDIUM < opacity::FILTER_STRONG);
    assert!(opacity::FILTER_STRONG < opacity::OVERLAY_MEDIUM);

    assert!(sizing::PROGRESS_SEGMENT > 0.0);
};
