// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Messages are Fluent `.ftl` files embedded at build time. Error variants
//! and filter presets expose an `i18n_key()` that is resolved here.
//!
//! # Features
//!
//! - Locale from an explicit request, the config file or the OS
//! - Named arguments (`{ $count }`) through [`I18n::tr_with_args`]
//! - Fallback to en-US when the preferred locale is not shipped

pub mod fluent;

pub use fluent::I18n;
