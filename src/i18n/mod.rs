// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent `.ftl` files embedded at build time from
//! `assets/i18n/`. Locale resolution order: CLI flag, config file, system
//! locale, then the `en-US` fallback.

pub mod fluent;
