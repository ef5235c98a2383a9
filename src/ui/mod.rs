// SPDX-License-Identifier: MPL-2.0
//! User interface components and styling.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! one owns a `State`, turns its `Message`s into `Event`s for the container
//! and renders from a borrowed `ViewContext`.
//!
//! - [`video_modal`] - Video overlay with native and embedded players
//! - [`styles`] - Centralized styling (buttons, containers, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod styles;
pub mod theming;
pub mod video_modal;
