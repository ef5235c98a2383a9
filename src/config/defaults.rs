// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Player**: Native playback defaults (autoplay, volume)
//! - **Modal**: Overlay geometry and entrance transition

// ==========================================================================
// Player Defaults
// ==========================================================================

/// Native videos start playing as soon as the first frame is ready.
pub const DEFAULT_AUTOPLAY: bool = true;

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

// ==========================================================================
// Modal Defaults
// ==========================================================================

/// Opacity of the black backdrop behind the content panel.
pub const DEFAULT_BACKDROP_OPACITY: f32 = 0.8;

/// Maximum width of the content panel in logical pixels.
pub const DEFAULT_MAX_PANEL_WIDTH: f32 = 896.0;

/// Share of the window width the panel takes before hitting the cap.
pub const PANEL_WIDTH_RATIO: f32 = 0.9;

/// Height of the player area in logical pixels.
pub const DEFAULT_PLAYER_HEIGHT: f32 = 480.0;

/// Entrance fade duration in milliseconds. Zero disables the transition.
pub const DEFAULT_FADE_IN_MS: u32 = 180;

/// Upper bound for the entrance fade.
pub const MAX_FADE_IN_MS: u32 = 2_000;

const _: () = {
    assert!(DEFAULT_VOLUME >= MIN_VOLUME && DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(DEFAULT_BACKDROP_OPACITY > 0.0 && DEFAULT_BACKDROP_OPACITY <= 1.0);
    assert!(PANEL_WIDTH_RATIO > 0.0 && PANEL_WIDTH_RATIO <= 1.0);
    assert!(DEFAULT_FADE_IN_MS <= MAX_FADE_IN_MS);
};
