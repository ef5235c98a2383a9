// SPDX-License-Identifier: MPL-2.0
//! Volume domain type for audio playback.

use crate::config::{DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME};

/// Volume level, guaranteed to be within `0.0..=1.0`.
///
/// ```
/// use iced_reel::video_player::Volume;
///
/// assert_eq!(Volume::new(0.5).value(), 0.5);
/// assert_eq!(Volume::new(2.0).value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self::default();
        }
        Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Gain applied to samples. Squared so the level feels linear to the ear.
    #[must_use]
    pub fn perceptual_gain(self) -> f32 {
        self.0 * self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}
