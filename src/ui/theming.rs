// SPDX-License-Identifier: MPL-2.0
//! Light/Dark/System theme mode.

use iced::Theme;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => {
                // Default to dark on detection error
                !matches!(dark_light::detect(), Ok(dark_light::Mode::Light))
            }
        }
    }

    /// Iced theme for this mode.
    #[must_use]
    pub fn to_iced(self) -> Theme {
        if self.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_mode_is_dark_returns_correct_values() {
        assert!(!ThemeMode::Light.is_dark());
        assert!(ThemeMode::Dark.is_dark());
        // System mode depends on the desktop, just verify it doesn't panic
        let _ = ThemeMode::System.is_dark();
    }

    #[test]
    fn explicit_modes_map_to_iced_themes() {
        assert_eq!(ThemeMode::Light.to_iced(), Theme::Light);
        assert_eq!(ThemeMode::Dark.to_iced(), Theme::Dark);
    }

    #[test]
    fn theme_mode_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: ThemeMode,
        }
        let parsed: Wrapper = toml::from_str("mode = \"dark\"").unwrap();
        assert_eq!(parsed.mode, ThemeMode::Dark);
    }
}
