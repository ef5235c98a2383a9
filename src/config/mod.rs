// SPDX-License-Identifier: MPL-2.0
//! Loading and saving user preferences from a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[player]` - Native playback settings (autoplay, volume, mute)
//! - `[modal]` - Overlay geometry and entrance fade
//! - `[[library]]` - Videos listed by the launcher
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI argument or `ICED_REEL_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_reel::config;
//!
//! let (config, _warning) = config::load();
//! assert!(config.modal.backdrop_opacity() > 0.0);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Native playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Start native playback as soon as the decoder is ready.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    /// Playback volume (0.0 to 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,

    /// Whether audio starts muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay: Some(DEFAULT_AUTOPLAY),
            volume: Some(DEFAULT_VOLUME),
            muted: Some(false),
        }
    }
}

impl PlayerConfig {
    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.autoplay.unwrap_or(DEFAULT_AUTOPLAY)
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume.unwrap_or(DEFAULT_VOLUME)
    }

    #[must_use]
    pub fn muted(&self) -> bool {
        self.muted.unwrap_or(false)
    }
}

/// Overlay appearance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_opacity: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_height: Option<f32>,

    /// Entrance fade in milliseconds, 0 disables it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_in_ms: Option<u32>,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            backdrop_opacity: Some(DEFAULT_BACKDROP_OPACITY),
            max_width: Some(DEFAULT_MAX_PANEL_WIDTH),
            player_height: Some(DEFAULT_PLAYER_HEIGHT),
            fade_in_ms: Some(DEFAULT_FADE_IN_MS),
        }
    }
}

impl ModalConfig {
    /// Backdrop opacity clamped to a visible range.
    #[must_use]
    pub fn backdrop_opacity(&self) -> f32 {
        self.backdrop_opacity
            .unwrap_or(DEFAULT_BACKDROP_OPACITY)
            .clamp(0.05, 1.0)
    }

    #[must_use]
    pub fn max_width(&self) -> f32 {
        self.max_width
            .filter(|w| *w > 0.0)
            .unwrap_or(DEFAULT_MAX_PANEL_WIDTH)
    }

    #[must_use]
    pub fn player_height(&self) -> f32 {
        self.player_height
            .filter(|h| *h > 0.0)
            .unwrap_or(DEFAULT_PLAYER_HEIGHT)
    }

    #[must_use]
    pub fn fade_in_ms(&self) -> u32 {
        self.fade_in_ms
            .unwrap_or(DEFAULT_FADE_IN_MS)
            .min(MAX_FADE_IN_MS)
    }
}

/// A video listed on the launcher screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryEntry {
    pub title: String,
    pub url: String,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub modal: ModalConfig,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub library: Vec<LibraryEntry>,
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded settings");
                    return (config, None);
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "falling back to default settings");
                    return (
                        Config::default(),
                        Some("launcher-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
