// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::video_modal;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    UrlInputChanged(String),
    /// Play the URL typed in the launcher.
    PlayPressed,
    /// Play a library entry.
    LibraryEntrySelected(String),
    Modal(video_modal::Message),
    /// The window was opened or resized to this logical width.
    WindowResized(f32),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional video URL to open on startup.
    pub url: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_REEL_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
