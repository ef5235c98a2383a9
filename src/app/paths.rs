// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for the configuration directory.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI argument** (`--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variable** (`ICED_REEL_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "IcedReel";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_REEL_CONFIG_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--config-dir` CLI argument.
///
/// Only the first call takes effect; later calls are ignored.
pub fn init_cli_overrides(config_dir: Option<String>) {
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err() {
        tracing::debug!("config dir override already initialized");
    }
}

fn get_cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

/// Returns the application config directory path.
///
/// - Linux: `~/.config/IcedReel/`
/// - macOS: `~/Library/Application Support/IcedReel/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\IcedReel\`
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = get_cli_config_dir() {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_path_takes_precedence() {
        let custom = PathBuf::from("/tmp/iced_reel_test_config");
        let result = get_app_config_dir_with_override(Some(custom.clone()));
        assert_eq!(result, Some(custom));
    }

    #[test]
    fn default_config_dir_contains_app_name() {
        if std::env::var(ENV_CONFIG_DIR).is_ok() || get_cli_config_dir().is_some() {
            return;
        }
        if let Some(path) = get_app_config_dir() {
            assert!(path.ends_with(APP_NAME));
        }
    }
}
