// SPDX-License-Identifier: MPL-2.0
//! `iced_reel` plays videos in a modal overlay built with the Iced GUI framework.
//!
//! YouTube links are handed to the embedded player surface, any other source
//! is decoded natively with FFmpeg. The modal closes on Escape, on a backdrop
//! click or from its close button.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod ui;
pub mod video_player;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "iced_reel=info";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `iced_reel=info`. Calling
/// this more than once keeps the first subscriber.
pub fn init_logging() {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
