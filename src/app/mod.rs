// SPDX-License-Identifier: MPL-2.0
//! Application root: a launcher that picks a video and hosts the video modal.
//!
//! The `App` struct owns the URL being played and keeps the modal in sync with
//! it. The modal reports close requests back through its `Event`, and the
//! launcher clears the URL in response.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::ui::video_modal;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    modal: video_modal::State,
    url_input: String,
    /// URL shown in the modal, `None` while it is closed.
    video_url: Option<String>,
    window_width: f32,
    /// Localization key of a startup warning.
    warning: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("video_url", &self.video_url)
            .field("window_width", &self.window_width)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 400;
pub const MIN_WINDOW_WIDTH: u32 = 480;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot closure, the flags are consumed on first call
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(Config::default(), None)
    }
}

impl App {
    /// Loads the configuration and opens the startup URL, if any.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) =
            config::load_with_override(flags.config_dir.map(PathBuf::from));
        let mut app = Self::with_config(config, flags.lang);
        app.warning = config_warning;

        if let Some(url) = flags.url {
            app.url_input.clone_from(&url);
            update::open_video(&mut app.update_context(), url);
        }

        (app, Task::none())
    }

    fn with_config(config: Config, lang: Option<String>) -> Self {
        let i18n = I18n::new(lang, &config);
        let modal = video_modal::State::new(config.player.clone(), config.modal.clone());
        tracing::debug!(
            locale = %i18n.current_locale(),
            library_entries = config.library.len(),
            "application state initialized"
        );

        Self {
            i18n,
            config,
            modal,
            url_input: String::new(),
            video_url: None,
            window_width: WINDOW_DEFAULT_WIDTH as f32,
            warning: None,
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.config.general.theme_mode.to_iced()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_window_subscription(),
            self.modal.subscription().map(Message::Modal),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(&mut self.update_context(), message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            url_input: &self.url_input,
            library: &self.config.library,
            warning: self.warning.as_deref(),
            modal: &self.modal,
            window_width: self.window_width,
        })
    }

    fn update_context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            url_input: &mut self.url_input,
            video_url: &mut self.video_url,
            modal: &mut self.modal,
            window_width: &mut self.window_width,
        }
    }
}
