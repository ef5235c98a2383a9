// SPDX-License-Identifier: MPL-2.0
//! Video modal: a dimmed backdrop with a centred panel that plays a video.
//!
//! The container owns the source. It passes it in with [`State::set_source`]
//! and clears it when [`update`](State::update) returns [`Event::Close`]. The
//! modal renders nothing while the source is absent, and its subscriptions
//! (Escape listener, playback session, entrance tick) only exist while a
//! source is present.
//!
//! YouTube links go to the embedded player surface, anything else to the
//! native FFmpeg player.

mod embed;
mod native;
mod reveal;
pub mod source;
mod view;

pub use source::{classify, embed_url, SourceKind, VideoSource};

use crate::config::{ModalConfig, PlayerConfig, PANEL_WIDTH_RATIO};
use crate::i18n::fluent::I18n;
use crate::video_player::{self, NativePlayer, PlaybackMessage, PlaybackRequest};
use iced::{event, keyboard, time, Element, Subscription};
use reveal::Reveal;
use std::time::{Duration, Instant};

/// Frame interval of the entrance transition.
const REVEAL_TICK: Duration = Duration::from_millis(16);

/// Volume change per press of the volume buttons.
const VOLUME_STEP: f32 = 0.1;

/// Contextual data needed to render the modal.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub window_width: f32,
}

#[derive(Debug, Clone)]
pub enum Message {
    EscapePressed,
    BackdropPressed,
    /// Press inside the content panel. Swallowed so it never reaches the backdrop.
    PanelPressed,
    CloseButtonPressed,
    OpenInBrowser,
    TogglePlayback,
    Stop,
    ToggleMute,
    VolumeUp,
    VolumeDown,
    Playback {
        session: u64,
        message: PlaybackMessage,
    },
    Tick(Instant),
}

/// Events propagated to the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    Close,
}

#[derive(Debug)]
pub struct State {
    source: Option<VideoSource>,
    player: Option<NativePlayer>,
    session_id: u64,
    reveal: Reveal,
    embed_open_failed: bool,
    player_config: PlayerConfig,
    modal_config: ModalConfig,
}

impl Default for State {
    fn default() -> Self {
        Self::new(PlayerConfig::default(), ModalConfig::default())
    }
}

impl State {
    #[must_use]
    pub fn new(player_config: PlayerConfig, modal_config: ModalConfig) -> Self {
        Self {
            source: None,
            player: None,
            session_id: 0,
            reveal: Reveal::finished(),
            embed_open_failed: false,
            player_config,
            modal_config,
        }
    }

    /// Mirrors the container's source.
    ///
    /// Clearing the source pauses native playback before the player is
    /// dropped. A different source pauses the previous player and starts a
    /// new playback session; the same source again is a no-op.
    pub fn set_source(&mut self, url: Option<String>) {
        if self.source.as_ref().map(VideoSource::url) == url.as_deref() {
            return;
        }

        self.release_player();

        match url {
            Some(url) => {
                let source = VideoSource::new(url);
                tracing::info!(url = %source.url(), kind = ?source.kind(), "video modal opened");

                if self.source.is_none() {
                    self.reveal = Reveal::start(Instant::now(), self.modal_config.fade_in_ms());
                }
                if source.kind() == SourceKind::Native {
                    self.start_session(source.url());
                }
                self.embed_open_failed = false;
                self.source = Some(source);
            }
            None => {
                tracing::info!("video modal closed");
                self.source = None;
            }
        }
    }

    pub fn is_shown(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&VideoSource> {
        self.source.as_ref()
    }

    pub fn player(&self) -> Option<&NativePlayer> {
        self.player.as_ref()
    }

    /// Id of the current playback session, bumped for every native source.
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            // Hidden modal has no listener, but a key event can still be queued
            Message::EscapePressed | Message::BackdropPressed | Message::CloseButtonPressed => {
                if self.is_shown() {
                    tracing::debug!(?message, "close requested");
                    Event::Close
                } else {
                    Event::None
                }
            }
            Message::PanelPressed => Event::None,
            Message::OpenInBrowser => {
                self.open_embed_in_browser();
                Event::None
            }
            Message::TogglePlayback => {
                let finished = self
                    .player
                    .as_ref()
                    .is_some_and(|player| player.state().is_finished());

                if finished {
                    // The decoder cannot rewind, replay on a fresh session
                    if let Some(url) = self.player.as_ref().map(|p| p.source().to_string()) {
                        self.start_session(&url);
                    }
                } else if let Some(player) = self.player.as_mut() {
                    player.toggle_playback();
                }
                Event::None
            }
            Message::Stop => {
                if let Some(player) = self.player.as_mut() {
                    player.stop();
                }
                Event::None
            }
            Message::ToggleMute => {
                if let Some(player) = self.player.as_mut() {
                    player.toggle_mute();
                }
                Event::None
            }
            Message::VolumeUp | Message::VolumeDown => {
                let delta = if matches!(message, Message::VolumeUp) {
                    VOLUME_STEP
                } else {
                    -VOLUME_STEP
                };
                if let Some(player) = self.player.as_mut() {
                    player.step_volume(delta);
                }
                Event::None
            }
            Message::Playback { session, message } => {
                if session != self.session_id {
                    return Event::None;
                }
                if let Some(player) = self.player.as_mut() {
                    player.handle(message);
                }
                Event::None
            }
            Message::Tick(now) => {
                self.reveal.tick(now);
                Event::None
            }
        }
    }

    /// Renders the overlay, or nothing while no source is set.
    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Option<Element<'a, Message>> {
        let source = self.source.as_ref()?;
        Some(view::overlay(self, source, &ctx))
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.source.is_none() {
            return Subscription::none();
        }

        let escape = event::listen_with(|event, _status, _window| match event {
            iced::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::Escape),
                ..
            }) => Some(Message::EscapePressed),
            _ => None,
        });

        let playback = match &self.player {
            Some(player) => video_player::video_playback(PlaybackRequest {
                session_id: self.session_id,
                url: player.source().to_string(),
            })
            .map(|(session, message)| Message::Playback { session, message }),
            None => Subscription::none(),
        };

        let reveal = if self.reveal.is_running() {
            time::every(REVEAL_TICK).map(Message::Tick)
        } else {
            Subscription::none()
        };

        Subscription::batch([escape, playback, reveal])
    }

    /// Panel width for a window of `window_width`, before the entrance scale.
    #[must_use]
    pub fn panel_width(&self, window_width: f32) -> f32 {
        panel_width(window_width, self.modal_config.max_width())
    }

    fn start_session(&mut self, url: &str) {
        self.release_player();
        self.session_id = self.session_id.wrapping_add(1);
        self.player = Some(NativePlayer::new(url, &self.player_config));
        tracing::debug!(session_id = self.session_id, %url, "native playback session created");
    }

    fn release_player(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.pause();
        }
    }

    fn open_embed_in_browser(&mut self) {
        let Some(url) = self.source.as_ref().and_then(VideoSource::embed_url) else {
            return;
        };
        match webbrowser::open(&url) {
            Ok(()) => {
                tracing::info!(%url, "embedded player opened in browser");
                self.embed_open_failed = false;
            }
            Err(err) => {
                tracing::warn!(%url, %err, "could not open embedded player");
                self.embed_open_failed = true;
            }
        }
    }
}

/// 90% of the window, capped at `max_width`.
#[must_use]
pub fn panel_width(window_width: f32, max_width: f32) -> f32 {
    (window_width * PANEL_WIDTH_RATIO).min(max_width).max(0.0)
}
