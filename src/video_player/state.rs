// SPDX-License-Identifier: MPL-2.0
//! Playback state machine for the native player.
//!
//! - Loading: session requested, no frame decoded yet
//! - Playing: frames are being delivered
//! - Paused: holding the last frame (or the poster frame without autoplay)
//! - Ended: the decoder reached the end of the stream
//! - Stopped: the user stopped the session, the decoders are gone
//! - Failed: the source could not be played

use super::subscription::{DecoderCommandSender, PlaybackMessage};
use super::{DecoderCommand, Volume};
use crate::config::PlayerConfig;
use crate::error::VideoError;
use iced::widget::image;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    Loading,
    Playing,
    Paused,
    Ended,
    Stopped,
    Failed { error: VideoError },
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// True once the session cannot play any further and a new one is needed.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Ended | Self::Stopped)
    }

    pub fn error(&self) -> Option<&VideoError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// Native player for one source.
///
/// The player holds no decoder itself: the playback subscription runs the
/// decoders and hands over a [`DecoderCommandSender`] once it starts.
#[derive(Debug)]
pub struct NativePlayer {
    source: String,
    state: PlaybackState,
    command_sender: Option<DecoderCommandSender>,
    frame: Option<image::Handle>,
    position_secs: f64,
    autoplay: bool,
    volume: Volume,
    muted: bool,
}

impl NativePlayer {
    #[must_use]
    pub fn new(source: impl Into<String>, config: &PlayerConfig) -> Self {
        Self {
            source: source.into(),
            state: PlaybackState::Loading,
            command_sender: None,
            frame: None,
            position_secs: 0.0,
            autoplay: config.autoplay(),
            volume: Volume::new(config.volume()),
            muted: config.muted(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Last decoded frame, ready for an `image` widget.
    pub fn frame(&self) -> Option<&image::Handle> {
        self.frame.as_ref()
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Returns true once the playback subscription has started.
    pub fn has_command_sender(&self) -> bool {
        self.command_sender.is_some()
    }

    /// Applies a message from the playback subscription.
    pub fn handle(&mut self, message: PlaybackMessage) {
        match message {
            PlaybackMessage::Started(sender) => {
                let _ = sender.set_volume(self.volume);
                let _ = sender.set_muted(self.muted);
                self.command_sender = Some(sender);

                if self.autoplay {
                    self.play();
                }
            }
            PlaybackMessage::FrameReady {
                rgba_data,
                width,
                height,
                pts_secs,
            } => {
                // Handle::from_rgba takes ownership; the Arc is unique unless a
                // clone of the message is still around
                let pixels = std::sync::Arc::try_unwrap(rgba_data)
                    .unwrap_or_else(|shared| shared.as_ref().clone());
                self.frame = Some(image::Handle::from_rgba(width, height, pixels));
                self.position_secs = pts_secs;

                if self.state == PlaybackState::Loading {
                    self.state = PlaybackState::Paused;
                }
            }
            PlaybackMessage::Buffering => {}
            PlaybackMessage::EndOfStream => {
                if !matches!(self.state, PlaybackState::Failed { .. } | PlaybackState::Stopped) {
                    self.state = PlaybackState::Ended;
                }
            }
            PlaybackMessage::Error(message) => {
                let error = VideoError::from_message(&message);
                if self.frame.is_none() {
                    tracing::warn!(source = %self.source, %message, "native playback failed");
                    self.state = PlaybackState::Failed { error };
                    // The controls are hidden now, silence any audio already queued
                    if let Some(sender) = &self.command_sender {
                        let _ = sender.send(DecoderCommand::Pause);
                    }
                } else {
                    // Mid-stream glitches: the decoder skips the packet and carries on
                    tracing::debug!(source = %self.source, %message, "decoder recovered from error");
                }
            }
        }
    }

    /// Starts or resumes playback. No-op once ended, stopped or failed.
    pub fn play(&mut self) {
        match self.state {
            PlaybackState::Loading | PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                if let Some(sender) = &self.command_sender {
                    let _ = sender.send(DecoderCommand::Play);
                }
            }
            PlaybackState::Playing
            | PlaybackState::Ended
            | PlaybackState::Stopped
            | PlaybackState::Failed { .. } => {}
        }
    }

    /// Pauses playback.
    ///
    /// The command is sent whenever a session is running, so the decoder and
    /// the audio output are silenced even if a `Play` is still in flight.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
        if let Some(sender) = &self.command_sender {
            let _ = sender.send(DecoderCommand::Pause);
        }
    }

    /// Ends the session. The decoders exit and the audio output drops its
    /// buffer; playing again needs a new session.
    pub fn stop(&mut self) {
        if let Some(sender) = self.command_sender.take() {
            let _ = sender.send(DecoderCommand::Stop);
        }
        if self.state.error().is_none() {
            self.state = PlaybackState::Stopped;
        }
        self.position_secs = 0.0;
    }

    pub fn toggle_playback(&mut self) {
        if self.state.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.muted);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(sender) = &self.command_sender {
            let _ = sender.set_muted(muted);
        }
    }

    /// Moves the volume by `delta`, clamped to the valid range.
    pub fn step_volume(&mut self, delta: f32) {
        self.set_volume(Volume::new(self.volume.value() + delta));
    }

    pub fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
        if let Some(sender) = &self.command_sender {
            let _ = sender.set_volume(volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video_player::subscription::AudioControl;
    use std::sync::Arc;

    fn config(autoplay: bool) -> PlayerConfig {
        PlayerConfig {
            autoplay: Some(autoplay),
            ..PlayerConfig::default()
        }
    }

    fn frame() -> PlaybackMessage {
        PlaybackMessage::FrameReady {
            rgba_data: Arc::new(vec![0u8; 2 * 2 * 4]),
            width: 2,
            height: 2,
            pts_secs: 1.5,
        }
    }

    #[test]
    fn new_player_is_loading() {
        let player = NativePlayer::new("clip.mp4", &config(true));
        assert_eq!(player.state(), &PlaybackState::Loading);
        assert_eq!(player.source(), "clip.mp4");
        assert!(player.frame().is_none());
        assert!(!player.has_command_sender());
    }

    #[test]
    fn started_session_autoplays_and_applies_audio_settings() {
        let mut player = NativePlayer::new("clip.mp4", &config(true));
        let (sender, mut video_rx, mut audio_rx) = DecoderCommandSender::detached();

        player.handle(PlaybackMessage::Started(sender));

        assert!(player.state().is_playing());
        assert_eq!(video_rx.try_recv().unwrap(), DecoderCommand::Play);
        assert!(matches!(
            audio_rx.try_recv().unwrap(),
            AudioControl::SetVolume(_)
        ));
        assert_eq!(audio_rx.try_recv().unwrap(), AudioControl::SetMuted(false));
    }

    #[test]
    fn without_autoplay_poster_frame_leaves_player_paused() {
        let mut player = NativePlayer::new("clip.mp4", &config(false));
        let (sender, mut video_rx, _audio_rx) = DecoderCommandSender::detached();

        player.handle(PlaybackMessage::Started(sender));
        assert!(video_rx.try_recv().is_err());

        player.handle(frame());
        assert_eq!(player.state(), &PlaybackState::Paused);
        assert!(player.frame().is_some());
        assert!((player.position_secs() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn pause_sends_pause_to_running_session() {
        let mut player = NativePlayer::new("clip.mp4", &config(true));
        let (sender, mut video_rx, _audio_rx) = DecoderCommandSender::detached();
        player.handle(PlaybackMessage::Started(sender));
        let _ = video_rx.try_recv();

        player.pause();

        assert_eq!(player.state(), &PlaybackState::Paused);
        assert_eq!(video_rx.try_recv().unwrap(), DecoderCommand::Pause);
    }

    #[test]
    fn pause_before_session_start_is_harmless() {
        let mut player = NativePlayer::new("clip.mp4", &config(true));
        player.pause();
        assert_eq!(player.state(), &PlaybackState::Loading);
    }

    #[test]
    fn toggle_playback_alternates() {
        let mut player = NativePlayer::new("clip.mp4", &config(true));
        let (sender, mut video_rx, _audio_rx) = DecoderCommandSender::detached();
        player.handle(PlaybackMessage::Started(sender));

        player.toggle_playback();
        player.toggle_playback();

        assert!(player.state().is_playing());
        assert_eq!(video_rx.try_recv().unwrap(), DecoderCommand::Play);
        assert_eq!(video_rx.try_recv().unwrap(), DecoderCommand::Pause);
        assert_eq!(video_rx.try_recv().unwrap(), DecoderCommand::Play);
    }

    #[test]
    fn toggle_mute_reaches_audio_output() {
        let mut player = NativePlayer::new("clip.mp4", &config(true));
        let (sender, _video_rx, mut audio_rx) = DecoderCommandSender::detached();
        player.handle(PlaybackMessage::Started(sender));
        while audio_rx.try_recv().is_ok() {}

        player.toggle_mute();

        assert!(player.is_muted());
        assert_eq!(audio_rx.try_recv().unwrap(), AudioControl::SetMuted(true));
    }

    #[test]
    fn error_before_first_frame_fails_playback() {
        let mut player = NativePlayer::new("missing.mp4", &config(true));
        player.handle(PlaybackMessage::Error(
            "Failed to open video: No such file or directory".into(),
        ));

        let error = player.state().error().unwrap();
        assert_eq!(error.i18n_key(), "player-error-io");
    }

    #[test]
    fn failure_pauses_the_running_session() {
        let mut player = NativePlayer::new("song.mp3", &config(true));
        let (sender, mut video_rx, _audio_rx) = DecoderCommandSender::detached();
        player.handle(PlaybackMessage::Started(sender));
        assert_eq!(video_rx.try_recv().unwrap(), DecoderCommand::Play);

        player.handle(PlaybackMessage::Error("No video stream found".into()));

        assert_eq!(
            player.state().error(),
            Some(&VideoError::NoVideoStream)
        );
        assert_eq!(video_rx.try_recv().unwrap(), DecoderCommand::Pause);
    }

    #[test]
    fn stop_ends_session_and_blocks_play() {
        let mut player = NativePlayer::new("clip.mp4", &config(true));
        let (sender, mut video_rx, _audio_rx) = DecoderCommandSender::detached();
        player.handle(PlaybackMessage::Started(sender));
        player.handle(frame());
        let _ = video_rx.try_recv();

        player.stop();

        assert_eq!(player.state(), &PlaybackState::Stopped);
        assert!(player.state().is_finished());
        assert!(!player.has_command_sender());
        assert_eq!(player.position_secs(), 0.0);
        assert_eq!(video_rx.try_recv().unwrap(), DecoderCommand::Stop);

        player.play();
        player.handle(PlaybackMessage::EndOfStream);
        assert_eq!(player.state(), &PlaybackState::Stopped);
    }

    #[test]
    fn step_volume_clamps_and_reaches_audio_output() {
        let mut player = NativePlayer::new(
            "clip.mp4",
            &PlayerConfig {
                volume: Some(0.95),
                ..config(true)
            },
        );
        let (sender, _video_rx, mut audio_rx) = DecoderCommandSender::detached();
        player.handle(PlaybackMessage::Started(sender));
        while audio_rx.try_recv().is_ok() {}

        player.step_volume(0.1);
        assert_eq!(player.volume(), Volume::new(1.0));
        assert_eq!(
            audio_rx.try_recv().unwrap(),
            AudioControl::SetVolume(Volume::new(1.0))
        );

        player.step_volume(-2.0);
        assert_eq!(player.volume().value(), 0.0);
    }

    #[test]
    fn error_after_frames_keeps_playing() {
        let mut player = NativePlayer::new("clip.mp4", &config(true));
        let (sender, _video_rx, _audio_rx) = DecoderCommandSender::detached();
        player.handle(PlaybackMessage::Started(sender));
        player.handle(frame());

        player.handle(PlaybackMessage::Error("Packet send failed: EAGAIN".into()));

        assert!(player.state().is_playing());
    }

    #[test]
    fn end_of_stream_ends_and_blocks_play() {
        let mut player = NativePlayer::new("clip.mp4", &config(true));
        let (sender, mut video_rx, _audio_rx) = DecoderCommandSender::detached();
        player.handle(PlaybackMessage::Started(sender));
        let _ = video_rx.try_recv();

        player.handle(PlaybackMessage::EndOfStream);
        player.play();

        assert_eq!(player.state(), &PlaybackState::Ended);
        assert!(video_rx.try_recv().is_err());
    }

    #[test]
    fn volume_from_config_is_clamped() {
        let player = NativePlayer::new(
            "clip.mp4",
            &PlayerConfig {
                volume: Some(3.0),
                ..PlayerConfig::default()
            },
        );
        assert_eq!(player.volume().value(), 1.0);
    }
}
