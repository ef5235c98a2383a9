// SPDX-License-Identifier: MPL-2.0
//! Iced subscription for video playback events.
//!
//! The subscription owns the decoders and the audio output for one playback
//! session. It hands the UI a [`DecoderCommandSender`] and forwards decoder
//! events as [`PlaybackMessage`]s. When the UI stops returning the
//! subscription, the stream is dropped along with the command receivers and
//! both decoder threads exit on their next command poll.

use super::audio::{AudioDecoder, AudioDecoderCommand, AudioDecoderEvent};
use super::audio_output::AudioOutput;
use super::{AsyncDecoder, DecoderCommand, DecoderEvent, Volume};
use iced::futures::{SinkExt, Stream};
use iced::stream;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Identifies one playback session.
///
/// The session id changes every time the modal gets a new source, so the same
/// URL opened twice still gets a fresh subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaybackRequest {
    pub session_id: u64,
    pub url: String,
}

/// Live settings of the audio output, changed without touching the decoders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioControl {
    SetVolume(Volume),
    SetMuted(bool),
}

/// Handle for sending commands to the running session from the UI.
#[derive(Clone)]
pub struct DecoderCommandSender {
    video_tx: mpsc::UnboundedSender<DecoderCommand>,
    audio_tx: mpsc::UnboundedSender<AudioControl>,
}

impl DecoderCommandSender {
    /// Sends a transport command.
    ///
    /// The subscription applies it to the audio output and forwards it to both
    /// decoders.
    pub fn send(&self, command: DecoderCommand) -> Result<(), String> {
        self.video_tx
            .send(command)
            .map_err(|_| "Video decoder not running".to_string())
    }

    pub fn set_volume(&self, volume: Volume) -> Result<(), String> {
        self.audio_tx
            .send(AudioControl::SetVolume(volume))
            .map_err(|_| "Audio output not running".to_string())
    }

    pub fn set_muted(&self, muted: bool) -> Result<(), String> {
        self.audio_tx
            .send(AudioControl::SetMuted(muted))
            .map_err(|_| "Audio output not running".to_string())
    }

    /// Creates a sender with its receiving ends, for driving a player without
    /// a running subscription.
    #[cfg(test)]
    pub(crate) fn detached() -> (
        Self,
        mpsc::UnboundedReceiver<DecoderCommand>,
        mpsc::UnboundedReceiver<AudioControl>,
    ) {
        let (video_tx, video_rx) = mpsc::unbounded_channel();
        let (audio_tx, audio_rx) = mpsc::unbounded_channel();
        (Self { video_tx, audio_tx }, video_rx, audio_rx)
    }
}

impl std::fmt::Debug for DecoderCommandSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderCommandSender")
            .field("closed", &self.video_tx.is_closed())
            .finish()
    }
}

/// Messages emitted by the video playback subscription.
#[derive(Debug, Clone)]
pub enum PlaybackMessage {
    /// Session started, provides the command sender.
    Started(DecoderCommandSender),

    /// A new frame is ready for display.
    FrameReady {
        rgba_data: Arc<Vec<u8>>,
        width: u32,
        height: u32,
        pts_secs: f64,
    },

    Buffering,

    EndOfStream,

    /// Raw decoder message, classified by the player.
    Error(String),
}

enum State {
    Idle,
    Decoding {
        video_decoder: AsyncDecoder,
        audio_decoder: Option<AudioDecoder>,
        audio_output: Option<AudioOutput>,
        video_cmd_rx: mpsc::UnboundedReceiver<DecoderCommand>,
        audio_cmd_rx: mpsc::UnboundedReceiver<AudioControl>,
    },
}

/// Creates the playback subscription for `request`.
///
/// Messages are tagged with the session id so the UI can drop the ones that
/// arrive after it moved on to another source.
pub fn video_playback(request: PlaybackRequest) -> iced::Subscription<(u64, PlaybackMessage)> {
    iced::Subscription::run_with(request, playback_stream)
}

fn playback_stream(request: &PlaybackRequest) -> impl Stream<Item = (u64, PlaybackMessage)> {
    let PlaybackRequest { session_id, url } = request.clone();

    stream::channel(100, move |mut output| async move {
        let mut state = State::Idle;

        loop {
            match &mut state {
                State::Idle => {
                    tracing::info!(session_id, %url, "starting native playback");

                    let (video_cmd_tx, video_cmd_rx) = mpsc::unbounded_channel();
                    let (audio_cmd_tx, audio_cmd_rx) = mpsc::unbounded_channel();

                    let video_decoder = AsyncDecoder::new(url.clone());
                    let (audio_decoder, audio_output) = open_audio(&url);

                    let sender = DecoderCommandSender {
                        video_tx: video_cmd_tx,
                        audio_tx: audio_cmd_tx,
                    };
                    let _ = output
                        .send((session_id, PlaybackMessage::Started(sender)))
                        .await;

                    state = State::Decoding {
                        video_decoder,
                        audio_decoder,
                        audio_output,
                        video_cmd_rx,
                        audio_cmd_rx,
                    };
                }

                State::Decoding {
                    video_decoder,
                    audio_decoder,
                    audio_output,
                    video_cmd_rx,
                    audio_cmd_rx,
                } => {
                    tokio::select! {
                        Some(command) = video_cmd_rx.recv() => {
                            if let Some(audio_out) = audio_output.as_ref() {
                                match command {
                                    DecoderCommand::Play => audio_out.resume(),
                                    DecoderCommand::Pause => audio_out.pause(),
                                    DecoderCommand::Stop => audio_out.stop(),
                                }
                            }

                            if let Some(audio_dec) = audio_decoder.as_ref() {
                                let audio_cmd = match command {
                                    DecoderCommand::Play => AudioDecoderCommand::Play,
                                    DecoderCommand::Pause => AudioDecoderCommand::Pause,
                                    DecoderCommand::Stop => AudioDecoderCommand::Stop,
                                };
                                let _ = audio_dec.send_command(audio_cmd);
                            }

                            if let Err(e) = video_decoder.send_command(command) {
                                let _ = output
                                    .send((session_id, PlaybackMessage::Error(e.to_string())))
                                    .await;
                            }
                        }

                        Some(control) = audio_cmd_rx.recv() => {
                            if let Some(audio_out) = audio_output.as_ref() {
                                match control {
                                    AudioControl::SetVolume(volume) => audio_out.set_volume(volume),
                                    AudioControl::SetMuted(muted) => audio_out.set_muted(muted),
                                }
                            }
                        }

                        event = video_decoder.recv_event() => {
                            let Some(event) = event else {
                                break;
                            };

                            let message = match event {
                                DecoderEvent::FrameReady(frame) => PlaybackMessage::FrameReady {
                                    rgba_data: frame.rgba_data,
                                    width: frame.width,
                                    height: frame.height,
                                    pts_secs: frame.pts_secs,
                                },
                                DecoderEvent::Buffering => PlaybackMessage::Buffering,
                                DecoderEvent::EndOfStream => PlaybackMessage::EndOfStream,
                                DecoderEvent::Error(msg) => PlaybackMessage::Error(msg),
                            };

                            let _ = output.send((session_id, message)).await;
                        }

                        Some(audio_event) = async {
                            match audio_decoder.as_mut() {
                                Some(audio_dec) => audio_dec.recv_event().await,
                                None => std::future::pending::<Option<AudioDecoderEvent>>().await,
                            }
                        } => {
                            match audio_event {
                                AudioDecoderEvent::BufferReady(audio) => {
                                    if let Some(audio_out) = audio_output.as_ref() {
                                        audio_out.play(&audio.samples);
                                    }
                                }
                                AudioDecoderEvent::EndOfStream => {
                                    tracing::debug!(session_id, "audio track finished");
                                }
                                AudioDecoderEvent::Error(msg) => {
                                    tracing::warn!(session_id, error = %msg, "audio playback error");
                                }
                            }
                        }
                    }
                }
            }
        }

        tracing::debug!(session_id, "video decoder closed");

        // Release the audio side with the video: a failed or stopped session
        // must not keep sound going
        drop(state);

        // Keep the subscription alive but idle until the UI drops it
        std::future::pending::<()>().await;
    })
}

/// Opens the audio side of a session. Missing audio is not an error: the video
/// simply plays silent.
fn open_audio(url: &str) -> (Option<AudioDecoder>, Option<AudioOutput>) {
    let audio_output = match AudioOutput::new(Volume::default(), false) {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!(error = %e, "audio output unavailable, playing without sound");
            return (None, None);
        }
    };

    match AudioDecoder::new(url, audio_output.config()) {
        Ok(Some(decoder)) => (Some(decoder), Some(audio_output)),
        Ok(None) => {
            tracing::debug!(%url, "source has no audio stream");
            (None, None)
        }
        Err(e) => {
            tracing::warn!(%url, error = %e, "audio decoder failed");
            (None, None)
        }
    }
}
