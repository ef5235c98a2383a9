// SPDX-License-Identifier: MPL-2.0
//! Audio extraction from a video source using FFmpeg.
//!
//! Decoded frames are resampled to the output device format and paced against
//! the wall clock, a little ahead of time so the device buffer never runs dry.

use crate::error::{Error, Result};
use crate::video_player::audio_output::AudioOutputConfig;
use crate::video_player::ffmpeg;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How far ahead of its presentation time a buffer is queued.
const AUDIO_LOOKAHEAD_SECS: f64 = 0.2;

const IDLE_POLL: Duration = Duration::from_millis(10);

/// A decoded audio buffer ready for playback.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Interleaved samples (f32, normalized to [-1.0, 1.0]).
    pub samples: Arc<Vec<f32>>,
    pub channels: u16,
    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

impl DecodedAudio {
    /// Number of frames (samples per channel).
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }
}

#[derive(Debug, Clone)]
pub enum AudioDecoderEvent {
    BufferReady(DecodedAudio),
    EndOfStream,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioDecoderCommand {
    Play,
    Pause,
    Stop,
}

/// Async audio decoder running on a blocking thread.
pub struct AudioDecoder {
    command_tx: mpsc::UnboundedSender<AudioDecoderCommand>,
    event_rx: mpsc::Receiver<AudioDecoderEvent>,
}

impl AudioDecoder {
    /// Spawns an audio decoder for `source`.
    ///
    /// Returns `Ok(None)` when the source has no audio stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be opened.
    pub fn new(source: &str, output_config: AudioOutputConfig) -> Result<Option<Self>> {
        if !has_audio_stream(source)? {
            return Ok(None);
        }

        let source = source.to_string();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(4);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = Self::decoder_loop(&source, command_rx, &event_tx, output_config) {
                tracing::warn!(%source, error = %e, "audio decoder stopped");
                let _ = event_tx.blocking_send(AudioDecoderEvent::Error(e.to_string()));
            }
        });

        Ok(Some(Self {
            command_tx,
            event_rx,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if the decoder task is no longer running.
    pub fn send_command(&self, command: AudioDecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Io("Audio decoder task is not running".into()))
    }

    pub async fn recv_event(&mut self) -> Option<AudioDecoderEvent> {
        self.event_rx.recv().await
    }

    #[allow(clippy::too_many_lines)]
    fn decoder_loop(
        source: &str,
        mut command_rx: mpsc::UnboundedReceiver<AudioDecoderCommand>,
        event_tx: &mpsc::Sender<AudioDecoderEvent>,
        output_config: AudioOutputConfig,
    ) -> Result<()> {
        let mut ictx = ffmpeg::open_input(source)?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Audio)
            .ok_or_else(|| Error::Io("No audio stream found".to_string()))?;
        let audio_stream_index = input.index();

        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Io(format!("Failed to create codec context: {e}")))?;
        let mut decoder = context_decoder
            .decoder()
            .audio()
            .map_err(|e| Error::Io(format!("Failed to create audio decoder: {e}")))?;

        // Downmix anything beyond mono to stereo
        let output_channel_layout = match output_config.channels {
            1 => ffmpeg_next::ChannelLayout::MONO,
            _ => ffmpeg_next::ChannelLayout::STEREO,
        };
        let output_channels: u16 = if output_config.channels == 1 { 1 } else { 2 };

        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
            output_channel_layout,
            output_config.sample_rate,
        )
        .map_err(|e| Error::Io(format!("Failed to create resampler: {e}")))?;

        let mut is_playing = false;
        let mut playback_start_time: Option<Instant> = None;
        let mut first_pts: Option<f64> = None;

        loop {
            match command_rx.try_recv() {
                Ok(AudioDecoderCommand::Play) => {
                    is_playing = true;
                    playback_start_time = Some(Instant::now());
                    first_pts = None;
                }
                Ok(AudioDecoderCommand::Pause) => {
                    is_playing = false;
                    playback_start_time = None;
                    first_pts = None;
                }
                Ok(AudioDecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    break;
                }
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !is_playing {
                std::thread::sleep(IDLE_POLL);
                continue;
            }

            let mut frame_decoded = false;
            for (stream, packet) in ictx.packets() {
                if stream.index() != audio_stream_index {
                    continue;
                }

                if let Err(e) = decoder.send_packet(&packet) {
                    let _ = event_tx.blocking_send(AudioDecoderEvent::Error(format!(
                        "Audio packet failed: {e}"
                    )));
                    continue;
                }

                let mut decoded_frame = ffmpeg_next::frame::Audio::empty();
                if decoder.receive_frame(&mut decoded_frame).is_err() {
                    continue;
                }

                let mut output_audio = ffmpeg_next::frame::Audio::empty();
                if let Err(e) = resampler.run(&decoded_frame, &mut output_audio) {
                    let _ = event_tx.blocking_send(AudioDecoderEvent::Error(format!(
                        "Resampling failed: {e}"
                    )));
                    continue;
                }

                let samples = extract_samples(&output_audio, output_channels);

                #[allow(clippy::cast_precision_loss)]
                let pts_secs = decoded_frame
                    .timestamp()
                    .map_or(0.0, |pts| pts as f64 * time_base_f64);

                if let Some(start_time) = playback_start_time {
                    let first = *first_pts.get_or_insert(pts_secs);
                    let frame_delay = pts_secs - first - AUDIO_LOOKAHEAD_SECS;
                    if frame_delay > 0.0 {
                        let target_time = start_time + Duration::from_secs_f64(frame_delay);
                        let now = Instant::now();
                        if target_time > now {
                            std::thread::sleep(target_time - now);
                        }
                    }
                }

                let audio = DecodedAudio {
                    samples: Arc::new(samples),
                    channels: output_channels,
                    pts_secs,
                };

                if event_tx
                    .blocking_send(AudioDecoderEvent::BufferReady(audio))
                    .is_err()
                {
                    return Ok(());
                }

                frame_decoded = true;
                break;
            }

            if !frame_decoded {
                let _ = event_tx.blocking_send(AudioDecoderEvent::EndOfStream);
                is_playing = false;
            }
        }

        Ok(())
    }
}

fn has_audio_stream(source: &str) -> Result<bool> {
    let ictx = ffmpeg::open_input(source)?;
    Ok(ictx
        .streams()
        .best(ffmpeg_next::media::Type::Audio)
        .is_some())
}

/// Reads packed little-endian f32 samples out of a resampled frame.
fn extract_samples(frame: &ffmpeg_next::frame::Audio, channels: u16) -> Vec<f32> {
    let data = frame.data(0);
    let sample_count = frame.samples() * usize::from(channels);

    data.chunks_exact(4)
        .take(sample_count)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}
