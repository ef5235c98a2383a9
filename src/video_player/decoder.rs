// SPDX-License-Identifier: MPL-2.0
//! Async video frame decoder using FFmpeg.
//!
//! Decoding runs on a blocking Tokio thread and frames are delivered through
//! a bounded channel, so a slow UI applies backpressure to the decoder.

use crate::error::{Error, Result};
use crate::video_player::ffmpeg;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Sleep between command polls while paused.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// Represents a decoded video frame ready for display.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

/// Commands sent to the decoder task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderCommand {
    /// Start or resume decoding.
    Play,

    /// Stop sending frames, keep the position.
    Pause,

    /// Stop decoding and release the input.
    Stop,
}

/// Events sent from the decoder to the UI.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// A new frame is ready for display.
    FrameReady(DecodedFrame),

    /// Decoder is waiting on the source.
    Buffering,

    /// Playback reached the end of the video.
    EndOfStream,

    /// Opening or decoding failed. Raw FFmpeg message.
    Error(String),
}

/// Async video decoder that runs in a Tokio blocking task.
pub struct AsyncDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl AsyncDecoder {
    /// Spawns a decoder for `source` (local path or URL).
    ///
    /// Opening happens on the decoder thread; failures arrive as
    /// [`DecoderEvent::Error`] rather than from this constructor, so remote
    /// sources never block the caller.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();

        // Commands: unbounded (UI needs to send without blocking)
        // Events: two frames of backpressure
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(2);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = Self::decoder_loop_blocking(&source, command_rx, &event_tx) {
                tracing::warn!(%source, error = %e, "video decoder stopped");
                let _ = event_tx.blocking_send(DecoderEvent::Error(e.to_string()));
            }
        });

        Self {
            command_tx,
            event_rx,
        }
    }

    /// Sends a command to the decoder task.
    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Io("Decoder task is not running".into()))
    }

    /// Receives the next event, `None` once the decoder task has exited.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    /// Main decoder loop. FFmpeg types are not `Send`, so everything lives
    /// on this one blocking thread.
    #[allow(clippy::too_many_lines)]
    fn decoder_loop_blocking(
        source: &str,
        mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
        event_tx: &mpsc::Sender<DecoderEvent>,
    ) -> Result<()> {
        let _ = event_tx.blocking_send(DecoderEvent::Buffering);

        let mut ictx = ffmpeg::open_input(source)?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| Error::Io("No video stream found".to_string()))?;
        let video_stream_index = input.index();

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Io(format!("Failed to create codec context: {e}")))?;
        let mut decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| Error::Io(format!("Failed to create video decoder: {e}")))?;

        let width = decoder.width();
        let height = decoder.height();

        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| Error::Io(format!("Failed to create scaler: {e}")))?;

        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let mut is_playing = false;
        let mut playback_start_time: Option<Instant> = None;
        let mut first_pts: Option<f64> = None;
        // Show a poster frame even when autoplay is off
        let mut decode_single_frame = true;

        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Play) => {
                    is_playing = true;
                    playback_start_time = Some(Instant::now());
                    first_pts = None;
                }
                Ok(DecoderCommand::Pause) => {
                    is_playing = false;
                    playback_start_time = None;
                    first_pts = None;
                }
                Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    break;
                }
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !is_playing && !decode_single_frame {
                std::thread::sleep(IDLE_POLL);
                continue;
            }

            let mut frame_decoded = false;
            for (stream, packet) in ictx.packets() {
                if stream.index() != video_stream_index {
                    continue;
                }

                if let Err(e) = decoder.send_packet(&packet) {
                    let _ = event_tx
                        .blocking_send(DecoderEvent::Error(format!("Packet send failed: {e}")));
                    continue;
                }

                let mut decoded_frame = ffmpeg_next::frame::Video::empty();
                if decoder.receive_frame(&mut decoded_frame).is_err() {
                    continue;
                }

                let mut rgba_frame = ffmpeg_next::frame::Video::empty();
                if let Err(e) = scaler.run(&decoded_frame, &mut rgba_frame) {
                    let _ = event_tx
                        .blocking_send(DecoderEvent::Error(format!("Scaling failed: {e}")));
                    continue;
                }

                #[allow(clippy::cast_precision_loss)]
                let pts_secs = decoded_frame
                    .timestamp()
                    .map_or(0.0, |pts| pts as f64 * time_base_f64);

                // Frame pacing relative to the moment playback (re)started
                if let Some(start_time) = playback_start_time {
                    let first = *first_pts.get_or_insert(pts_secs);
                    let frame_delay = (pts_secs - first).max(0.0);
                    let target_time = start_time + Duration::from_secs_f64(frame_delay);
                    let now = Instant::now();
                    if target_time > now {
                        std::thread::sleep(target_time - now);
                    }
                }

                let frame = DecodedFrame {
                    rgba_data: Arc::new(extract_rgba_data(&rgba_frame)),
                    width,
                    height,
                    pts_secs,
                };

                if event_tx.blocking_send(DecoderEvent::FrameReady(frame)).is_err() {
                    return Ok(());
                }

                frame_decoded = true;
                decode_single_frame = false;
                break;
            }

            if !frame_decoded {
                let _ = event_tx.blocking_send(DecoderEvent::EndOfStream);
                is_playing = false;
                playback_start_time = None;
                first_pts = None;
                decode_single_frame = false;
            }
        }

        Ok(())
    }
}

/// Copies RGBA rows out of a frame, dropping the stride padding.
fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let data = frame.data(0);
    let stride = frame.stride(0);

    let mut rgba_bytes = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let row_start = y * stride;
        rgba_bytes.extend_from_slice(&data[row_start..row_start + width * 4]);
    }
    rgba_bytes
}
