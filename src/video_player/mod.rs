// SPDX-License-Identifier: MPL-2.0
//! Native video playback engine.
//!
//! FFmpeg decodes video frames and audio on blocking Tokio tasks, cpal plays the
//! audio, and an Iced subscription connects both to the UI. The engine accepts
//! local paths and any URL FFmpeg can open.

pub mod audio;
pub mod audio_output;
mod decoder;
mod ffmpeg;
mod state;
pub mod subscription;
mod volume;

pub use decoder::{AsyncDecoder, DecodedFrame, DecoderCommand, DecoderEvent};
pub use ffmpeg::init_ffmpeg;
pub use state::{NativePlayer, PlaybackState};
pub use subscription::{
    video_playback, AudioControl, DecoderCommandSender, PlaybackMessage, PlaybackRequest,
};
pub use volume::Volume;
