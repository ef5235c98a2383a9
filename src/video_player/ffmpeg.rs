// SPDX-License-Identifier: MPL-2.0
//! FFmpeg initialization and input opening shared by the video and audio decoders.

use crate::error::{Error, Result};
use std::sync::Once;

static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg (library and network protocols) once per process.
///
/// The log level is set to ERROR so remote sources don't flood stderr with
/// demuxer warnings.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Io(format!("FFmpeg initialization failed: {e}")));
            return;
        }
        ffmpeg_next::format::network::init();

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Opens a media source. `source` is handed to FFmpeg as-is, so it can be a
/// local path or any URL FFmpeg has a protocol for (`https://`, `file:`...).
pub fn open_input(source: &str) -> Result<ffmpeg_next::format::context::Input> {
    init_ffmpeg()?;
    ffmpeg_next::format::input(source)
        .map_err(|e| Error::Io(format!("Failed to open video: {e}")))
}
