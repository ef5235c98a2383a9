// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Video(VideoError),
}

/// Playback failures reported by the native player.
/// Each variant maps to a localized fallback message shown in the player area.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoError {
    /// Video codec is not supported by the system's FFmpeg
    UnsupportedCodec(String),

    /// Source contains no video stream (or is not media at all)
    NoVideoStream,

    /// Source could not be reached or read
    IoError(String),

    /// Decoding failed during playback
    DecodingFailed(String),

    /// Generic error with raw message
    Other(String),
}

impl VideoError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            VideoError::UnsupportedCodec(_) => "player-error-unsupported-codec",
            VideoError::NoVideoStream => "player-error-no-video-stream",
            VideoError::IoError(_) => "player-error-io",
            VideoError::DecodingFailed(_) => "player-error-decoding-failed",
            VideoError::Other(_) => "player-error-general",
        }
    }

    /// Sorts a raw FFmpeg/decoder message into a `VideoError`.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        // Codec errors first, they often also say "not found"
        if msg_lower.contains("codec") || msg_lower.contains("decoder") {
            if let Some(codec) = Self::extract_codec_name(&msg_lower) {
                return VideoError::UnsupportedCodec(codec);
            }
            if msg_lower.contains("not found") || msg_lower.contains("unsupported") {
                return VideoError::DecodingFailed(msg.to_string());
            }
        }

        if msg_lower.contains("no video stream") || msg_lower.contains("invalid data found") {
            return VideoError::NoVideoStream;
        }

        if msg_lower.contains("no such file")
            || msg_lower.contains("not found")
            || msg_lower.contains("permission denied")
            || msg_lower.contains("connection")
            || msg_lower.contains("i/o error")
            || msg_lower.contains("failed to open")
        {
            return VideoError::IoError(msg.to_string());
        }

        if msg_lower.contains("packet")
            || msg_lower.contains("scaling")
            || msg_lower.contains("decode")
        {
            return VideoError::DecodingFailed(msg.to_string());
        }

        VideoError::Other(msg.to_string())
    }

    fn extract_codec_name(msg: &str) -> Option<String> {
        let codecs = [
            "h264", "hevc", "h265", "vp8", "vp9", "av1", "mpeg4", "mpeg2",
        ];
        codecs
            .iter()
            .find(|codec| msg.contains(*codec))
            .map(|codec| codec.to_uppercase())
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::UnsupportedCodec(codec) => write!(f, "Unsupported video codec: {codec}"),
            VideoError::NoVideoStream => write!(f, "No video stream found"),
            VideoError::IoError(msg) => write!(f, "I/O error: {msg}"),
            VideoError::DecodingFailed(msg) => write!(f, "Decoding failed: {msg}"),
            VideoError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {e}"),
            Error::Config(e) => write!(f, "Config Error: {e}"),
            Error::Video(e) => write!(f, "Video Error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<VideoError> for Error {
    fn from(err: VideoError) -> Self {
        Error::Video(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn from_message_detects_unreachable_source() {
        let err = VideoError::from_message("Failed to open video: Connection refused");
        assert!(matches!(err, VideoError::IoError(_)));
    }

    #[test]
    fn from_message_detects_missing_stream() {
        assert_eq!(
            VideoError::from_message("No video stream found"),
            VideoError::NoVideoStream
        );
        assert_eq!(
            VideoError::from_message("Invalid data found when processing input"),
            VideoError::NoVideoStream
        );
    }

    #[test]
    fn from_message_extracts_codec() {
        let err = VideoError::from_message("Decoder hevc not found");
        assert_eq!(err, VideoError::UnsupportedCodec("HEVC".to_string()));
    }

    #[test]
    fn from_message_detects_decoding_failure() {
        let err = VideoError::from_message("Packet send failed: error");
        assert!(matches!(err, VideoError::DecodingFailed(_)));
    }

    #[test]
    fn from_message_falls_back_to_other() {
        let err = VideoError::from_message("something odd");
        assert_eq!(err, VideoError::Other("something odd".to_string()));
        assert_eq!(err.i18n_key(), "player-error-general");
    }
}
