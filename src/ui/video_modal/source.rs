// SPDX-License-Identifier: MPL-2.0
//! Video source classification and YouTube embed URL rewriting.
//!
//! Both functions are plain substring operations. A source is never parsed or
//! validated here: anything that is not recognizably YouTube goes to the
//! native player, which reports unreadable sources itself.

/// Domain markers that send a source to the embedded player.
const YOUTUBE_MARKERS: [&str; 2] = ["youtube.com", "youtu.be"];

const WATCH_MARKER: &str = "watch?v=";
const SHORT_LINK_MARKER: &str = "youtu.be/";
const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Rendering strategy for a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// YouTube page, rendered through the embedded player surface.
    Embedded,
    /// Anything else, decoded by the native player.
    Native,
}

/// Classifies `url` by substring.
///
/// ```
/// use iced_reel::ui::video_modal::source::{classify, SourceKind};
///
/// assert_eq!(classify("https://youtu.be/ABC123"), SourceKind::Embedded);
/// assert_eq!(classify("https://example.com/video.mp4"), SourceKind::Native);
/// ```
#[must_use]
pub fn classify(url: &str) -> SourceKind {
    if YOUTUBE_MARKERS.iter().any(|marker| url.contains(marker)) {
        SourceKind::Embedded
    } else {
        SourceKind::Native
    }
}

/// Rewrites a YouTube watch or short link into its embeddable form.
///
/// - `watch?v=` is replaced by `embed/` (first occurrence only), the rest of
///   the string is kept, query parameters included.
/// - For `youtu.be/` links, the segment after the marker (up to a repeated
///   marker, if any) becomes the id of a canonical embed URL.
/// - Anything else is returned unchanged.
#[must_use]
pub fn embed_url(url: &str) -> String {
    if url.contains(WATCH_MARKER) {
        return url.replacen(WATCH_MARKER, "embed/", 1);
    }

    if let Some(id) = url.split(SHORT_LINK_MARKER).nth(1) {
        return format!("{EMBED_BASE}{id}");
    }

    url.to_string()
}

/// A source ready for rendering: the string the container supplied plus the
/// strategy chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSource {
    url: String,
    kind: SourceKind,
}

impl VideoSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let kind = classify(&url);
        Self { url, kind }
    }

    /// The source exactly as supplied.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Embed URL for embedded sources, `None` for native ones.
    #[must_use]
    pub fn embed_url(&self) -> Option<String> {
        match self.kind {
            SourceKind::Embedded => Some(embed_url(&self.url)),
            SourceKind::Native => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_url_is_embedded_and_rewritten() {
        let url = "https://youtube.com/watch?v=ABC123";
        assert_eq!(classify(url), SourceKind::Embedded);
        assert_eq!(embed_url(url), "https://youtube.com/embed/ABC123");
    }

    #[test]
    fn watch_url_keeps_extra_query_parameters() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=ABC123&t=42s"),
            "https://www.youtube.com/embed/ABC123&t=42s"
        );
    }

    #[test]
    fn only_first_watch_marker_is_replaced() {
        assert_eq!(
            embed_url("https://youtube.com/watch?v=A&next=watch?v=B"),
            "https://youtube.com/embed/A&next=watch?v=B"
        );
    }

    #[test]
    fn short_link_becomes_canonical_embed() {
        let url = "https://youtu.be/ABC123";
        assert_eq!(classify(url), SourceKind::Embedded);
        assert_eq!(embed_url(url), "https://www.youtube.com/embed/ABC123");
    }

    #[test]
    fn short_link_keeps_trailing_parameters() {
        assert_eq!(
            embed_url("https://youtu.be/ABC123?si=xyz"),
            "https://www.youtube.com/embed/ABC123?si=xyz"
        );
    }

    #[test]
    fn repeated_short_marker_keeps_first_segment() {
        assert_eq!(
            embed_url("https://youtu.be/ABC?r=youtu.be/DEF"),
            "https://www.youtube.com/embed/ABC?r="
        );
    }

    #[test]
    fn already_embedded_url_is_unchanged() {
        let url = "https://www.youtube.com/embed/ABC123";
        assert_eq!(classify(url), SourceKind::Embedded);
        assert_eq!(embed_url(url), url);
    }

    #[test]
    fn direct_file_is_native() {
        let url = "https://example.com/video.mp4";
        assert_eq!(classify(url), SourceKind::Native);
        assert_eq!(embed_url(url), url);
    }

    #[test]
    fn malformed_input_falls_through_to_native() {
        assert_eq!(classify(""), SourceKind::Native);
        assert_eq!(classify("not a url at all"), SourceKind::Native);
        assert_eq!(classify("/home/user/clip.mkv"), SourceKind::Native);
    }

    #[test]
    fn classification_is_case_sensitive_substring() {
        assert_eq!(classify("https://YOUTUBE.COM/watch?v=X"), SourceKind::Native);
        assert_eq!(
            classify("https://example.com/?ref=youtube.com"),
            SourceKind::Embedded
        );
    }

    #[test]
    fn video_source_mirrors_supplied_string() {
        let native = VideoSource::new("https://example.com/video.mp4");
        assert_eq!(native.url(), "https://example.com/video.mp4");
        assert_eq!(native.kind(), SourceKind::Native);
        assert_eq!(native.embed_url(), None);

        let embedded = VideoSource::new("https://youtu.be/ABC123");
        assert_eq!(
            embedded.embed_url().as_deref(),
            Some("https://www.youtube.com/embed/ABC123")
        );
    }
}
