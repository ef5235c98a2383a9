// SPDX-License-Identifier: MPL-2.0
use iced_reel::config::{self, Config, LibraryEntry};
use iced_reel::i18n::fluent::I18n;
use iced_reel::ui::video_modal::{self, Event, Message, SourceKind};
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    let mut initial_config = Config::default();
    initial_config.general.language = Some("en-US".to_string());
    config::save_to_path(&initial_config, &config_path).expect("Failed to write config file");

    let loaded = config::load_from_path(&config_path).expect("Failed to load config");
    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
    assert_eq!(i18n.tr("launcher-play-button"), "Play");

    let mut updated = loaded;
    updated.general.language = Some("fr".to_string());
    config::save_to_path(&updated, &config_path).expect("Failed to write config file");

    let reloaded = config::load_from_path(&config_path).expect("Failed to reload config");
    let i18n = I18n::new(None, &reloaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert_eq!(i18n.tr("player-replay"), "Revoir");
}

#[test]
fn library_entries_survive_round_trip() {
    let dir = tempdir().expect("Failed to create temporary directory");

    let mut config = Config::default();
    config.library.push(LibraryEntry {
        title: "Launch trailer".to_string(),
        url: "https://www.youtube.com/watch?v=ABC123".to_string(),
    });
    config.modal.fade_in_ms = Some(0);
    config::save_with_override(&config, Some(dir.path().to_path_buf()))
        .expect("Failed to save config");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(loaded, config);
}

#[test]
fn broken_settings_fall_back_with_warning() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join("settings.toml"), "[modal\nmax_width = ")
        .expect("Failed to write broken config");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(loaded, Config::default());
    assert_eq!(warning.as_deref(), Some("launcher-config-load-error"));
}

#[test]
fn modal_lifecycle_through_public_api() {
    let config = Config::default();
    let mut modal = video_modal::State::new(config.player.clone(), config.modal.clone());
    assert!(!modal.is_shown());

    // Container supplies a source
    modal.set_source(Some("https://youtu.be/XYZ".to_string()));
    let source = modal.source().expect("source should be set");
    assert_eq!(source.kind(), SourceKind::Embedded);
    assert_eq!(
        source.embed_url().as_deref(),
        Some("https://www.youtube.com/embed/XYZ")
    );

    // Clicks inside the panel never close it
    assert_eq!(modal.update(Message::PanelPressed), Event::None);

    // Escape asks the container to close, the container clears the source
    assert_eq!(modal.update(Message::EscapePressed), Event::Close);
    modal.set_source(None);
    assert!(!modal.is_shown());
    assert!(modal.source().is_none());
}

#[test]
fn classifier_and_normalizer_agree_on_examples() {
    let cases = [
        (
            "https://youtube.com/watch?v=ABC123",
            SourceKind::Embedded,
            "https://youtube.com/embed/ABC123",
        ),
        (
            "https://youtu.be/ABC123",
            SourceKind::Embedded,
            "https://www.youtube.com/embed/ABC123",
        ),
        (
            "https://www.youtube.com/embed/ABC123",
            SourceKind::Embedded,
            "https://www.youtube.com/embed/ABC123",
        ),
        (
            "https://example.com/video.mp4",
            SourceKind::Native,
            "https://example.com/video.mp4",
        ),
    ];

    for (url, kind, embed) in cases {
        assert_eq!(video_modal::classify(url), kind, "{url}");
        assert_eq!(video_modal::embed_url(url), embed, "{url}");
    }
}

#[test]
fn panel_width_is_capped() {
    assert_eq!(video_modal::panel_width(500.0, 896.0), 450.0);
    assert_eq!(video_modal::panel_width(2000.0, 896.0), 896.0);
    assert_eq!(video_modal::panel_width(0.0, 896.0), 0.0);
}
