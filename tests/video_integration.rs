// SPDX-License-Identifier: MPL-2.0
//! Integration tests for native video and audio decoding.
//!
//! Tests that need media read them from `tests/data/` and are skipped when the
//! file is missing.

use iced_reel::video_player::audio::{AudioDecoder, AudioDecoderCommand, AudioDecoderEvent};
use iced_reel::video_player::audio_output::AudioOutputConfig;
use iced_reel::video_player::{AsyncDecoder, DecoderCommand, DecoderEvent};
use std::time::Duration;

/// Creates a decoder, sends Play, and verifies at least one frame is received.
fn test_video_decoding(path: &str, format_name: &str) {
    if !std::path::Path::new(path).exists() {
        eprintln!("Skipping {format_name} test: file not found");
        return;
    }

    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    rt.block_on(async {
        let mut decoder = AsyncDecoder::new(path);
        decoder
            .send_command(DecoderCommand::Play)
            .expect("Should send Play command");

        let timeout = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                match decoder.recv_event().await {
                    Some(DecoderEvent::FrameReady(frame)) => {
                        assert!(frame.width > 0, "{format_name} frame width should be > 0");
                        assert!(frame.height > 0, "{format_name} frame height should be > 0");
                        let expected_size = (frame.width * frame.height * 4) as usize;
                        assert_eq!(
                            frame.rgba_data.len(),
                            expected_size,
                            "{format_name} frame RGBA size should match dimensions"
                        );
                        return;
                    }
                    Some(DecoderEvent::Error(msg)) => {
                        panic!("{format_name} decoding error: {msg}");
                    }
                    Some(DecoderEvent::EndOfStream) => {
                        panic!("{format_name} reached end of stream without producing frames");
                    }
                    Some(DecoderEvent::Buffering) => {}
                    None => panic!("{format_name} decoder exited without events"),
                }
            }
        })
        .await;

        assert!(
            timeout.is_ok(),
            "{format_name} decoding timed out after 5 seconds"
        );

        let _ = decoder.send_command(DecoderCommand::Stop);
    });
}

#[test]
fn test_decode_mp4() {
    test_video_decoding("tests/data/sample.mp4", "MP4");
}

#[test]
fn test_decode_webm() {
    test_video_decoding("tests/data/sample.webm", "WebM");
}

#[test]
fn test_decode_mkv() {
    test_video_decoding("tests/data/sample.mkv", "MKV");
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_source_reports_error_event() {
    let mut decoder = AsyncDecoder::new("tests/data/does-not-exist.mp4");
    // The task may already have exited
    let _ = decoder.send_command(DecoderCommand::Play);

    let outcome = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match decoder.recv_event().await {
                Some(DecoderEvent::Error(msg)) => return Some(msg),
                Some(DecoderEvent::Buffering) => {}
                Some(other) => panic!("unexpected event for missing source: {other:?}"),
                None => return None,
            }
        }
    })
    .await
    .expect("decoder should fail quickly for a missing file");

    assert!(outcome.is_some(), "missing source should surface an error");
}

#[tokio::test(flavor = "multi_thread")]
async fn stop_ends_the_event_stream() {
    let path = "tests/data/sample.mp4";
    if !std::path::Path::new(path).exists() {
        return;
    }

    let mut decoder = AsyncDecoder::new(path);
    let _ = decoder.send_command(DecoderCommand::Stop);

    let drained = tokio::time::timeout(Duration::from_secs(5), async {
        while decoder.recv_event().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok(), "decoder should exit after Stop");
}

#[test]
fn test_audio_decode_mp4_with_audio() {
    let path = "tests/data/sample_with_audio.mp4";
    if !std::path::Path::new(path).exists() {
        return;
    }

    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");
    rt.block_on(async {
        let config = AudioOutputConfig {
            sample_rate: 48_000,
            channels: 2,
        };
        let mut decoder = AudioDecoder::new(path, config)
            .expect("Should open audio decoder")
            .expect("File should have an audio stream");
        decoder
            .send_command(AudioDecoderCommand::Play)
            .expect("Should send Play command");

        let timeout = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                match decoder.recv_event().await {
                    Some(AudioDecoderEvent::BufferReady(audio)) => {
                        assert_eq!(audio.channels, 2);
                        assert!(audio.frame_count() > 0);
                        return;
                    }
                    Some(AudioDecoderEvent::Error(msg)) => panic!("audio decoding error: {msg}"),
                    Some(AudioDecoderEvent::EndOfStream) | None => {
                        panic!("audio ended without producing samples")
                    }
                }
            }
        })
        .await;
        assert!(timeout.is_ok(), "audio decoding timed out after 5 seconds");

        let _ = decoder.send_command(AudioDecoderCommand::Stop);
    });
}

#[test]
fn test_audio_decode_mp4_no_audio() {
    let path = "tests/data/sample_no_audio.mp4";
    if !std::path::Path::new(path).exists() {
        return;
    }

    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");
    rt.block_on(async {
        let config = AudioOutputConfig {
            sample_rate: 48_000,
            channels: 2,
        };
        let decoder = AudioDecoder::new(path, config).expect("Should probe the file");
        assert!(decoder.is_none(), "silent video should have no audio decoder");
    });
}
