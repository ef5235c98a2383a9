// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal.
//!
//! Samples are pushed into a short shared buffer that the cpal callback drains.
//! Pause and mute are atomics read by the callback, so pausing silences the
//! device on its next buffer without waiting for the decoder.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use super::Volume;
use crate::error::{Error, Result};

/// Interleaved f32 samples normalized to [-1.0, 1.0].
pub type AudioSamples = Arc<Vec<f32>>;

/// Device format the audio decoder must resample to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioOutputConfig {
    pub sample_rate: u32,
    pub channels: u16,
}

/// State shared with the cpal callback.
struct SharedState {
    /// Perceptual gain stored as f32 bits.
    gain_bits: AtomicU32,
    muted: AtomicBool,
    paused: AtomicBool,
}

impl SharedState {
    fn new(volume: Volume, muted: bool) -> Self {
        Self {
            gain_bits: AtomicU32::new(volume.perceptual_gain().to_bits()),
            muted: AtomicBool::new(muted),
            paused: AtomicBool::new(true),
        }
    }

    fn gain(&self) -> f32 {
        f32::from_bits(self.gain_bits.load(Ordering::Relaxed))
    }

    fn set_volume(&self, volume: Volume) {
        self.gain_bits
            .store(volume.perceptual_gain().to_bits(), Ordering::Relaxed);
    }

    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    fn is_silent(&self) -> bool {
        self.is_muted() || self.is_paused()
    }
}

/// Bounded sample queue between the decoder and the device callback.
struct SampleBuffer {
    samples: Mutex<Vec<f32>>,
    capacity: usize,
}

impl SampleBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            samples: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// Appends what fits; the rest is dropped rather than growing unbounded.
    fn push(&self, incoming: &[f32]) {
        if let Ok(mut buf) = self.samples.lock() {
            let room = self.capacity.saturating_sub(buf.len());
            let take = room.min(incoming.len());
            buf.extend_from_slice(&incoming[..take]);
        }
    }

    fn clear(&self) {
        if let Ok(mut buf) = self.samples.lock() {
            buf.clear();
        }
    }

    /// Fills `out` with gained samples, padding with silence, and drains what was used.
    fn drain_into<T: cpal::SizedSample + cpal::FromSample<f32>>(&self, out: &mut [T], gain: f32) {
        let Ok(mut buf) = self.samples.lock() else {
            fill_silence(out);
            return;
        };

        for (i, sample) in out.iter_mut().enumerate() {
            // Just below 1.0: i16 conversion overflows at exactly 1.0
            let value = buf.get(i).map_or(0.0, |s| (s * gain).clamp(-1.0, 0.999_999_9));
            *sample = T::from_sample(value);
        }

        let consumed = out.len().min(buf.len());
        buf.drain(..consumed);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.samples.lock().map(|buf| buf.len()).unwrap_or(0)
    }
}

fn fill_silence<T: cpal::SizedSample + cpal::FromSample<f32>>(out: &mut [T]) {
    for sample in out.iter_mut() {
        *sample = T::from_sample(0.0f32);
    }
}

/// Audio output stream on the default device. Starts paused.
pub struct AudioOutput {
    shared_state: Arc<SharedState>,
    buffer: Arc<SampleBuffer>,
    config: AudioOutputConfig,
    /// Kept alive to keep the device running.
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns an error if no device is available or the stream cannot start.
    pub fn new(volume: Volume, muted: bool) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Io("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Io(format!("Failed to get audio config: {e}")))?;

        let config = AudioOutputConfig {
            sample_rate: supported_config.sample_rate().0,
            channels: supported_config.channels(),
        };

        let shared_state = Arc::new(SharedState::new(volume, muted));
        // About one second of audio
        let buffer = Arc::new(SampleBuffer::new(
            config.sample_rate as usize * config.channels as usize,
        ));

        let stream_config: cpal::StreamConfig = supported_config.config();
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &stream_config, &buffer, &shared_state)?
            }
            cpal::SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &stream_config, &buffer, &shared_state)?
            }
            cpal::SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &stream_config, &buffer, &shared_state)?
            }
            _ => return Err(Error::Io("Unsupported audio sample format".to_string())),
        };

        stream
            .play()
            .map_err(|e| Error::Io(format!("Failed to start audio stream: {e}")))?;

        Ok(Self {
            shared_state,
            buffer,
            config,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: &Arc<SampleBuffer>,
        shared_state: &Arc<SharedState>,
    ) -> Result<cpal::Stream> {
        let buffer = Arc::clone(buffer);
        let shared_state = Arc::clone(shared_state);

        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    if shared_state.is_silent() {
                        fill_silence(data);
                        return;
                    }
                    buffer.drain_into(data, shared_state.gain());
                },
                |err| {
                    tracing::warn!(error = %err, "audio output error");
                },
                None,
            )
            .map_err(|e| Error::Io(format!("Failed to build audio stream: {e}")))
    }

    /// Device format to resample to.
    #[must_use]
    pub fn config(&self) -> AudioOutputConfig {
        self.config
    }

    /// Queues samples for playback.
    pub fn play(&self, samples: &AudioSamples) {
        self.buffer.push(samples);
    }

    pub fn pause(&self) {
        self.shared_state.set_paused(true);
    }

    pub fn resume(&self) {
        self.shared_state.set_paused(false);
    }

    /// Silences the device and drops anything queued.
    pub fn stop(&self) {
        self.shared_state.set_paused(true);
        self.buffer.clear();
    }

    pub fn set_volume(&self, volume: Volume) {
        self.shared_state.set_volume(volume);
    }

    pub fn set_muted(&self, muted: bool) {
        self.shared_state.set_muted(muted);
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.shared_state.is_muted()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.shared_state.is_paused()
    }
}
