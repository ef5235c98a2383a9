// SPDX-License-Identifier: MPL-2.0
//! Entrance transition of the modal: the backdrop fades in and the panel grows
//! from 90% of its width, both on an ease-out curve.

use std::time::{Duration, Instant};

/// Panel scale at the start of the transition.
const INITIAL_SCALE: f32 = 0.9;

#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    started_at: Instant,
    duration: Duration,
    /// Linear progress in `0.0..=1.0`.
    linear: f32,
}

impl Reveal {
    /// Starts a transition at `now`. A zero duration is already finished.
    #[must_use]
    pub fn start(now: Instant, duration_ms: u32) -> Self {
        let duration = Duration::from_millis(u64::from(duration_ms));
        Self {
            started_at: now,
            duration,
            linear: if duration.is_zero() { 1.0 } else { 0.0 },
        }
    }

    /// A transition that is already over.
    #[must_use]
    pub fn finished() -> Self {
        Self::start(Instant::now(), 0)
    }

    pub fn tick(&mut self, now: Instant) {
        if self.duration.is_zero() {
            self.linear = 1.0;
            return;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        self.linear = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
    }

    pub fn is_running(&self) -> bool {
        self.linear < 1.0
    }

    /// Eased progress, used as the opacity multiplier.
    pub fn opacity(&self) -> f32 {
        ease_out_cubic(self.linear)
    }

    /// Width multiplier of the panel.
    pub fn scale(&self) -> f32 {
        INITIAL_SCALE + (1.0 - INITIAL_SCALE) * self.opacity()
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}
