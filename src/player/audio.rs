//! Audio clock collaborators.
//!
//! The audio track is the authoritative time source for playback. The player
//! never decodes audio itself; it talks to whatever drives the track through
//! [`AudioClock`].

use std::time::Duration;

use crate::player::timer::Clock;

/// Notifications raised by an audio track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockSignal {
    /// Enough data is buffered to play through without stalling
    CanPlayThrough,
    /// The track reported its length in seconds
    DurationKnown(f64),
    /// Playback reached the end of the track
    Ended,
}

/// External audio clock.
pub trait AudioClock {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Move the playback position.
    fn set_current_time(&mut self, seconds: f64);

    fn play(&mut self);

    fn pause(&mut self);

    /// Drain the signals raised since the previous call.
    fn take_signals(&mut self) -> Vec<ClockSignal>;
}

/// Stand-in for an audio track when there is none to decode.
///
/// Its position advances with a [`Clock`] while playing. It is ready
/// immediately and signals its end once the position reaches the duration.
#[derive(Debug)]
pub struct SilentTrack<C> {
    clock: C,
    duration: f64,
    /// Position when playback last started or was moved
    base: f64,
    /// Clock reading when playback last started, if playing
    started_at: Option<Duration>,
    signals: Vec<ClockSignal>,
}

impl<C: Clock> SilentTrack<C> {
    pub fn new(clock: C, duration: f64) -> Self {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        Self {
            clock,
            duration,
            base: 0.0,
            started_at: None,
            signals: vec![
                ClockSignal::DurationKnown(duration),
                ClockSignal::CanPlayThrough,
            ],
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }

    fn unclamped_time(&self) -> f64 {
        match self.started_at {
            Some(start) => self.base + self.clock.now().saturating_sub(start).as_secs_f64(),
            None => self.base,
        }
    }
}

impl<C: Clock> AudioClock for SilentTrack<C> {
    fn current_time(&self) -> f64 {
        self.unclamped_time().min(self.duration)
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.base = if seconds.is_finite() {
            seconds.clamp(0.0, self.duration)
        } else {
            0.0
        };
        if self.started_at.is_some() {
            self.started_at = Some(self.clock.now());
        }
    }

    fn play(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(self.clock.now());
        }
    }

    fn pause(&mut self) {
        self.base = self.current_time();
        self.started_at = None;
    }

    fn take_signals(&mut self) -> Vec<ClockSignal> {
        if self.started_at.is_some() && self.unclamped_time() >= self.duration {
            self.base = self.duration;
            self.started_at = None;
            self.signals.push(ClockSignal::Ended);
        }
        std::mem::take(&mut self.signals)
    }
}
