//! Transport state machine.
//!
//! Owns the replay cursor, the audio clock and the two self-rescheduling task
//! chains that run while playing:
//!
//! - catch-up: wakes when the next event falls due, applies whatever the audio
//!   clock has passed, and reschedules from the *current* clock reading so timer
//!   drift self-corrects on the next wake
//! - progress: copies the clock onto the position indicator at a fixed cadence
//!
//! Both chains are cancelled on every transition out of `Playing`.
//!
//! ```text
//! Loading --ready--> Paused <--toggle--> Playing --ended--> Ended
//!                      ^                                     |
//!                      +---------- toggle / seek ------------+
//! ```

use std::time::Duration;

use crate::player::audio::{AudioClock, ClockSignal};
use crate::player::cursor::ReplayCursor;
use crate::player::event_log::SessionDescriptor;
use crate::player::progress::{
    PositionIndicator, ProgressReporter, SeekGesture, DEFAULT_PROGRESS_INTERVAL,
};
use crate::player::sink::TerminalSink;
use crate::player::timer::{Clock, TimerCompensator, TimerHandle};

/// Transport phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the audio clock to buffer enough to play through
    Loading,
    Paused,
    Playing,
    /// The audio clock reached its end
    Ended,
}

/// Deferred work owned by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    CatchUp,
    Progress,
}

/// Play/pause/seek controller for one playback session.
pub struct TransportController<A, S, I, C> {
    cursor: ReplayCursor,
    audio: A,
    sink: S,
    progress: ProgressReporter<I>,
    timers: TimerCompensator<Task, C>,
    phase: Phase,
    duration: f64,
    /// Upper bound for seek targets
    max_seek: f64,
    /// Time left on the catch-up task when playback was interrupted.
    /// `None` means run immediately on the next play.
    pending_delay: Option<Duration>,
    catch_up: Option<TimerHandle>,
    seeking: bool,
    resume_after_seek: bool,
}

impl<A, S, I, C> TransportController<A, S, I, C>
where
    A: AudioClock,
    S: TerminalSink,
    I: PositionIndicator,
    C: Clock,
{
    pub fn new(descriptor: SessionDescriptor, audio: A, sink: S, indicator: I, clock: C) -> Self {
        Self::with_progress_interval(
            descriptor,
            audio,
            sink,
            indicator,
            clock,
            DEFAULT_PROGRESS_INTERVAL,
        )
    }

    pub fn with_progress_interval(
        descriptor: SessionDescriptor,
        audio: A,
        sink: S,
        indicator: I,
        clock: C,
        progress_interval: Duration,
    ) -> Self {
        let duration = if descriptor.duration.is_finite() {
            descriptor.duration.max(0.0)
        } else {
            descriptor.stdout.total_duration()
        };

        let mut progress = ProgressReporter::new(indicator, progress_interval);
        progress.indicator_mut().set_max(duration);
        progress.indicator_mut().show_phase(Phase::Loading);

        Self {
            cursor: ReplayCursor::new(descriptor.stdout),
            audio,
            sink,
            progress,
            timers: TimerCompensator::new(clock),
            phase: Phase::Loading,
            duration,
            max_seek: duration,
            pending_delay: None,
            catch_up: None,
            seeking: false,
            resume_after_seek: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn max_seek(&self) -> f64 {
        self.max_seek
    }

    pub fn is_seeking(&self) -> bool {
        self.seeking
    }

    pub fn pending_delay(&self) -> Option<Duration> {
        self.pending_delay
    }

    pub fn cursor(&self) -> &ReplayCursor {
        &self.cursor
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn indicator(&self) -> &I {
        self.progress.indicator()
    }

    pub fn indicator_mut(&mut self) -> &mut I {
        self.progress.indicator_mut()
    }

    /// Number of pending tasks.
    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    /// Time until the next pending task is due.
    pub fn next_wake(&self) -> Option<Duration> {
        self.timers.until_next()
    }

    /// Deliver clock signals, then run every task that has fallen due.
    pub fn tick(&mut self) {
        for signal in self.audio.take_signals() {
            match signal {
                ClockSignal::CanPlayThrough => self.on_can_play_through(),
                ClockSignal::DurationKnown(seconds) => self.on_duration_known(seconds),
                ClockSignal::Ended => self.on_clock_ended(),
            }
        }

        for handle in self.timers.take_due() {
            match self.timers.fire(handle) {
                Some(Task::CatchUp) => self.catch_up_tick(handle),
                Some(Task::Progress) => self.progress_tick(),
                None => {}
            }
        }
    }

    // === Control surface ===

    /// Play/pause button.
    pub fn on_toggle_play_pause(&mut self) {
        match self.phase {
            Phase::Loading => tracing::debug!("toggle ignored while loading"),
            Phase::Playing => self.pause(),
            Phase::Paused | Phase::Ended => self.play(),
        }
    }

    /// The user grabbed the position indicator.
    pub fn on_seek_start(&mut self, value: f64) {
        if self.progress.is_reflecting() {
            tracing::trace!(value, "ignoring indicator echo");
            return;
        }
        if self.phase == Phase::Loading || self.seeking {
            return;
        }

        self.seeking = true;
        if self.phase == Phase::Playing {
            self.resume_after_seek = true;
            self.pause();
        }
    }

    /// The user released the position indicator at `value` seconds.
    pub fn on_seek_commit(&mut self, value: f64) {
        if self.progress.is_reflecting() {
            tracing::trace!(value, "ignoring indicator echo");
            return;
        }
        if self.phase == Phase::Loading {
            return;
        }
        if !self.seeking {
            self.on_seek_start(value);
        }
        // Playback may have been toggled on while the indicator was held
        if self.phase == Phase::Playing {
            self.resume_after_seek = true;
            self.pause();
        }

        let target = self.clamp_target(value);
        self.cancel_catch_up();
        self.pending_delay = None;
        if self.phase == Phase::Ended {
            self.set_phase(Phase::Paused);
        }

        let wake = self.cursor.seek(target, &mut self.sink);
        self.pending_delay = wake.map(secs_to_duration);
        self.audio.set_current_time(target);
        self.reflect_position(target);
        self.seeking = false;

        tracing::debug!(target_secs = target, pending = ?self.pending_delay, "seek committed");

        if std::mem::take(&mut self.resume_after_seek) {
            self.play();
        }
    }

    /// Route a gesture reported by the position indicator.
    pub fn on_seek_gesture(&mut self, gesture: SeekGesture) {
        match gesture {
            SeekGesture::Start(value) => self.on_seek_start(value),
            SeekGesture::Commit(value) => self.on_seek_commit(value),
        }
    }

    /// Seek in one step (grab and release at the same position).
    pub fn seek(&mut self, target: f64) {
        self.on_seek_start(target);
        self.on_seek_commit(target);
    }

    // === Transitions ===

    pub fn play(&mut self) {
        match self.phase {
            Phase::Loading | Phase::Playing => return,
            Phase::Ended => self.restart(),
            Phase::Paused => {}
        }

        self.set_phase(Phase::Playing);
        self.audio.play();
        let delay = self.pending_delay.take().unwrap_or(Duration::ZERO);
        self.schedule_catch_up(delay);
        self.progress.start(&mut self.timers);
    }

    pub fn pause(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }

        self.audio.pause();
        self.progress.stop(&mut self.timers);
        self.pending_delay = match self.catch_up.take() {
            Some(handle) => {
                let remaining = self.timers.remaining(handle);
                self.timers.cancel(handle);
                remaining
            }
            None => None,
        };
        self.set_phase(Phase::Paused);
    }

    pub fn on_can_play_through(&mut self) {
        if self.phase == Phase::Loading {
            self.set_phase(Phase::Paused);
        }
    }

    pub fn on_duration_known(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            tracing::debug!(seconds, "audio duration known");
            self.max_seek = seconds;
        }
    }

    pub fn on_clock_ended(&mut self) {
        self.progress.stop(&mut self.timers);
        self.cancel_catch_up();
        self.pending_delay = None;
        self.seeking = false;
        self.resume_after_seek = false;

        // The recording is over: show its final frame before forgetting where
        // the cursor was.
        if self.phase == Phase::Playing {
            self.cursor.catch_up(f64::INFINITY, &mut self.sink);
        }
        self.cursor.rewind();

        self.set_phase(Phase::Ended);
        self.reflect_position(self.duration);
    }

    // === Internals ===

    fn restart(&mut self) {
        self.cursor.restart(&mut self.sink);
        self.audio.set_current_time(0.0);
        self.pending_delay = None;
        self.reflect_position(0.0);
        self.set_phase(Phase::Paused);
    }

    fn catch_up_tick(&mut self, handle: TimerHandle) {
        if self.catch_up != Some(handle) {
            return;
        }
        self.catch_up = None;
        if self.phase != Phase::Playing {
            return;
        }

        let clock = self.audio.current_time();
        let advance = self.cursor.catch_up(clock, &mut self.sink);
        if let Some(wake) = advance.next_wake {
            self.schedule_catch_up(secs_to_duration(wake));
        }
    }

    fn progress_tick(&mut self) {
        self.progress.fired();
        if self.phase != Phase::Playing {
            return;
        }
        let now = self.audio.current_time();
        self.reflect_position(now);
        self.progress.rearm(&mut self.timers);
    }

    fn schedule_catch_up(&mut self, delay: Duration) {
        self.cancel_catch_up();
        self.catch_up = Some(self.timers.schedule(Task::CatchUp, delay));
    }

    fn cancel_catch_up(&mut self) {
        if let Some(handle) = self.catch_up.take() {
            self.timers.cancel(handle);
        }
    }

    /// Write a position to the indicator, discarding the echoes it produces.
    fn reflect_position(&mut self, seconds: f64) {
        let echoes = self.progress.begin_report(seconds);
        for gesture in echoes {
            self.on_seek_gesture(gesture);
        }
        self.progress.end_report();
    }

    fn clamp_target(&self, value: f64) -> f64 {
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, self.max_seek)
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "transport phase");
        }
        self.phase = phase;
        self.progress.indicator_mut().show_phase(phase);
    }
}

fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}
