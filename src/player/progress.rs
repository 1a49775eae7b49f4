//! Position indicator updates.
//!
//! While playing, the reporter copies the audio clock onto the UI position
//! indicator every interval. A programmatic write to the indicator can make it
//! emit the same change notifications a user drag would; the reporter holds a
//! guard for the duration of its own write so those echoes are not mistaken for
//! seeks.

use std::time::Duration;

use crate::player::timer::{Clock, TimerCompensator, TimerHandle};
use crate::player::transport::{Phase, Task};

/// Default reporting cadence.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// A seek gesture coming from the position indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekGesture {
    /// The user grabbed the indicator at this position (seconds)
    Start(f64),
    /// The user released the indicator at this position (seconds)
    Commit(f64),
}

/// UI control that shows the playback position.
pub trait PositionIndicator {
    /// Set the maximum representable position in seconds.
    fn set_max(&mut self, seconds: f64);

    /// Move the indicator. Returns any change notifications the control fired
    /// as a consequence of this write.
    fn set_value(&mut self, seconds: f64) -> Vec<SeekGesture>;

    /// Reflect a transport phase change (button label and the like).
    fn show_phase(&mut self, _phase: Phase) {}
}

/// Indicator that only remembers what it was told. Used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct NullIndicator {
    pub value: f64,
    pub max: f64,
    pub phase: Option<Phase>,
    pub updates: usize,
}

impl PositionIndicator for NullIndicator {
    fn set_max(&mut self, seconds: f64) {
        self.max = seconds;
    }

    fn set_value(&mut self, seconds: f64) -> Vec<SeekGesture> {
        self.value = seconds;
        self.updates += 1;
        Vec::new()
    }

    fn show_phase(&mut self, phase: Phase) {
        self.phase = Some(phase);
    }
}

/// Periodic copier of the clock position onto a [`PositionIndicator`].
#[derive(Debug)]
pub struct ProgressReporter<I> {
    indicator: I,
    interval: Duration,
    handle: Option<TimerHandle>,
    reflecting: bool,
}

impl<I: PositionIndicator> ProgressReporter<I> {
    pub fn new(indicator: I, interval: Duration) -> Self {
        Self {
            indicator,
            interval,
            handle: None,
            reflecting: false,
        }
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn indicator_mut(&mut self) -> &mut I {
        &mut self.indicator
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// True while the reporter's own write is in progress.
    pub fn is_reflecting(&self) -> bool {
        self.reflecting
    }

    /// Start (or restart) the reporting loop.
    pub fn start<C: Clock>(&mut self, timers: &mut TimerCompensator<Task, C>) {
        self.stop(timers);
        self.handle = Some(timers.schedule(Task::Progress, self.interval));
    }

    /// Cancel the reporting loop.
    pub fn stop<C: Clock>(&mut self, timers: &mut TimerCompensator<Task, C>) {
        if let Some(handle) = self.handle.take() {
            timers.cancel(handle);
        }
    }

    /// The pending loop iteration fired; schedule the next one.
    pub fn rearm<C: Clock>(&mut self, timers: &mut TimerCompensator<Task, C>) {
        self.handle = Some(timers.schedule(Task::Progress, self.interval));
    }

    /// Mark the pending iteration as consumed without rescheduling.
    pub fn fired(&mut self) {
        self.handle = None;
    }

    /// Write `seconds` to the indicator with the guard raised.
    ///
    /// The guard stays up until [`end_report`](Self::end_report) so the caller
    /// can route the returned echoes through its normal handlers first.
    pub fn begin_report(&mut self, seconds: f64) -> Vec<SeekGesture> {
        self.reflecting = true;
        self.indicator.set_value(seconds)
    }

    pub fn end_report(&mut self) {
        self.reflecting = false;
    }
}
