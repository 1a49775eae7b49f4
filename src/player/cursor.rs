//! Replay cursor: how much of the event log has been applied.
//!
//! The cursor only ever moves forward over the log. Because the sink cannot
//! take output back, any target earlier than the current position costs a full
//! reset followed by a forward replay from the first event.

use crate::player::event_log::EventLog;
use crate::player::sink::TerminalSink;

/// Result of a catch-up pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    /// Number of events applied in this pass
    pub consumed: usize,
    /// Seconds until the next event falls due, `None` once the log is exhausted
    pub next_wake: Option<f64>,
}

/// Position of playback within an [`EventLog`].
#[derive(Debug, Clone)]
pub struct ReplayCursor {
    log: EventLog,
    /// Index of the next unconsumed event
    next_index: usize,
    /// Session time of all consumed events
    position: f64,
    /// The sink still shows output the cursor no longer accounts for
    stale: bool,
}

impl ReplayCursor {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            next_index: 0,
            position: 0.0,
            stale: false,
        }
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.log.len()
    }

    /// Whether the sink holds output from before the last [`rewind`](Self::rewind).
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// True iff the next event should already have been applied at `clock`.
    pub fn is_behind(&self, clock: f64) -> bool {
        match self.log.get(self.next_index) {
            Some(event) => self.position + event.delay < clock,
            None => false,
        }
    }

    /// Bring the sink to exactly the output that exists at `target`.
    ///
    /// Returns the seconds from `target` until the next event falls due, or
    /// `None` when nothing is left to schedule.
    pub fn seek<S: TerminalSink + ?Sized>(&mut self, target: f64, sink: &mut S) -> Option<f64> {
        if self.log.is_empty() {
            return None;
        }

        let back = self.next_index > 0 && self.log.cumulative(self.next_index - 1) > target;
        if back || self.stale {
            self.restart(sink);
        }

        let output = self.consume_while(|position, delay| position + delay <= target);
        sink.write(&output);

        tracing::debug!(
            target_secs = target,
            back,
            next_index = self.next_index,
            position = self.position,
            "cursor seek"
        );

        self.next_due_after(target)
    }

    /// Apply every event whose completion time `clock` has passed.
    pub fn catch_up<S: TerminalSink + ?Sized>(&mut self, clock: f64, sink: &mut S) -> Advance {
        if self.stale {
            self.restart(sink);
        }

        let before = self.next_index;
        let output = self.consume_while(|position, delay| position + delay < clock);
        sink.write(&output);

        let consumed = self.next_index - before;
        if consumed > 0 {
            tracing::trace!(consumed, clock, position = self.position, "caught up");
        }

        Advance {
            consumed,
            next_wake: self.next_due_after(clock),
        }
    }

    /// Reset the sink and move back to the first event.
    pub fn restart<S: TerminalSink + ?Sized>(&mut self, sink: &mut S) {
        sink.clear();
        sink.reset();
        self.next_index = 0;
        self.position = 0.0;
        self.stale = false;
    }

    /// Move back to the first event without touching the sink.
    ///
    /// The sink is reset lazily by the next seek or catch-up.
    pub fn rewind(&mut self) {
        self.next_index = 0;
        self.position = 0.0;
        self.stale = true;
    }

    fn consume_while(&mut self, due: impl Fn(f64, f64) -> bool) -> String {
        let mut output = String::new();
        while let Some(event) = self.log.get(self.next_index) {
            if !due(self.position, event.delay) {
                break;
            }
            output.push_str(&event.chunk);
            self.next_index += 1;
            self.position = self.log.cumulative(self.next_index - 1);
        }
        output
    }

    fn next_due_after(&self, now: f64) -> Option<f64> {
        self.log
            .get(self.next_index)
            .map(|event| self.position + event.delay - now)
    }
}
