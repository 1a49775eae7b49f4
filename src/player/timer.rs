//! Deferred task scheduling with remaining-delay queries.
//!
//! Playback is single-threaded and cooperative: nothing sleeps, tasks are
//! queued with a delay and the owner runs them from [`TimerCompensator::take_due`]
//! once their deadline has passed. Because the compensator records when and for
//! how long each task was issued, a pause can capture the exact time left on a
//! pending task and resume with it instead of restarting the interval.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Opaque handle returned by [`TimerCompensator::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
    task: T,
    issued_at: Duration,
    delay: Duration,
}

impl<T> Pending<T> {
    fn deadline(&self) -> Duration {
        self.issued_at.saturating_add(self.delay)
    }
}

/// Queue of deferred tasks that can report the time left on each one.
#[derive(Debug)]
pub struct TimerCompensator<T, C> {
    clock: C,
    next_id: u64,
    pending: BTreeMap<TimerHandle, Pending<T>>,
}

impl<T, C: Clock> TimerCompensator<T, C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Queue `task` to become due after `delay`.
    pub fn schedule(&mut self, task: T, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(
            handle,
            Pending {
                task,
                issued_at: self.clock.now(),
                delay,
            },
        );
        handle
    }

    /// Time left before `handle` becomes due, saturating at zero.
    ///
    /// `None` means the handle already fired or was cancelled, so there is
    /// nothing left to compensate for.
    pub fn remaining(&self, handle: TimerHandle) -> Option<Duration> {
        let entry = self.pending.get(&handle)?;
        let waited = self.clock.now().saturating_sub(entry.issued_at);
        Some(entry.delay.saturating_sub(waited))
    }

    /// Drop a pending task. Returns false if it was not pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Time until the earliest pending deadline, zero if already overdue.
    pub fn until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.pending
            .values()
            .map(Pending::deadline)
            .min()
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Handles whose deadline has passed, earliest first.
    ///
    /// Tasks scheduled while the returned batch runs are not part of it, so a
    /// task that reschedules itself with a zero delay cannot starve the caller.
    pub fn take_due(&self) -> Vec<TimerHandle> {
        let now = self.clock.now();
        let mut due: Vec<(Duration, TimerHandle)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline() <= now)
            .map(|(handle, p)| (p.deadline(), *handle))
            .collect();
        due.sort();
        due.into_iter().map(|(_, handle)| handle).collect()
    }

    /// Remove a due task and hand it out for execution.
    ///
    /// Returns `None` if the task was cancelled after `take_due` listed it.
    pub fn fire(&mut self, handle: TimerHandle) -> Option<T> {
        self.pending.remove(&handle).map(|p| p.task)
    }
}
