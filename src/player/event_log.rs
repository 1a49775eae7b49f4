//! Timestamped terminal output log.
//!
//! Each entry stores the delay since the previous entry, not an absolute time.
//! Prefix sums are computed once at construction so the cursor can answer
//! "when does event i complete" without re-summing.

/// One recorded output chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct TermEvent {
    /// Seconds elapsed since the previous event
    pub delay: f64,
    /// Output written to the terminal
    pub chunk: String,
}

impl TermEvent {
    /// Create an event. Negative or non-finite delays are clamped to zero.
    pub fn new(delay: f64, chunk: impl Into<String>) -> Self {
        let delay = if delay.is_finite() && delay > 0.0 {
            delay
        } else {
            0.0
        };
        Self {
            delay,
            chunk: chunk.into(),
        }
    }
}

/// Immutable ordered sequence of output events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<TermEvent>,
    /// `ends[i]` is the session time at which event `i` completes
    ends: Vec<f64>,
}

impl EventLog {
    pub fn new(events: Vec<TermEvent>) -> Self {
        let mut ends = Vec::with_capacity(events.len());
        let mut cumulative = 0.0f64;
        for event in &events {
            cumulative += event.delay;
            ends.push(cumulative);
        }
        Self { events, ends }
    }

    /// Build a log from `(delay, text)` pairs, the shape stored in recordings.
    pub fn from_pairs<I, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, T)>,
        T: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(delay, text)| TermEvent::new(delay, text))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TermEvent> {
        self.events.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TermEvent> {
        self.events.iter()
    }

    /// Session time at which event `index` completes.
    ///
    /// Panics if `index` is out of bounds.
    pub fn cumulative(&self, index: usize) -> f64 {
        self.ends[index]
    }

    /// Sum of delays of events `[0, index)`.
    pub fn elapsed_before(&self, index: usize) -> f64 {
        match index {
            0 => 0.0,
            i => self
                .ends
                .get(i - 1)
                .or(self.ends.last())
                .copied()
                .unwrap_or(0.0),
        }
    }

    /// Session time of the last event (0 for an empty log).
    pub fn total_duration(&self) -> f64 {
        self.ends.last().copied().unwrap_or(0.0)
    }

    /// Concatenation of every chunk, in order.
    pub fn full_output(&self) -> String {
        self.events.iter().map(|e| e.chunk.as_str()).collect()
    }
}

/// Construction input for a playback session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDescriptor {
    /// Terminal columns
    pub width: u16,
    /// Terminal rows
    pub height: u16,
    /// Session length in seconds
    pub duration: f64,
    pub stdout: EventLog,
}
