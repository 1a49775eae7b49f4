//! Shared front-end types.

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player
    Quit,
}

/// Marker information for the progress bar.
///
/// Tracks the session time and label for each marker in the recording.
#[derive(Debug, Clone)]
pub struct MarkerPosition {
    /// Session time when the marker occurs
    pub time: f64,
    /// Marker label (from the cast file)
    pub label: String,
}

/// Host terminal geometry used to place the status rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub term_cols: u16,
    pub term_rows: u16,
}

impl Layout {
    /// Number of chrome lines at the bottom (progress + status bar)
    pub const STATUS_LINES: u16 = 2;

    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        Self {
            term_cols,
            term_rows,
        }
    }

    /// Row of the progress bar (0-indexed).
    pub fn progress_row(&self) -> u16 {
        self.term_rows.saturating_sub(Self::STATUS_LINES)
    }

    /// Row of the status bar (0-indexed).
    pub fn status_row(&self) -> u16 {
        self.term_rows.saturating_sub(1)
    }

    /// Progress bar width, leaving room for padding and the time display.
    pub fn bar_width(&self) -> usize {
        (self.term_cols as usize).saturating_sub(14)
    }
}
