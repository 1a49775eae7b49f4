//! Position indicator drawn on the bottom rows of the host terminal.

use std::io::Write;

use crate::player::progress::{PositionIndicator, SeekGesture};
use crate::player::render::progress::progress_bar_line;
use crate::player::render::status::status_bar_line;
use crate::player::state::{Layout, MarkerPosition};
use crate::player::transport::Phase;

/// Progress and status rows that double as the seek control.
///
/// Every update redraws both rows and puts the cursor back where the replayed
/// output left it.
pub struct StatusLine<W: Write> {
    out: W,
    layout: Layout,
    markers: Vec<MarkerPosition>,
    value: f64,
    max: f64,
    phase: Phase,
}

impl<W: Write> StatusLine<W> {
    pub fn new(out: W, layout: Layout, markers: Vec<MarkerPosition>) -> Self {
        Self {
            out,
            layout,
            markers,
            value: 0.0,
            max: 0.0,
            phase: Phase::Loading,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.redraw();
    }

    pub fn markers(&self) -> &[MarkerPosition] {
        &self.markers
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn redraw(&mut self) {
        let mut frame = String::from("\x1b7"); // Save cursor
        frame.push_str(&progress_bar_line(
            self.layout.term_cols,
            self.layout.progress_row(),
            self.value,
            self.max,
            &self.markers,
        ));
        frame.push_str(&status_bar_line(
            self.layout.term_cols,
            self.layout.status_row(),
            self.phase,
            self.markers.len(),
        ));
        frame.push_str("\x1b8"); // Restore cursor

        let result = self
            .out
            .write_all(frame.as_bytes())
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::warn!("status line redraw failed: {}", e);
        }
    }
}

impl<W: Write> PositionIndicator for StatusLine<W> {
    fn set_max(&mut self, seconds: f64) {
        self.max = seconds;
        self.redraw();
    }

    fn set_value(&mut self, seconds: f64) -> Vec<SeekGesture> {
        self.value = seconds;
        self.redraw();
        Vec::new()
    }

    fn show_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redraw_preserves_cursor() {
        let mut line = StatusLine::new(Vec::new(), Layout::new(80, 24), Vec::new());
        line.set_max(10.0);
        line.set_value(5.0);

        let written = String::from_utf8(line.get_ref().clone()).unwrap();
        assert!(written.starts_with("\x1b7"));
        assert!(written.ends_with("\x1b8"));
        assert!(written.contains("00:05/00:10"));
        assert_eq!(line.value(), 5.0);
    }

    #[test]
    fn phase_change_redraws_label() {
        let mut line = StatusLine::new(Vec::new(), Layout::new(80, 24), Vec::new());
        line.show_phase(Phase::Ended);
        let written = String::from_utf8(line.get_ref().clone()).unwrap();
        assert!(written.contains("replay"));
    }
}
