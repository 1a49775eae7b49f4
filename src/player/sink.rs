//! Terminal output sinks.
//!
//! The replay cursor is the only writer. A sink is append-only: there is no way
//! to take output back short of clearing it and replaying from the start.

use std::io::Write;

/// Destination for replayed terminal output.
pub trait TerminalSink {
    /// Append output.
    fn write(&mut self, text: &str);

    /// Erase the visible screen.
    fn clear(&mut self);

    /// Clear plus cursor and attribute reset.
    fn reset(&mut self);

    /// Character grid dimensions as (cols, rows).
    fn size(&self) -> (u16, u16);
}

/// In-memory sink that keeps everything written since the last clear.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    content: String,
    cols: u16,
    rows: u16,
    writes: usize,
    resets: usize,
}

impl MemorySink {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            ..Self::default()
        }
    }

    /// Output written since the last clear or reset.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of non-empty writes received.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Number of resets received.
    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl TerminalSink for MemorySink {
    fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.content.push_str(text);
        self.writes += 1;
    }

    fn clear(&mut self) {
        self.content.clear();
    }

    fn reset(&mut self) {
        self.content.clear();
        self.resets += 1;
    }

    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }
}

/// Sink that forwards output to a real terminal as-is.
pub struct AnsiSink<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// Rows the replayed output may scroll within, counted from the top
    scroll_rows: Option<u16>,
}

impl<W: Write> AnsiSink<W> {
    const CLEAR: &'static str = "\x1b[2J\x1b[H";
    const RESET: &'static str = "\x1b[0m\x1b[r\x1b[2J\x1b[3J\x1b[H\x1b[?25h";

    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            scroll_rows: None,
        }
    }

    /// Confine scrolling to the top `rows` lines of the host terminal.
    ///
    /// The region survives `reset()`. Zero rows removes it.
    pub fn set_scroll_region(&mut self, rows: u16) {
        self.scroll_rows = (rows > 0).then_some(rows);
        self.emit_scroll_region();
    }

    pub fn scroll_region(&self) -> Option<u16> {
        self.scroll_rows
    }

    fn emit_scroll_region(&mut self) {
        match self.scroll_rows {
            Some(rows) => self.emit(&format!("\x1b[1;{}r\x1b[H", rows)),
            None => self.emit("\x1b[r"),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    fn emit(&mut self, bytes: &str) {
        let result = self
            .out
            .write_all(bytes.as_bytes())
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::warn!("terminal write failed: {}", e);
        }
    }
}

impl<W: Write> TerminalSink for AnsiSink<W> {
    fn write(&mut self, text: &str) {
        if !text.is_empty() {
            self.emit(text);
        }
    }

    fn clear(&mut self) {
        self.emit(Self::CLEAR);
    }

    fn reset(&mut self) {
        self.emit(Self::RESET);
        if self.scroll_rows.is_some() {
            self.emit_scroll_region();
        }
    }

    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }
}
