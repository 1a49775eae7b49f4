//! Interactive player for the host terminal.
//!
//! Recorded output is written straight to the terminal while a progress bar and
//! a status bar occupy the bottom two rows.

use std::io::{self, Stdout, Write};
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, ExecutableCommand};

use crate::asciicast::AsciicastFile;
use crate::config::PlaybackConfig;
use crate::player::audio::SilentTrack;
use crate::player::input::{handle_event, InputContext};
use crate::player::playback::collect_markers;
use crate::player::render::StatusLine;
use crate::player::sink::AnsiSink;
use crate::player::state::{InputResult, Layout};
use crate::player::timer::SystemClock;
use crate::player::transport::{Phase, TransportController};

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    /// The user quit after the recording reached its end
    Finished,
    /// The user quit before the end
    Interrupted,
}

type NativeController = TransportController<
    SilentTrack<SystemClock>,
    AnsiSink<Stdout>,
    StatusLine<Stdout>,
    SystemClock,
>;

/// Terminal modes enabled for the session, undone on drop.
#[derive(Debug, Default)]
struct TerminalModes {
    raw_mode: bool,
    alternate_screen: bool,
    mouse_capture: bool,
}

impl TerminalModes {
    fn enable() -> Result<Self> {
        let mut modes = Self::default();
        let mut stdout = io::stdout();

        enable_raw_mode().context("Failed to enable raw mode")?;
        modes.raw_mode = true;

        stdout.execute(EnterAlternateScreen)?;
        modes.alternate_screen = true;

        match stdout.execute(EnableMouseCapture) {
            Ok(_) => modes.mouse_capture = true,
            Err(e) => tracing::warn!("Failed to enable mouse capture: {}", e),
        }

        tracing::debug!(?modes, "terminal modes enabled");
        Ok(modes)
    }
}

impl Drop for TerminalModes {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_capture {
            let _ = stdout.execute(DisableMouseCapture);
        }
        let _ = stdout.write_all(b"\x1b[0m\x1b[r");
        let _ = stdout.execute(cursor::Show);
        if self.alternate_screen {
            let _ = stdout.execute(LeaveAlternateScreen);
        }
        if self.raw_mode {
            let _ = disable_raw_mode();
        }
    }
}

/// Play a recording in the host terminal until the user quits.
#[cfg(not(tarpaulin_include))]
pub fn play_session(path: &Path, config: &PlaybackConfig) -> Result<PlaybackResult> {
    let cast = AsciicastFile::parse(path)?;
    let markers = collect_markers(&cast);
    let descriptor = cast.to_descriptor();

    tracing::info!(
        path = %path.display(),
        events = descriptor.stdout.len(),
        duration = descriptor.duration,
        "starting playback"
    );

    let (cols, rows) = terminal::size().context("Failed to query terminal size")?;
    let mut layout = Layout::new(cols, rows);

    let _modes = TerminalModes::enable()?;

    let clock = SystemClock::new();
    let audio = SilentTrack::new(clock, descriptor.duration);
    let mut sink = AnsiSink::new(io::stdout(), descriptor.width, descriptor.height);
    sink.set_scroll_region(layout.progress_row());
    let indicator = StatusLine::new(io::stdout(), layout, markers.clone());
    let mut controller: NativeController = TransportController::with_progress_interval(
        descriptor,
        audio,
        sink,
        indicator,
        clock,
        config.progress_interval(),
    );

    let interval = config.progress_interval();
    let mut autoplay = config.autoplay;

    loop {
        controller.tick();

        if autoplay && controller.phase() == Phase::Paused {
            autoplay = false;
            controller.play();
        }

        let timeout = controller
            .next_wake()
            .map_or(interval, |wake| wake.min(interval));
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Resize(cols, rows) => {
                layout = Layout::new(cols, rows);
                controller.sink_mut().set_scroll_region(layout.progress_row());
                controller.indicator_mut().set_layout(layout);
            }
            event => {
                let ctx = InputContext {
                    markers: &markers,
                    seek_step: config.seek_step(),
                    layout,
                };
                if handle_event(event, &mut controller, &ctx) == InputResult::Quit {
                    break;
                }
            }
        }
    }

    let result = if controller.phase() == Phase::Ended {
        PlaybackResult::Finished
    } else {
        PlaybackResult::Interrupted
    };
    tracing::info!(?result, "playback stopped");
    Ok(result)
}

