//! Audio-synchronized replay of terminal sessions.
//!
//! An external [`AudioClock`] is the single source of truth for the playback
//! position. The terminal output is brought in line with it by a
//! [`ReplayCursor`] that is woken by self-correcting timers.
//!
//! # Architecture
//!
//! The engine:
//! - `event_log`: the immutable output stream with prefix sums
//! - `timer`: cancellable one-shot timers that can report their remaining delay
//! - `cursor`: incremental replay and seeking over the event log
//! - `transport`: the play/pause/seek state machine
//! - `progress`: periodic position reporting with the echo guard
//! - `audio`, `sink`: the clock and terminal seams
//!
//! The native front-end:
//! - `state`: shared types (MarkerPosition, InputResult, Layout)
//! - `input/`: keyboard and mouse input handling
//! - `playback/`: marker collection and navigation
//! - `render/`: progress bar and status bar
//!
//! # Usage
//!
//! ```no_run
//! use castplay::config::PlaybackConfig;
//! use castplay::player::{play_session, PlaybackResult};
//! use std::path::Path;
//!
//! let result = play_session(Path::new("session.cast"), &PlaybackConfig::default()).unwrap();
//! match result {
//!     PlaybackResult::Finished => println!("Finished"),
//!     PlaybackResult::Interrupted => println!("Stopped by user"),
//! }
//! ```

pub mod audio;
pub mod cursor;
pub mod event_log;
pub(crate) mod input;
mod native;
pub mod playback;
pub mod progress;
pub mod render;
pub mod sink;
pub mod state;
pub mod timer;
pub mod transport;

pub use audio::{AudioClock, ClockSignal, SilentTrack};
pub use cursor::{Advance, ReplayCursor};
pub use event_log::{EventLog, SessionDescriptor, TermEvent};
pub use native::{play_session, PlaybackResult};
pub use progress::{
    NullIndicator, PositionIndicator, ProgressReporter, SeekGesture, DEFAULT_PROGRESS_INTERVAL,
};
pub use sink::{AnsiSink, MemorySink, TerminalSink};
pub use state::{InputResult, Layout, MarkerPosition};
pub use timer::{Clock, ManualClock, SystemClock, TimerCompensator, TimerHandle};
pub use transport::{Phase, Task, TransportController};
