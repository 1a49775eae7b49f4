//! Rendering components for the native player.
//!
//! The recorded output goes straight to the host terminal; this module only
//! draws the chrome underneath it (progress bar and status bar).

mod indicator;
mod progress;
mod status;

pub use indicator::StatusLine;
pub use progress::{build_progress_bar_chars, format_duration, progress_bar_line, time_at_column};
pub use status::{phase_label, status_bar_line};
