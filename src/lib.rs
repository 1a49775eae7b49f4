//! castplay: replay asciicast terminal recordings against an authoritative
//! playback clock.
//!
//! The core engine lives in [`player`]; [`asciicast`] loads recordings into it.

pub mod asciicast;
pub mod cli;
pub mod config;
pub mod logging;
pub mod player;

pub use asciicast::{AsciicastFile, CastError};
pub use config::Config;
pub use player::{play_session, PlaybackResult, TransportController};
