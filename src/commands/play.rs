//! Play command handler

use std::path::Path;

use anyhow::Result;

use castplay::{play_session, Config, PlaybackResult};

/// Play a recording interactively.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, paused: bool, config: &Config) -> Result<()> {
    let mut playback = config.playback.clone();
    if paused {
        playback.autoplay = false;
    }

    match play_session(file, &playback)? {
        PlaybackResult::Finished => println!("Finished: {}", file.display()),
        PlaybackResult::Interrupted => println!("Stopped: {}", file.display()),
    }
    Ok(())
}
