//! Command-line interface definition.
//!
//! Lives in the library so the man page generator can reach it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Replay asciicast terminal recordings in sync with a playback clock.
#[derive(Debug, Parser)]
#[command(name = "castplay", version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/castplay/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a recording in the terminal
    #[command(long_about = "Play a recording in the terminal.\n\n\
        Controls: space play/pause, left/right seek, home/end jump, \
        m next marker, q quit. Click or drag on the progress bar to seek.")]
    Play {
        /// Path to the .cast file
        file: PathBuf,
        /// Wait for space instead of starting right away
        #[arg(long)]
        paused: bool,
    },

    /// Show information about a recording
    Info {
        /// Path to the .cast file
        file: PathBuf,
    },

    /// Print the terminal output as it stands at a point in time
    Dump {
        /// Path to the .cast file
        file: PathBuf,
        /// Session time in seconds
        #[arg(long, value_name = "SECONDS", default_value_t = f64::INFINITY)]
        at: f64,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}
