//! Subcommand handlers

pub mod config;
pub mod dump;
pub mod info;
pub mod play;
