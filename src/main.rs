//! castplay CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use castplay::cli::{Cli, Commands, ConfigCommands};
use castplay::logging::{self, LogTarget};
use castplay::Config;

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let target = match cli.command {
        Commands::Play { .. } => LogTarget::FileOnly,
        _ => LogTarget::Stderr,
    };
    logging::init(&config.logging, target)?;

    match cli.command {
        Commands::Play { file, paused } => commands::play::handle(&file, paused, &config),
        Commands::Info { file } => commands::info::handle(&file),
        Commands::Dump { file, at } => commands::dump::handle(&file, at),
        Commands::Config(ConfigCommands::Show) => commands::config::handle_show(&config),
    }
}
