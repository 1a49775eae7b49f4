use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

/// castplay development tasks
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "castplay development tasks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate man pages into target/man
    Man {
        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Man { out } => {
            let out = out.unwrap_or_else(|| project_root().join("target").join("man"));
            generate_man_pages(&out)
        }
    }
}

fn generate_man_pages(out: &Path) -> Result<()> {
    fs::create_dir_all(out).context("Failed to create man page directory")?;

    let cmd = castplay::cli::Cli::command();
    let name = cmd.get_name().to_string();

    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut buffer)
        .context("Failed to render man page")?;
    let path = out.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated {}", path.display());

    for sub in cmd.get_subcommands() {
        let sub_name = format!("{}-{}", name, sub.get_name());
        let mut buffer = Vec::new();
        clap_mangen::Man::new(sub.clone())
            .render(&mut buffer)
            .context("Failed to render man page")?;
        let path = out.join(format!("{}.1", sub_name));
        fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Generated {}", path.display());
    }

    Ok(())
}

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
