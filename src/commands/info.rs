//! Info command handler

use std::path::Path;

use anyhow::Result;

use castplay::player::render::format_duration;
use castplay::AsciicastFile;

/// Print a summary of a recording.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path) -> Result<()> {
    let cast = AsciicastFile::parse(file)?;
    let descriptor = cast.to_descriptor();

    println!("File:     {}", file.display());
    println!("Format:   asciicast v{}", cast.version);
    println!("Size:     {}x{}", descriptor.width, descriptor.height);
    println!(
        "Duration: {} ({:.3}s)",
        format_duration(descriptor.duration),
        descriptor.duration
    );
    println!("Events:   {}", descriptor.stdout.len());
    println!("Markers:  {}", cast.markers().len());
    if let Some(title) = &cast.header.title {
        println!("Title:    {}", title);
    }
    Ok(())
}
