//! Dump command handler

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;

use castplay::player::{MemorySink, ReplayCursor};
use castplay::AsciicastFile;

/// Replay a recording headlessly up to `at` seconds and print the output.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, at: f64) -> Result<()> {
    let cast = AsciicastFile::parse(file)?;
    let descriptor = cast.to_descriptor();
    let output = render_at(
        ReplayCursor::new(descriptor.stdout),
        descriptor.width,
        descriptor.height,
        at,
    );

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn render_at(mut cursor: ReplayCursor, width: u16, height: u16, at: f64) -> String {
    let mut sink = MemorySink::new(width, height);
    let target = if at.is_nan() { 0.0 } else { at.max(0.0) };
    let next = cursor.seek(target, &mut sink);
    tracing::debug!(target, applied = cursor.next_index(), ?next, "dump");
    sink.content().to_string()
}
