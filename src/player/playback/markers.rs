//! Marker collection and navigation for the native player.
//!
//! Markers are annotation events in v2 recordings. They never reach the
//! terminal; the player only uses them as seek targets.

use crate::asciicast::AsciicastFile;
use crate::player::state::MarkerPosition;

/// Markers closer than this to the current time are skipped when jumping.
const MARKER_JUMP_SLACK: f64 = 0.1;

/// Collect markers from the cast file with their session times.
///
/// # Returns
/// A vector of `MarkerPosition` structs sorted by time
pub fn collect_markers(cast: &AsciicastFile) -> Vec<MarkerPosition> {
    let mut markers = Vec::new();
    let mut cumulative = 0.0f64;

    for event in &cast.events {
        cumulative += event.time;
        if event.is_marker() {
            markers.push(MarkerPosition {
                time: cumulative,
                label: event.data.clone(),
            });
        }
    }

    markers
}

/// First marker strictly after `current_time`, if any.
pub fn next_marker_after(markers: &[MarkerPosition], current_time: f64) -> Option<&MarkerPosition> {
    markers
        .iter()
        .find(|m| m.time > current_time + MARKER_JUMP_SLACK)
}
