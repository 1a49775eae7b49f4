//! Recording format errors.

/// Semantic errors found while loading a recording.
///
/// I/O and JSON syntax failures are reported through `anyhow` context instead;
/// these cover well-formed JSON that does not describe a playable session.
#[derive(Debug, thiserror::Error)]
pub enum CastError {
    #[error("Only asciicast v1 and v2 formats are supported (got version {0})")]
    UnsupportedVersion(u8),

    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("Event array must have at least 3 elements (got {0})")]
    ShortEvent(usize),
}
