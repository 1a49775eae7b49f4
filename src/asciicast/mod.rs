//! asciicast v1/v2 loading
//!
//! The recorder writes either format:
//!
//! - v1: a single JSON document whose `stdout` array holds `[delay, text]` pairs,
//!   each delay relative to the previous chunk.
//! - v2: a header line followed by one `[time, code, data]` line per event, where
//!   `time` is absolute since the start of the recording.
//!
//! Both are normalized into [`AsciicastFile`], whose events always carry the delay
//! since the previous event, and from there into a [`SessionDescriptor`].

mod error;

use std::collections::HashMap;
use std::fs;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use error::CastError;

use crate::player::{EventLog, SessionDescriptor, TermEvent};

/// asciicast format version
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    One,
    Two,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Version::One => write!(f, "1"),
            Version::Two => write!(f, "2"),
        }
    }
}

/// Header fields shared by v1 documents and v2 header lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<HashMap<String, String>>,
}

/// Full v1 document: header fields plus the inline `stdout` log.
#[derive(Deserialize)]
struct V1Document {
    #[serde(flatten)]
    header: Header,
    stdout: Vec<(f64, String)>,
}

/// Event type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Output (data written to terminal)
    Output, // "o"
    /// Input (data read from terminal)
    Input, // "i"
    /// Marker (annotation)
    Marker, // "m"
    /// Resize (terminal resize)
    Resize, // "r"
    /// Exit (process exit code)
    Exit, // "x"
}

impl EventType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "o" => Some(EventType::Output),
            "i" => Some(EventType::Input),
            "m" => Some(EventType::Marker),
            "r" => Some(EventType::Resize),
            "x" => Some(EventType::Exit),
            _ => None,
        }
    }

    pub fn to_code(&self) -> &'static str {
        match self {
            EventType::Output => "o",
            EventType::Input => "i",
            EventType::Marker => "m",
            EventType::Resize => "r",
            EventType::Exit => "x",
        }
    }
}

/// An event in the recording
#[derive(Debug, Clone)]
pub struct Event {
    /// Time offset from previous event (in seconds)
    pub time: f64,
    /// Event type
    pub event_type: EventType,
    /// Event data (output text, marker label, etc.)
    pub data: String,
}

impl Event {
    pub fn new(time: f64, event_type: EventType, data: impl Into<String>) -> Self {
        Self {
            time,
            event_type,
            data: data.into(),
        }
    }

    pub fn output(time: f64, data: impl Into<String>) -> Self {
        Self::new(time, EventType::Output, data)
    }

    pub fn marker(time: f64, label: impl Into<String>) -> Self {
        Self::new(time, EventType::Marker, label)
    }

    pub fn is_output(&self) -> bool {
        self.event_type == EventType::Output
    }

    pub fn is_marker(&self) -> bool {
        self.event_type == EventType::Marker
    }

    /// Parse a v2 event line. The returned `time` is still absolute.
    pub fn from_json(line: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(line).context("Failed to parse event JSON")?;

        let arr = value.as_array().context("Event must be a JSON array")?;

        if arr.len() < 3 {
            return Err(CastError::ShortEvent(arr.len()).into());
        }

        let time = arr[0].as_f64().context("Event time must be a number")?;

        let code = arr[1].as_str().context("Event type must be a string")?;

        let event_type = EventType::from_code(code)
            .ok_or_else(|| CastError::UnknownEventType(code.to_string()))?;

        let data = arr[2]
            .as_str()
            .context("Event data must be a string")?
            .to_string();

        Ok(Event {
            time,
            event_type,
            data,
        })
    }
}

/// A loaded recording, normalized to relative event times.
#[derive(Debug, Clone)]
pub struct AsciicastFile {
    pub version: Version,
    pub header: Header,
    pub events: Vec<Event>,
}

impl AsciicastFile {
    /// Parse a recording from a path
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to open file: {:?}", path))?;

        Self::parse_str(&content)
    }

    /// Parse a recording from a reader
    pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Failed to read recording")?;

        Self::parse_str(&content)
    }

    /// Parse from a string, detecting the format version.
    pub fn parse_str(content: &str) -> Result<Self> {
        let first_line = content
            .lines()
            .find(|line| !line.trim().is_empty())
            .context("File is empty")?;

        // A multi-line v1 document has no parseable first line; only a v2 header
        // (or a one-line v1 document) gets past this.
        match serde_json::from_str::<Header>(first_line) {
            Ok(header) if header.version == 2 => Self::parse_v2(header, content),
            Ok(header) if header.version != 1 => {
                Err(CastError::UnsupportedVersion(header.version).into())
            }
            _ => Self::parse_v1(content),
        }
    }

    fn parse_v1(content: &str) -> Result<Self> {
        let doc: V1Document =
            serde_json::from_str(content).context("Failed to parse asciicast v1 document")?;

        if doc.header.version != 1 {
            return Err(CastError::UnsupportedVersion(doc.header.version).into());
        }

        let events = doc
            .stdout
            .into_iter()
            .map(|(delay, text)| Event::output(delay, text))
            .collect();

        Ok(AsciicastFile {
            version: Version::One,
            header: doc.header,
            events,
        })
    }

    fn parse_v2(header: Header, content: &str) -> Result<Self> {
        let mut events = Vec::new();
        let mut prev_time = 0.0f64;

        // Skip blank lines before the header, then the header itself
        let body = content
            .lines()
            .enumerate()
            .skip_while(|(_, line)| line.trim().is_empty())
            .skip(1);

        for (line_idx, line) in body {
            if line.trim().is_empty() {
                continue;
            }

            let mut event = Event::from_json(line)
                .with_context(|| format!("Failed to parse event on line {}", line_idx + 1))?;

            let absolute = event.time;
            event.time = (absolute - prev_time).max(0.0);
            prev_time = absolute.max(prev_time);
            events.push(event);
        }

        Ok(AsciicastFile {
            version: Version::Two,
            header,
            events,
        })
    }

    /// Terminal size recorded in the header, defaulting to 80x24.
    pub fn size(&self) -> (u16, u16) {
        let cols = self.header.width.unwrap_or(80).min(u16::MAX as u32) as u16;
        let rows = self.header.height.unwrap_or(24).min(u16::MAX as u32) as u16;
        (cols, rows)
    }

    /// Get all marker events
    pub fn markers(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_marker()).collect()
    }

    /// Get all output events
    pub fn outputs(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_output()).collect()
    }

    /// Calculate cumulative time for each event
    pub fn cumulative_times(&self) -> Vec<f64> {
        let mut times = Vec::with_capacity(self.events.len());
        let mut cumulative = 0.0;
        for event in &self.events {
            cumulative += event.time;
            times.push(cumulative);
        }
        times
    }

    /// Build the output-only event log.
    ///
    /// Delays of non-output events are carried into the next output chunk so
    /// every chunk keeps its original session time.
    pub fn event_log(&self) -> EventLog {
        let mut carried = 0.0f64;
        let mut entries = Vec::with_capacity(self.events.len());

        for event in &self.events {
            carried += event.time;
            if event.is_output() {
                entries.push(TermEvent::new(carried, event.data.clone()));
                carried = 0.0;
            }
        }

        EventLog::new(entries)
    }

    /// Convert into the player's construction input.
    ///
    /// A header without `duration` falls back to the end of the event log.
    pub fn to_descriptor(&self) -> SessionDescriptor {
        let (width, height) = self.size();
        let stdout = self.event_log();
        let duration = self
            .header
            .duration
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or_else(|| stdout.total_duration());

        SessionDescriptor {
            width,
            height,
            duration,
            stdout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v1_cast() -> &'static str {
        // Same layout the recorder writes: padded header, leading empty chunk,
        // one chunk per line.
        r#"{"duration": 6, "version": 1, "width": 80, "height": 24, "command": "", "title": "", "env": {"SHELL": "/bin/sh", "TERM": "xterm"},"stdout":[[0,""]
,[1.0000,"a"]
,[2.0000,"b"]
,[0.0000,"c"]
,[3.0000,"d"]
]}"#
    }

    fn v2_cast() -> &'static str {
        r#"{"version": 2, "width": 100, "height": 30}
[0.5,"o","$ make build\r\n"]
[1.5,"m","Build started"]
[4.0,"o","Build complete\r\n"]
[4.1,"i","q"]
[4.25,"o","$ "]"#
    }

    #[test]
    fn parse_v1_document() {
        let cast = AsciicastFile::parse_str(v1_cast()).unwrap();
        assert_eq!(cast.version, Version::One);
        assert_eq!(cast.header.duration, Some(6.0));
        assert_eq!(cast.events.len(), 5);
        assert_eq!(cast.events[1].data, "a");
        assert_eq!(cast.size(), (80, 24));
    }

    #[test]
    fn parse_single_line_v1_document() {
        let content = r#"{"version":1,"width":10,"height":5,"duration":1.5,"stdout":[[1.5,"x"]]}"#;
        let cast = AsciicastFile::parse_str(content).unwrap();
        assert_eq!(cast.version, Version::One);
        assert_eq!(cast.events.len(), 1);
        assert_eq!(cast.size(), (10, 5));
    }

    #[test]
    fn parse_v2_converts_absolute_times_to_delays() {
        let cast = AsciicastFile::parse_str(v2_cast()).unwrap();
        assert_eq!(cast.version, Version::Two);
        assert_eq!(cast.events.len(), 5);
        let delays: Vec<f64> = cast.events.iter().map(|e| e.time).collect();
        let expected = [0.5, 1.0, 2.5, 0.1, 0.15];
        for (got, want) in delays.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
    }

    #[test]
    fn event_log_keeps_output_times_across_other_events() {
        let cast = AsciicastFile::parse_str(v2_cast()).unwrap();
        let log = cast.event_log();
        assert_eq!(log.len(), 3);
        assert!((log.cumulative(0) - 0.5).abs() < 1e-9);
        assert!((log.cumulative(1) - 4.0).abs() < 1e-9);
        assert!((log.cumulative(2) - 4.25).abs() < 1e-9);
    }

    #[test]
    fn descriptor_falls_back_to_log_duration() {
        let cast = AsciicastFile::parse_str(v2_cast()).unwrap();
        let descriptor = cast.to_descriptor();
        assert_eq!((descriptor.width, descriptor.height), (100, 30));
        assert!((descriptor.duration - 4.25).abs() < 1e-9);
    }

    #[test]
    fn descriptor_prefers_header_duration() {
        let cast = AsciicastFile::parse_str(v1_cast()).unwrap();
        let descriptor = cast.to_descriptor();
        assert_eq!(descriptor.duration, 6.0);
        assert_eq!(descriptor.stdout.len(), 5);
    }

    #[test]
    fn out_of_order_v2_times_clamp_to_zero_delay() {
        let content = r#"{"version": 2, "width": 80, "height": 24}
[2.0,"o","a"]
[1.0,"o","b"]
[3.0,"o","c"]"#;
        let cast = AsciicastFile::parse_str(content).unwrap();
        assert_eq!(cast.events[1].time, 0.0);
        let log = cast.event_log();
        assert_eq!(log.get(1).map(|e| e.delay), Some(0.0));
        assert!((log.cumulative(2) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn parse_extracts_marker_events() {
        let cast = AsciicastFile::parse_str(v2_cast()).unwrap();
        let markers = cast.markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].data, "Build started");
        assert_eq!(cast.outputs().len(), 3);
    }

    #[test]
    fn event_type_conversion() {
        assert_eq!(EventType::from_code("o"), Some(EventType::Output));
        assert_eq!(EventType::from_code("i"), Some(EventType::Input));
        assert_eq!(EventType::from_code("m"), Some(EventType::Marker));
        assert_eq!(EventType::from_code("r"), Some(EventType::Resize));
        assert_eq!(EventType::from_code("x"), Some(EventType::Exit));
        assert_eq!(EventType::from_code("z"), None);

        assert_eq!(EventType::Output.to_code(), "o");
        assert_eq!(EventType::Marker.to_code(), "m");
    }

    #[test]
    fn rejects_unsupported_versions() {
        let v3_content = r#"{"version":3,"term":{"cols":80,"rows":24}}"#;
        let err = AsciicastFile::parse_str(v3_content).unwrap_err();
        assert!(err.to_string().contains("v1 and v2"));
        assert!(matches!(
            err.downcast_ref::<CastError>(),
            Some(CastError::UnsupportedVersion(3))
        ));
    }

    #[test]
    fn rejects_unknown_event_codes() {
        let content = "{\"version\": 2, \"width\": 80, \"height\": 24}\n[0.1,\"q\",\"x\"]";
        let err = AsciicastFile::parse_str(content).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown event type: q"));
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(AsciicastFile::parse_str("   \n\n").is_err());
    }

    #[test]
    fn rejects_malformed_v1() {
        let err = AsciicastFile::parse_str("{\"version\": 1, \"stdout\": [[1,").unwrap_err();
        assert!(err.to_string().contains("v1"));
    }
}
