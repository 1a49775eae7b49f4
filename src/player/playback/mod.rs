//! Recording metadata used for navigation.
//!
//! This module collects markers and answers "where is the next one".

mod markers;

pub use markers::{collect_markers, next_marker_after};
