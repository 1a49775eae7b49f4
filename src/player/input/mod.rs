//! Input handling for the native player.
//!
//! This module handles keyboard and mouse input events, dispatching
//! them to the transport controller and returning control flow signals.

mod keyboard;
mod mouse;

pub use keyboard::handle_key_event;
pub use mouse::handle_mouse_event;

use crossterm::event::Event;

use crate::player::audio::AudioClock;
use crate::player::progress::PositionIndicator;
use crate::player::sink::TerminalSink;
use crate::player::state::{InputResult, Layout, MarkerPosition};
use crate::player::timer::Clock;
use crate::player::transport::TransportController;

/// What the input handlers need to know besides the controller.
#[derive(Debug, Clone, Copy)]
pub struct InputContext<'a> {
    pub markers: &'a [MarkerPosition],
    /// Seconds moved by a single arrow key press
    pub seek_step: f64,
    pub layout: Layout,
}

/// Handle any input event, dispatching to the appropriate handler.
///
/// Resize events are left to the caller, which owns the status line.
pub fn handle_event<A, S, I, C>(
    event: Event,
    controller: &mut TransportController<A, S, I, C>,
    ctx: &InputContext<'_>,
) -> InputResult
where
    A: AudioClock,
    S: TerminalSink,
    I: PositionIndicator,
    C: Clock,
{
    match event {
        Event::Key(key) => handle_key_event(key, controller, ctx),
        Event::Mouse(mouse) => handle_mouse_event(mouse, controller, ctx),
        _ => InputResult::Continue,
    }
}
