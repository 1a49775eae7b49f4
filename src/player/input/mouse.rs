//! Mouse input handling for the native player.
//!
//! Pressing on the progress bar grabs the position indicator, releasing it
//! commits the seek. Dragging with the button held scrubs the indicator.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::player::audio::AudioClock;
use crate::player::input::InputContext;
use crate::player::progress::{PositionIndicator, SeekGesture};
use crate::player::render::time_at_column;
use crate::player::sink::TerminalSink;
use crate::player::state::InputResult;
use crate::player::timer::Clock;
use crate::player::transport::TransportController;

/// Handle a mouse event.
pub fn handle_mouse_event<A, S, I, C>(
    mouse: MouseEvent,
    controller: &mut TransportController<A, S, I, C>,
    ctx: &InputContext<'_>,
) -> InputResult
where
    A: AudioClock,
    S: TerminalSink,
    I: PositionIndicator,
    C: Clock,
{
    let bar_width = ctx.layout.bar_width();
    let duration = controller.duration();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row != ctx.layout.progress_row() {
                return InputResult::Continue;
            }
            if let Some(time) = time_at_column(mouse.column, bar_width, duration) {
                controller.on_seek_gesture(SeekGesture::Start(time));
                controller.indicator_mut().set_value(time);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if controller.is_seeking() => {
            let time = scrub_time(mouse.column, bar_width, duration);
            controller.indicator_mut().set_value(time);
        }
        MouseEventKind::Up(MouseButton::Left) if controller.is_seeking() => {
            let time = scrub_time(mouse.column, bar_width, duration);
            controller.on_seek_gesture(SeekGesture::Commit(time));
        }
        _ => {}
    }

    InputResult::Continue
}

/// Time under the pointer, pinned to the bar ends once the pointer leaves it.
fn scrub_time(column: u16, bar_width: usize, duration: f64) -> f64 {
    if bar_width == 0 {
        return 0.0;
    }
    let last = bar_width as u16;
    time_at_column(column.clamp(1, last), bar_width, duration).unwrap_or(0.0)
}
