//! Keyboard input handling for the native player.
//!
//! Handles playback controls, seeking and marker navigation.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::audio::AudioClock;
use crate::player::input::InputContext;
use crate::player::playback::next_marker_after;
use crate::player::progress::PositionIndicator;
use crate::player::sink::TerminalSink;
use crate::player::state::InputResult;
use crate::player::timer::Clock;
use crate::player::transport::TransportController;

/// Handle a keyboard event.
pub fn handle_key_event<A, S, I, C>(
    key: KeyEvent,
    controller: &mut TransportController<A, S, I, C>,
    ctx: &InputContext<'_>,
) -> InputResult
where
    A: AudioClock,
    S: TerminalSink,
    I: PositionIndicator,
    C: Clock,
{
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputResult::Quit,

        // === Playback controls ===
        KeyCode::Char(' ') => {
            controller.on_toggle_play_pause();
            InputResult::Continue
        }

        // === Seeking ===
        KeyCode::Left => {
            let position = controller.audio().current_time();
            controller.seek(position - ctx.seek_step);
            InputResult::Continue
        }
        KeyCode::Right => {
            let position = controller.audio().current_time();
            controller.seek(position + ctx.seek_step);
            InputResult::Continue
        }
        KeyCode::Home => {
            controller.seek(0.0);
            InputResult::Continue
        }
        KeyCode::End => {
            let end = controller.max_seek();
            controller.seek(end);
            InputResult::Continue
        }

        // === Markers ===
        KeyCode::Char('m') => {
            let position = controller.audio().current_time();
            match next_marker_after(ctx.markers, position).map(|m| m.time) {
                Some(time) => controller.seek(time),
                None => tracing::debug!(position, "no marker ahead"),
            }
            InputResult::Continue
        }

        _ => InputResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::input::test_support::ready_controller;
    use crate::player::state::{Layout, MarkerPosition};
    use crate::player::transport::Phase;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctx(markers: &[MarkerPosition]) -> InputContext<'_> {
        InputContext {
            markers,
            seek_step: 2.0,
            layout: Layout::new(80, 24),
        }
    }

    #[test]
    fn quit_keys() {
        let (mut controller, _) = ready_controller();
        let ctx = ctx(&[]);
        assert_eq!(
            handle_key_event(press(KeyCode::Char('q')), &mut controller, &ctx),
            InputResult::Quit
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            handle_key_event(ctrl_c, &mut controller, &ctx),
            InputResult::Quit
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('c')), &mut controller, &ctx),
            InputResult::Continue
        );
    }

    #[test]
    fn space_toggles_playback() {
        let (mut controller, _) = ready_controller();
        let ctx = ctx(&[]);
        handle_key_event(press(KeyCode::Char(' ')), &mut controller, &ctx);
        assert_eq!(controller.phase(), Phase::Playing);
        handle_key_event(press(KeyCode::Char(' ')), &mut controller, &ctx);
        assert_eq!(controller.phase(), Phase::Paused);
    }

    #[test]
    fn arrows_seek_by_step() {
        let (mut controller, _) = ready_controller();
        let ctx = ctx(&[]);

        handle_key_event(press(KeyCode::Right), &mut controller, &ctx);
        assert_eq!(controller.audio().current_time(), 2.0);
        assert_eq!(controller.sink().content(), "ab");

        handle_key_event(press(KeyCode::Left), &mut controller, &ctx);
        handle_key_event(press(KeyCode::Left), &mut controller, &ctx);
        assert_eq!(controller.audio().current_time(), 0.0);
        assert_eq!(controller.sink().content(), "");
    }

    #[test]
    fn home_and_end_jump_to_bounds() {
        let (mut controller, _) = ready_controller();
        let ctx = ctx(&[]);

        handle_key_event(press(KeyCode::End), &mut controller, &ctx);
        assert_eq!(controller.audio().current_time(), 5.0);
        assert_eq!(controller.sink().content(), "abcd");

        handle_key_event(press(KeyCode::Home), &mut controller, &ctx);
        assert_eq!(controller.audio().current_time(), 0.0);
        assert_eq!(controller.sink().content(), "");
    }

    #[test]
    fn marker_key_jumps_to_next_marker() {
        let (mut controller, _) = ready_controller();
        let markers = vec![
            MarkerPosition {
                time: 2.5,
                label: "build".to_string(),
            },
            MarkerPosition {
                time: 4.0,
                label: "test".to_string(),
            },
        ];
        let ctx = ctx(&markers);

        handle_key_event(press(KeyCode::Char('m')), &mut controller, &ctx);
        assert_eq!(controller.audio().current_time(), 2.5);
        handle_key_event(press(KeyCode::Char('m')), &mut controller, &ctx);
        assert_eq!(controller.audio().current_time(), 4.0);
        handle_key_event(press(KeyCode::Char('m')), &mut controller, &ctx);
        assert_eq!(controller.audio().current_time(), 4.0);
    }
}
