//! Status bar rendering for the native player.
//!
//! Displays the transport phase and keyboard shortcuts.

use crate::player::transport::Phase;

/// Label for a transport phase (the play button of a graphical player).
pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Loading => "(Loading)",
        Phase::Paused => "▶ play",
        Phase::Playing => "⏸ pause",
        Phase::Ended => "↻ replay",
    }
}

/// Build the escape sequence that draws the status bar on `row`.
pub fn status_bar_line(width: u16, row: u16, phase: Phase, marker_count: usize) -> String {
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const YELLOW: &str = "\x1b[33m";
    const RESET: &str = "\x1b[0m";

    let mut output = String::with_capacity(256);
    let mut visible_len: usize = 0;

    output.push_str(&format!("\x1b[{};1H", row + 1));

    let label = format!(" {:<10}", phase_label(phase));
    visible_len += label.chars().count();
    output.push_str(WHITE);
    output.push_str(&label);

    if marker_count > 0 {
        let markers = format!("◆{} ", marker_count);
        visible_len += markers.chars().count();
        output.push_str(YELLOW);
        output.push_str(&markers);
    }

    let hints = "space:play/pause  ←/→:seek  home/end  m:marker  q:quit";
    let hints: String = hints
        .chars()
        .take((width as usize).saturating_sub(visible_len))
        .collect();
    visible_len += hints.chars().count();
    output.push_str(DARK_GREY);
    output.push_str(&hints);

    let remaining = (width as usize).saturating_sub(visible_len);
    output.extend(std::iter::repeat(' ').take(remaining));
    output.push_str(RESET);
    output
}
