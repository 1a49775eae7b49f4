//! Integration tests driving the transport over parsed recordings

use std::time::Duration;

use super::helpers::fixtures_dir;
use castplay::player::playback::{collect_markers, next_marker_after};
use castplay::player::{
    AudioClock, ManualClock, MemorySink, NullIndicator, Phase, SilentTrack, TransportController,
};
use castplay::AsciicastFile;

type Controller =
    TransportController<SilentTrack<ManualClock>, MemorySink, NullIndicator, ManualClock>;

fn load(name: &str) -> (Controller, ManualClock, AsciicastFile) {
    let cast = AsciicastFile::parse(fixtures_dir().join(name)).unwrap();
    let descriptor = cast.to_descriptor();
    let clock = ManualClock::new();
    let audio = SilentTrack::new(clock.clone(), descriptor.duration);
    let sink = MemorySink::new(descriptor.width, descriptor.height);
    let mut controller =
        TransportController::new(descriptor, audio, sink, NullIndicator::default(), clock.clone());
    controller.tick();
    (controller, clock, cast)
}

fn step(controller: &mut Controller, clock: &ManualClock, millis: u64) {
    clock.advance(Duration::from_millis(millis));
    controller.tick();
}

#[test]
fn plays_recording_to_the_end() {
    let (mut controller, clock, cast) = load("with_markers.cast");
    assert_eq!(controller.phase(), Phase::Paused);
    assert_eq!(controller.duration(), 3.5);

    controller.on_toggle_play_pause();
    controller.tick();
    assert_eq!(controller.sink().content(), "");

    step(&mut controller, &clock, 600);
    assert_eq!(controller.sink().content(), "$ ls\r\n");

    step(&mut controller, &clock, 1000);
    assert_eq!(controller.sink().content(), "$ ls\r\nfile.txt\r\n");

    // Jump to the "done" marker while playing
    let markers = collect_markers(&cast);
    let target = next_marker_after(&markers, controller.audio().current_time())
        .map(|m| m.time)
        .unwrap();
    assert_eq!(target, 3.0);
    controller.seek(target);
    assert_eq!(controller.phase(), Phase::Playing);
    assert_eq!(controller.pending_delay(), None);

    step(&mut controller, &clock, 600);
    assert_eq!(controller.phase(), Phase::Ended);
    assert_eq!(
        controller.sink().content(),
        "$ ls\r\nfile.txt\r\n$ exit\r\n"
    );
    assert_eq!(controller.indicator().value, 3.5);
    assert_eq!(controller.pending_tasks(), 0);

    // Replay starts over from a clean terminal
    controller.on_toggle_play_pause();
    assert_eq!(controller.phase(), Phase::Playing);
    assert_eq!(controller.sink().content(), "");
    assert_eq!(controller.audio().current_time(), 0.0);
}

#[test]
fn pause_keeps_the_remaining_delay() {
    let (mut controller, clock, _) = load("sample_v1.cast");

    controller.play();
    controller.tick();
    step(&mut controller, &clock, 400);

    controller.pause();
    assert_eq!(controller.pending_delay(), Some(Duration::from_millis(600)));
    assert_eq!(controller.pending_tasks(), 0);

    // Time spent paused does not count
    step(&mut controller, &clock, 10_000);
    assert_eq!(controller.sink().content(), "");

    controller.play();
    step(&mut controller, &clock, 500);
    assert_eq!(controller.sink().content(), "");
    step(&mut controller, &clock, 200);
    assert_eq!(controller.sink().content(), "a");
}

#[test]
fn backward_seek_rebuilds_screen() {
    let (mut controller, _, _) = load("sample_v1.cast");

    controller.seek(4.0);
    assert_eq!(controller.sink().content(), "abc");
    let resets = controller.sink().resets();

    controller.seek(1.5);
    assert_eq!(controller.sink().content(), "a");
    assert_eq!(controller.sink().resets(), resets + 1);
    assert_eq!(controller.phase(), Phase::Paused);
    assert_eq!(controller.pending_delay(), Some(Duration::from_millis(500)));
}

#[test]
fn progress_follows_the_clock() {
    let (mut controller, clock, _) = load("sample_v1.cast");

    controller.play();
    for _ in 0..25 {
        step(&mut controller, &clock, 100);
    }

    let shown = controller.indicator().value;
    assert!((shown - 2.5).abs() < 1e-9, "indicator at {}", shown);
    assert_eq!(controller.sink().content(), "ab");
}
