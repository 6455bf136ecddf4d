//! End-to-end scenarios: raw MCU bytes -> decode -> input state.
//!
//! Mirrors what the panel does every tick, minus the bus: a record that
//! fails validation never reaches `InputState::apply`.

use xsynth_core::config::InputConfig;
use xsynth_core::{InputEvent, InputState};
use xsynth_protocol::{FrameError, InputsFrame, NUM_POTENTIOMETERS, NUM_ROTARIES};

/// Decode raw bytes and apply them, the way the tick loop does.
fn tick(state: &mut InputState, bytes: &[u8]) -> Option<xsynth_core::FrameReport> {
    InputsFrame::decode(bytes).ok().map(|frame| state.apply(&frame))
}

fn centered_frame() -> InputsFrame {
    InputsFrame::new([5, 5], [0; NUM_ROTARIES], [128; NUM_POTENTIOMETERS])
}

#[test]
fn first_frame_seeds_all_channels() {
    let mut state = InputState::new(&InputConfig::default());
    let report = tick(&mut state, &centered_frame().encode()).expect("valid frame");

    assert!(report.seeded);
    for reading in report.analog {
        assert!((reading.value - 0.502).abs() < 0.001);
        assert!(!reading.changed);
    }
    assert!(!report
        .events
        .iter()
        .any(|e| matches!(e, InputEvent::AnalogChanged { .. })));
}

#[test]
fn identical_second_frame_reports_nothing() {
    let mut state = InputState::new(&InputConfig::default());
    tick(&mut state, &centered_frame().encode()).expect("valid frame");

    let report = tick(&mut state, &centered_frame().encode()).expect("valid frame");

    assert!(!report.seeded);
    assert!(report.analog.iter().all(|r| !r.changed));
    assert_eq!(report.rotary_deltas, [0; NUM_ROTARIES]);
    assert!(report.events.is_empty());
}

#[test]
fn checksum_off_by_one_leaves_state_untouched() {
    let mut state = InputState::new(&InputConfig::default());
    tick(&mut state, &centered_frame().encode()).expect("valid frame");
    let before = state.clone();

    let mut moved = InputsFrame::new([1, 2], [9, -9, 3, 0], [0; NUM_POTENTIOMETERS]);
    moved = moved.with_checksum(moved.checksum.wrapping_add(1));
    let bytes = moved.encode();

    assert!(matches!(
        InputsFrame::decode(&bytes),
        Err(FrameError::ChecksumMismatch { .. })
    ));
    assert!(tick(&mut state, &bytes).is_none());
    assert_eq!(state, before);
}

#[test]
fn rotary_rollover_across_frames() {
    let mut state = InputState::new(&InputConfig::default());
    tick(
        &mut state,
        &InputsFrame::new([5, 5], [120, 0, 0, 0], [0; NUM_POTENTIOMETERS]).encode(),
    );

    let report = tick(
        &mut state,
        &InputsFrame::new([5, 5], [-120, 0, 0, 0], [0; NUM_POTENTIOMETERS]).encode(),
    )
    .expect("valid frame");

    assert_eq!(report.rotary_deltas, [16, 0, 0, 0]);
    assert_eq!(
        report.events.as_slice(),
        &[InputEvent::Rotary { channel: 0, delta: 16 }]
    );
}

#[test]
fn rejected_frame_does_not_advance_rotary_history() {
    let mut state = InputState::new(&InputConfig::default());
    tick(
        &mut state,
        &InputsFrame::new([5, 5], [10, 0, 0, 0], [0; NUM_POTENTIOMETERS]).encode(),
    );

    let corrupt = InputsFrame::new([5, 5], [50, 0, 0, 0], [0; NUM_POTENTIOMETERS]).with_checksum(0);
    assert!(tick(&mut state, &corrupt.encode()).is_none());

    let report = tick(
        &mut state,
        &InputsFrame::new([5, 5], [12, 0, 0, 0], [0; NUM_POTENTIOMETERS]).encode(),
    )
    .expect("valid frame");
    assert_eq!(report.rotary_deltas[0], 2);
}

#[test]
fn short_record_is_rejected() {
    let mut state = InputState::new(&InputConfig::default());
    let bytes = centered_frame().encode();
    assert!(tick(&mut state, &bytes[..13]).is_none());
    assert!(!state.is_seeded());
}

#[test]
fn first_frame_off_grid_reports_release() {
    let mut state = InputState::new(&InputConfig::default());
    let frame = InputsFrame::new([0xFF, 0xFF], [0; NUM_ROTARIES], [128; NUM_POTENTIOMETERS]);
    let report = tick(&mut state, &frame.encode()).expect("valid frame");

    assert!(!report.touched);
    assert_eq!(report.selection, (5, 5));
    assert_eq!(report.events.last(), Some(&InputEvent::GridTouch { touched: false }));

    // Staying off the grid reports nothing further
    let report = tick(&mut state, &frame.encode()).expect("valid frame");
    assert!(report.events.is_empty());
}
