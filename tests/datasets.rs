// Chart dataset tests (native) for the `pixel-hero` crate.
// These exercise the compiled-in note chart and the scroll geometry derived
// from it, avoiding wasm/browser APIs so they run under `cargo test`.

use pixel_hero::NOTE_CHART;
use pixel_hero::game::chart::LANE_COUNT;
use pixel_hero::game::scroll;

#[test]
fn chart_has_expected_length() {
    assert_eq!(NOTE_CHART.len(), 129);
    assert!(!NOTE_CHART.is_empty());
}

#[test]
fn lead_in_step_is_empty() {
    assert_eq!(NOTE_CHART.lanes_at(0), 0);
}

#[test]
fn every_lane_appears_somewhere_in_the_chart() {
    for lane in 0..LANE_COUNT {
        assert!(
            (0..NOTE_CHART.len()).any(|s| NOTE_CHART.has_note(s, lane)),
            "lane {lane} never carries a note"
        );
    }
}

#[test]
fn sustain_markers_are_not_tap_notes() {
    // Step 6 is authored as 0x80: a sustain marker in the high nibble with no
    // tap bit, so the tap engine sees it as empty and scans skip it.
    assert_eq!(NOTE_CHART.lanes_at(6), 0);
    assert_eq!(NOTE_CHART.next_note_after(5), Some(7));
}

#[test]
fn next_note_scan_finds_first_note_and_exhausts() {
    assert_eq!(NOTE_CHART.next_note_after(0), Some(3));
    // Step 121 carries the last tap note of the chart.
    assert!(NOTE_CHART.has_note(121, 0));
    assert_eq!(NOTE_CHART.next_note_after(121), None);
}

#[test]
fn terminal_beat_matches_grid_geometry() {
    // 5 beats per step over 129 steps, less the 15-column head start.
    assert_eq!(scroll::terminal_beat(&NOTE_CHART), 630);
}
