//! Scroll/timing mapping from the beat counter to visible chart steps.
//!
//! Notes travel across the grid one column per beat, spaced five columns
//! apart, so the chart step visible at column `c` on beat `b` is
//! `(GRID_WIDTH - 1 - c + b) / STEP_SPACING`, defined only when that sum is
//! a multiple of the spacing. Visibility is recomputed from the beat on
//! every call instead of shifting a window buffer: any column's content at
//! any beat is a pure function, so there is no incremental state to get
//! out of sync.

use super::chart::{Chart, LANE_COUNT};

/// Grid width in columns. Column 0 is the entry edge, 15 the exit edge.
pub const GRID_WIDTH: u8 = 16;

/// Columns between consecutive chart steps (and beats between arrivals).
pub const STEP_SPACING: u32 = 5;

/// Scoring zone: the five columns nearest the exit edge.
pub const ZONE_START: u8 = 11;
pub const ZONE_CENTRE: u8 = 13;
pub const ZONE_END: u8 = 15;

/// One lane cell of a visible note.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleNote {
    pub column: u8,
    pub lane: u8,
    pub step: usize,
}

/// Chart step occupying `column` on `beat`, if the column carries one.
pub fn step_at_column(chart: &Chart, beat: u32, column: u8) -> Option<usize> {
    let travelled = u32::from(GRID_WIDTH - 1 - column) + beat;
    if travelled % STEP_SPACING != 0 {
        return None;
    }
    let step = (travelled / STEP_SPACING) as usize;
    (step < chart.len()).then_some(step)
}

/// Every note cell visible on `beat`, column by column. Finite, restartable,
/// and pure: yields each `(column, lane)` pair at most once, and only for
/// steps whose lane bit is set.
pub fn visible_notes(chart: &Chart, beat: u32) -> impl Iterator<Item = VisibleNote> + '_ {
    (0..GRID_WIDTH).flat_map(move |column| {
        let step = step_at_column(chart, beat, column);
        (0..LANE_COUNT).filter_map(move |lane| {
            let step = step?;
            chart
                .has_note(step, lane)
                .then_some(VisibleNote { column, lane, step })
        })
    })
}

/// Step currently inside the scoring zone, with its column. The five-column
/// spacing guarantees at most one zone column maps to a step on any beat.
pub fn zone_step(chart: &Chart, beat: u32) -> Option<(usize, u8)> {
    (ZONE_START..=ZONE_END).find_map(|col| step_at_column(chart, beat, col).map(|s| (s, col)))
}

/// Step sitting on the exit column, about to leave the grid on the next
/// advance.
pub fn exit_step(chart: &Chart, beat: u32) -> Option<usize> {
    step_at_column(chart, beat, ZONE_END)
}

/// Chart step previewed as a ghost at the entry column: the next step with
/// any note beyond the one about to scroll in. `None` once the chart tail
/// has fully entered the grid.
pub fn preview_step(chart: &Chart, beat: u32) -> Option<usize> {
    let entering = ((u32::from(GRID_WIDTH) + beat) / STEP_SPACING) as usize;
    if entering >= chart.len() {
        return None;
    }
    chart.next_note_after(entering)
}

/// Beat on which the round ends. The last chart step needs
/// `STEP_SPACING * len` beats to cross the exit column, less the
/// `GRID_WIDTH - 1` head start from spawning at the entry edge. Saturates
/// at zero for charts shorter than the grid.
pub fn terminal_beat(chart: &Chart) -> u32 {
    (STEP_SPACING * chart.len() as u32).saturating_sub(u32::from(GRID_WIDTH) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    static TWO_STEPS: Chart = Chart::new(&[0x00, 0x05]);

    #[test]
    fn step_reaches_each_zone_column_on_consecutive_beats() {
        // Step 1 walks the zone from edge to exit as the beat advances.
        assert_eq!(step_at_column(&TWO_STEPS, 1, ZONE_START), Some(1));
        assert_eq!(step_at_column(&TWO_STEPS, 3, ZONE_CENTRE), Some(1));
        assert_eq!(step_at_column(&TWO_STEPS, 5, ZONE_END), Some(1));
        assert_eq!(step_at_column(&TWO_STEPS, 2, ZONE_CENTRE), None);
    }

    #[test]
    fn zone_holds_at_most_one_step() {
        for beat in 0..40 {
            let hits = (ZONE_START..=ZONE_END)
                .filter(|&c| step_at_column(&TWO_STEPS, beat, c).is_some())
                .count();
            assert!(hits <= 1, "beat {beat} mapped {hits} zone columns");
        }
    }

    #[test]
    fn visible_notes_carries_every_set_lane() {
        let cells: Vec<_> = visible_notes(&TWO_STEPS, 3).collect();
        // 0x05 = lanes 0 and 2, both at the centre column on beat 3.
        assert_eq!(
            cells,
            vec![
                VisibleNote { column: 13, lane: 0, step: 1 },
                VisibleNote { column: 13, lane: 2, step: 1 },
            ]
        );
    }

    #[test]
    fn terminal_beat_saturates_for_short_charts() {
        assert_eq!(terminal_beat(&TWO_STEPS), 0);
    }
}
