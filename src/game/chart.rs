//! Note chart data for the round.
//!
//! A chart is an immutable, fixed-length sequence of steps; each step is a
//! bitmask with one tap-note bit per lane in the low nibble. The high nibble
//! mirrors the lane layout and marks sustained notes in the authored data;
//! the tap engine masks it off, so a step whose byte is e.g. `0x80` carries
//! no playable note. Step 0 is always empty, giving the first note a
//! one-step lead-in before it scrolls onto the grid.

/// Number of input lanes. Each lane occupies two pixel rows on the grid.
pub const LANE_COUNT: u8 = 4;

/// Bits of a step byte that encode tap notes (one per lane).
pub const NOTE_MASK: u8 = 0x0F;

/// Immutable per-step lane bitmasks for one round. Safe to share by
/// reference across every component; nothing mutates it.
pub struct Chart {
    steps: &'static [u8],
}

impl Chart {
    pub const fn new(steps: &'static [u8]) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Tap-note lane bits at `step`. An out-of-range index is a programming
    /// error in the caller's column mapping; debug builds assert, release
    /// builds read an empty step.
    pub fn lanes_at(&self, step: usize) -> u8 {
        debug_assert!(step < self.steps.len(), "step {step} beyond chart end");
        self.steps.get(step).map_or(0, |s| s & NOTE_MASK)
    }

    pub fn has_note(&self, step: usize, lane: u8) -> bool {
        self.lanes_at(step) & (1 << lane) != 0
    }

    /// First step strictly after `step` with any tap note, scanning lazily to
    /// the end of the chart. `None` once the chart is exhausted. Used for the
    /// ghost-note preview at the entry column.
    pub fn next_note_after(&self, step: usize) -> Option<usize> {
        (step + 1..self.steps.len()).find(|&s| self.steps[s] & NOTE_MASK != 0)
    }
}

/// The shipped round: 129 steps across four lanes.
pub static NOTE_CHART: Chart = Chart::new(&NOTE_STEPS);

static NOTE_STEPS: [u8; 129] = [0x00,
    0x00, 0x00, 0x08, 0x08, 0x08, 0x80, 0x04, 0x02,
    0x04, 0x40, 0x08, 0x80, 0x00, 0x00, 0x04, 0x02,
    0x04, 0x40, 0x08, 0x04, 0x40, 0x02, 0x20, 0x01,
    0x10, 0x10, 0x10, 0x10, 0x00, 0x00, 0x02, 0x20,
    0x04, 0x40, 0x08, 0x80, 0x04, 0x40, 0x02, 0x20,
    0x04, 0x40, 0x08, 0x04, 0x40, 0x40, 0x02, 0x20,
    0x04, 0x40, 0x08, 0x04, 0x40, 0x02, 0x20, 0x01,
    0x10, 0x10, 0x10, 0x10, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x08, 0x08, 0x08, 0x80, 0x04, 0x02,
    0x04, 0x40, 0x02, 0x08, 0x80, 0x00, 0x02, 0x01,
    0x04, 0x40, 0x08, 0x80, 0x04, 0x02, 0x20, 0x01,
    0x10, 0x10, 0x12, 0x20, 0x00, 0x00, 0x02, 0x20,
    0x04, 0x40, 0x08, 0x04, 0x40, 0x40, 0x02, 0x20,
    0x04, 0x40, 0x08, 0x04, 0x40, 0x40, 0x02, 0x20,
    0x04, 0x40, 0x08, 0x04, 0x40, 0x40, 0x02, 0x20,
    0x01, 0x10, 0x10, 0x10, 0x00, 0x00, 0x00, 0x00];
