//! Round controller: owns the beat counter, score, combo, and the per-step
//! resolution table for one play-through of a chart. The controller never
//! draws; the render layer pulls colours from the pure projections at the
//! bottom of this file.

use super::chart::{Chart, LANE_COUNT};
use super::colour::Colour;
use super::judge::{COMBO_BONUS_AT, HitTier, MISS_PENALTY, NoteState, PressOutcome, hit_tone};
use super::scroll::{self, VisibleNote};

pub struct Round {
    chart: &'static Chart,
    beat: u32,
    score: i32,
    combo: u32,
    /// One resolution state per chart step. A step stays visible across
    /// several columns as the beat advances, so outcomes are tracked by step
    /// index, not by column.
    states: Vec<NoteState>,
}

impl Round {
    pub fn new(chart: &'static Chart) -> Self {
        let mut round = Self {
            chart,
            beat: 0,
            score: 0,
            combo: 0,
            states: Vec::new(),
        };
        round.start();
        round
    }

    /// Reset to the start of the round: beat, score, and combo to zero,
    /// every step back to `Unresolved`.
    pub fn start(&mut self) {
        self.beat = 0;
        self.score = 0;
        self.combo = 0;
        self.states.clear();
        self.states.resize(self.chart.len(), NoteState::Unresolved);
    }

    pub fn chart(&self) -> &'static Chart {
        self.chart
    }

    pub fn beat(&self) -> u32 {
        self.beat
    }

    pub fn current_score(&self) -> i32 {
        self.score
    }

    pub fn current_combo(&self) -> u32 {
        self.combo
    }

    pub fn note_state(&self, step: usize) -> NoteState {
        self.states.get(step).copied().unwrap_or_default()
    }

    /// True once the last chart step has scrolled off the grid. Pure query:
    /// only `on_tick` moves the round toward the threshold.
    pub fn is_over(&self) -> bool {
        self.beat >= scroll::terminal_beat(self.chart)
    }

    /// Advance one beat. A note leaving the scoring zone still unresolved is
    /// charged as a miss before the beat moves, so a press arriving after
    /// this call can never reach a note that is already gone.
    pub fn on_tick(&mut self) {
        if let Some(step) = scroll::exit_step(self.chart, self.beat) {
            if self.chart.lanes_at(step) != 0 && self.states[step] == NoteState::Unresolved {
                self.states[step] = NoteState::Missed;
                self.score -= MISS_PENALTY;
                self.combo = 0;
            }
        }
        self.beat += 1;
    }

    /// Resolve a lane press against whatever the scoring zone holds right
    /// now. Exactly one score/combo update happens per call.
    pub fn on_input(&mut self, lane: u8) -> PressOutcome {
        debug_assert!(lane < LANE_COUNT, "lane {lane} out of range");
        if let Some((step, column)) = scroll::zone_step(self.chart, self.beat) {
            if self.chart.has_note(step, lane) {
                match self.states[step] {
                    NoteState::Unresolved => {
                        let tier = HitTier::for_zone_column(column);
                        self.states[step] = NoteState::Hit;
                        self.score += tier.points(self.combo);
                        if tier.extends_combo() {
                            self.combo += 1;
                        }
                        return PressOutcome::Hit {
                            step,
                            column,
                            tier,
                            tone: hit_tone(lane, column),
                        };
                    }
                    NoteState::Hit => {
                        self.score -= MISS_PENALTY;
                        return PressOutcome::Repeat { step };
                    }
                    // Missed steps are already past the zone; a press that
                    // reaches here is an ordinary whiff.
                    NoteState::Missed => {}
                }
            }
        }
        self.score -= MISS_PENALTY;
        self.combo = 0;
        PressOutcome::Miss
    }

    /// Colour for every visible note cell at the current beat. The renderer
    /// paints these over the zone underlay; it never decides colours itself.
    pub fn note_colours(&self) -> impl Iterator<Item = (VisibleNote, Colour)> + '_ {
        let live = if self.combo >= COMBO_BONUS_AT {
            Colour::Orange
        } else {
            Colour::Red
        };
        scroll::visible_notes(self.chart, self.beat).map(move |note| {
            let colour = match self.note_state(note.step) {
                NoteState::Hit => Colour::Green,
                _ => live,
            };
            (note, colour)
        })
    }

    /// Ghost preview at the entry column: the lanes of the next upcoming
    /// note, shown dimmed one step before it scrolls in. Never scorable.
    pub fn ghost_colours(&self) -> impl Iterator<Item = (u8, Colour)> + 'static {
        let colour = if self.combo >= COMBO_BONUS_AT {
            Colour::DarkOrange
        } else {
            Colour::HalfRed
        };
        let lanes = scroll::preview_step(self.chart, self.beat)
            .map_or(0, |step| self.chart.lanes_at(step));
        (0..LANE_COUNT)
            .filter(move |lane| lanes & (1 << lane) != 0)
            .map(move |lane| (lane, colour))
    }
}
