//! Hit judgment vocabulary: per-step resolution states, precision tiers
//! inside the scoring zone, and the score/combo deltas they pay out.

use super::scroll::{ZONE_CENTRE, ZONE_END, ZONE_START};

/// Resolution state of one chart step. A step makes at most one transition
/// out of `Unresolved`; `Hit` and `Missed` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoteState {
    #[default]
    Unresolved,
    Hit,
    Missed,
}

/// Combo count at which centre hits start paying the bonus value and the
/// display switches to its celebration palette.
pub const COMBO_BONUS_AT: u32 = 3;

/// Score lost on any miss: a whiffed press, or a note leaving the zone
/// unplayed.
pub const MISS_PENALTY: i32 = 1;

/// Precision tier of a hit, by distance from the zone centre column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTier {
    Edge,
    Near,
    Centre,
}

impl HitTier {
    /// Tier for a column already known to lie inside the scoring zone
    /// (callers get it from `scroll::zone_step`).
    pub fn for_zone_column(column: u8) -> HitTier {
        debug_assert!(
            (ZONE_START..=ZONE_END).contains(&column),
            "column {column} outside scoring zone"
        );
        match column.abs_diff(ZONE_CENTRE) {
            0 => HitTier::Centre,
            1 => HitTier::Near,
            _ => HitTier::Edge,
        }
    }

    /// Points paid for a hit at this tier, given the combo before the hit.
    pub fn points(self, combo: u32) -> i32 {
        match self {
            HitTier::Edge => 1,
            HitTier::Near => 2,
            HitTier::Centre if combo >= COMBO_BONUS_AT => 4,
            HitTier::Centre => 3,
        }
    }

    /// Only centre hits extend the combo; edge and near hits are still hits
    /// but leave it unchanged.
    pub fn extends_combo(self) -> bool {
        matches!(self, HitTier::Centre)
    }
}

/// Feedback tone for a successful hit: pitch follows the lane, pulse width
/// follows where in the zone the note was struck. Data only; synthesis is
/// the embedder's concern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub duty_pct: f32,
}

pub fn hit_tone(lane: u8, column: u8) -> Tone {
    let freq_hz = match lane {
        0 => 523.2511,
        1 => 622.254,
        2 => 698.4565,
        _ => 783.9909,
    };
    let duty_pct = match column {
        11 => 2.0,
        12 => 10.0,
        13 => 50.0,
        14 => 90.0,
        _ => 98.0,
    };
    Tone { freq_hz, duty_pct }
}

/// What a lane press resolved to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PressOutcome {
    /// An unresolved note in the zone was struck.
    Hit {
        step: usize,
        column: u8,
        tier: HitTier,
        tone: Tone,
    },
    /// The zone note for this lane was already struck; the repeat press
    /// costs a point but does not break the combo.
    Repeat { step: usize },
    /// No playable note for this lane anywhere in the zone. Button-mashing
    /// is a penalised miss, never a no-op.
    Miss,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_by_distance_from_centre() {
        assert_eq!(HitTier::for_zone_column(11), HitTier::Edge);
        assert_eq!(HitTier::for_zone_column(12), HitTier::Near);
        assert_eq!(HitTier::for_zone_column(13), HitTier::Centre);
        assert_eq!(HitTier::for_zone_column(14), HitTier::Near);
        assert_eq!(HitTier::for_zone_column(15), HitTier::Edge);
    }

    #[test]
    fn centre_pays_bonus_only_at_combo_threshold() {
        assert_eq!(HitTier::Centre.points(0), 3);
        assert_eq!(HitTier::Centre.points(COMBO_BONUS_AT - 1), 3);
        assert_eq!(HitTier::Centre.points(COMBO_BONUS_AT), 4);
        assert_eq!(HitTier::Edge.points(COMBO_BONUS_AT), 1);
        assert_eq!(HitTier::Near.points(COMBO_BONUS_AT), 2);
    }

    #[test]
    fn tone_tracks_lane_and_column() {
        let t = hit_tone(0, 13);
        assert!((t.freq_hz - 523.2511).abs() < 1e-3);
        assert!((t.duty_pct - 50.0).abs() < f32::EPSILON);
        assert!((hit_tone(3, 11).duty_pct - 2.0).abs() < f32::EPSILON);
        assert!((hit_tone(3, 15).duty_pct - 98.0).abs() < f32::EPSILON);
    }
}
