//! Fixed LED-style palette shared by the engine and the canvas front-end.

use super::scroll::{ZONE_CENTRE, ZONE_END, ZONE_START};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colour {
    Black,
    Red,
    HalfRed,
    Orange,
    DarkOrange,
    Green,
    Yellow,
    HalfYellow,
    QuartYellow,
}

impl Colour {
    /// Underlay colour marking a scoring-zone column, brightest at the
    /// centre; `None` outside the zone.
    pub fn zone_marker(column: u8) -> Option<Colour> {
        if !(ZONE_START..=ZONE_END).contains(&column) {
            return None;
        }
        Some(match column.abs_diff(ZONE_CENTRE) {
            0 => Colour::Yellow,
            1 => Colour::HalfYellow,
            _ => Colour::QuartYellow,
        })
    }

    /// CSS colour used by the canvas front-end for this palette entry.
    pub fn css(self) -> &'static str {
        match self {
            Colour::Black => "#101010",
            Colour::Red => "#e04040",
            Colour::HalfRed => "#703030",
            Colour::Orange => "#ff9030",
            Colour::DarkOrange => "#8f5512",
            Colour::Green => "#35d03a",
            Colour::Yellow => "#ffd800",
            Colour::HalfYellow => "#8f7d10",
            Colour::QuartYellow => "#55490d",
        }
    }
}
