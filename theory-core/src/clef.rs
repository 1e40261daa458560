//! Staff clefs, plus the ledger-line count and direction for any pitch.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::note::{Letter, Note, Pitch};

/// Staff clef.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clef {
    Treble,
    Bass,
    Alto,
    Tenor,
}

impl Clef {
    pub const ALL: [Clef; 4] = [Clef::Treble, Clef::Bass, Clef::Alto, Clef::Tenor];

    pub fn name(&self) -> &'static str {
        match self {
            Clef::Treble => "Treble",
            Clef::Bass => "Bass",
            Clef::Alto => "Alto",
            Clef::Tenor => "Tenor",
        }
    }

    /// Octave range a picker should offer while this clef is active.
    pub fn preferred_octaves(&self) -> RangeInclusive<i32> {
        match self {
            Clef::Treble => 4..=6,
            Clef::Bass => 2..=4,
            Clef::Alto | Clef::Tenor => 3..=5,
        }
    }

    /// Midpoint of the preferred range, the initial octave for this clef.
    pub fn default_octave(&self) -> i32 {
        let octaves = self.preferred_octaves();
        (octaves.start() + octaves.end()) / 2
    }

    /// Pulls an octave into the preferred range. Applied when the clef
    /// changes under an existing selection.
    pub fn clamp_octave(&self, octave: i32) -> i32 {
        let octaves = self.preferred_octaves();
        octave.clamp(*octaves.start(), *octaves.end())
    }

    /// Highest letter position below the staff still drawn without a
    /// ledger line; anything lower needs them.
    pub fn first_lower_ledger(&self) -> Pitch {
        match self {
            Clef::Treble => Pitch::new(Note::natural(Letter::D), 4),
            Clef::Bass => Pitch::new(Note::natural(Letter::F), 2),
            Clef::Alto => Pitch::new(Note::natural(Letter::E), 3),
            Clef::Tenor => Pitch::new(Note::natural(Letter::B), 2),
        }
    }

    /// Lowest letter position above the staff still drawn without a
    /// ledger line.
    pub fn first_upper_ledger(&self) -> Pitch {
        match self {
            Clef::Treble => Pitch::new(Note::natural(Letter::G), 5),
            Clef::Bass => Pitch::new(Note::natural(Letter::B), 3),
            Clef::Alto => Pitch::new(Note::natural(Letter::A), 4),
            Clef::Tenor => Pitch::new(Note::natural(Letter::G), 4),
        }
    }
}

/// Which side of the staff ledger lines extend toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerDirection {
    Up,
    Down,
}

/// Ledger lines needed to draw a pitch on a clef. Ledger lines sit on
/// every other letter position, so the count is the letter distance past
/// the clef's outermost line-free position, halved and rounded up.
/// Pitches within the staff report `(0, Up)`.
pub fn ledger_lines(pitch: Pitch, clef: Clef) -> (u32, LedgerDirection) {
    let position = pitch.staff_position();
    let above = position - clef.first_upper_ledger().staff_position();
    if above > 0 {
        return (((above + 1) / 2) as u32, LedgerDirection::Up);
    }
    let below = clef.first_lower_ledger().staff_position() - position;
    if below > 0 {
        return (((below + 1) / 2) as u32, LedgerDirection::Down);
    }
    (0, LedgerDirection::Up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Accidental;

    fn natural(letter: Letter, octave: i32) -> Pitch {
        Pitch::new(Note::natural(letter), octave)
    }

    #[test]
    fn default_octaves_sit_mid_range() {
        assert_eq!(Clef::Treble.default_octave(), 5);
        assert_eq!(Clef::Bass.default_octave(), 3);
        assert_eq!(Clef::Alto.default_octave(), 4);
        assert_eq!(Clef::Tenor.default_octave(), 4);
        for clef in Clef::ALL {
            assert!(clef.preferred_octaves().contains(&clef.default_octave()));
        }
    }

    #[test]
    fn clamping_only_moves_out_of_range_octaves() {
        assert_eq!(Clef::Treble.clamp_octave(2), 4);
        assert_eq!(Clef::Treble.clamp_octave(5), 5);
        assert_eq!(Clef::Bass.clamp_octave(6), 4);
        assert_eq!(Clef::Tenor.clamp_octave(3), 3);
    }

    #[test]
    fn pitches_on_the_staff_need_no_ledger_lines() {
        // Top line and bottom line of the treble staff.
        assert_eq!(
            ledger_lines(natural(Letter::F, 5), Clef::Treble),
            (0, LedgerDirection::Up)
        );
        assert_eq!(
            ledger_lines(natural(Letter::E, 4), Clef::Treble),
            (0, LedgerDirection::Up)
        );
        // The hanging positions just outside the lines.
        assert_eq!(
            ledger_lines(natural(Letter::G, 5), Clef::Treble),
            (0, LedgerDirection::Up)
        );
        assert_eq!(
            ledger_lines(natural(Letter::D, 4), Clef::Treble),
            (0, LedgerDirection::Up)
        );
    }

    #[test]
    fn ledger_counts_grow_every_other_position() {
        assert_eq!(
            ledger_lines(natural(Letter::A, 5), Clef::Treble),
            (1, LedgerDirection::Up)
        );
        assert_eq!(
            ledger_lines(natural(Letter::B, 5), Clef::Treble),
            (1, LedgerDirection::Up)
        );
        assert_eq!(
            ledger_lines(natural(Letter::C, 6), Clef::Treble),
            (2, LedgerDirection::Up)
        );
        // Middle C hangs one ledger line under the treble staff.
        assert_eq!(
            ledger_lines(natural(Letter::C, 4), Clef::Treble),
            (1, LedgerDirection::Down)
        );
        assert_eq!(
            ledger_lines(natural(Letter::A, 3), Clef::Treble),
            (2, LedgerDirection::Down)
        );
    }

    #[test]
    fn far_pitches_round_their_ledger_count_up() {
        // Odd letter distances land between lines and still add one.
        assert_eq!(
            ledger_lines(natural(Letter::E, 6), Clef::Treble),
            (3, LedgerDirection::Up)
        );
        assert_eq!(
            ledger_lines(natural(Letter::G, 6), Clef::Treble),
            (4, LedgerDirection::Up)
        );
        assert_eq!(
            ledger_lines(natural(Letter::F, 3), Clef::Treble),
            (3, LedgerDirection::Down)
        );
        assert_eq!(
            ledger_lines(natural(Letter::E, 4), Clef::Bass),
            (2, LedgerDirection::Up)
        );
    }

    #[test]
    fn accidentals_do_not_change_ledger_lines() {
        let c_sharp6 = Pitch::new(Note::new(Letter::C, Accidental::Sharp), 6);
        assert_eq!(ledger_lines(c_sharp6, Clef::Treble), (2, LedgerDirection::Up));
    }

    #[test]
    fn other_clefs_use_their_own_landmarks() {
        // Middle C sits one line above the bass staff.
        assert_eq!(
            ledger_lines(natural(Letter::C, 4), Clef::Bass),
            (1, LedgerDirection::Up)
        );
        assert_eq!(
            ledger_lines(natural(Letter::E, 2), Clef::Bass),
            (1, LedgerDirection::Down)
        );
        assert_eq!(
            ledger_lines(natural(Letter::C, 4), Clef::Alto),
            (0, LedgerDirection::Up)
        );
        assert_eq!(
            ledger_lines(natural(Letter::A, 4), Clef::Tenor),
            (1, LedgerDirection::Up)
        );
    }
}
