//! Named intervals: classifying the gap between two pitches and spelling
//! the pitch an interval lands on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::note::{Accidental, Letter, Note, Pitch};

/// Generic interval size: the letter-name distance plus one, so C to E
/// of any accidental is some kind of third.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalSize {
    Unison = 1,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Octave,
}

impl IntervalSize {
    pub const ALL: [IntervalSize; 8] = [
        IntervalSize::Unison,
        IntervalSize::Second,
        IntervalSize::Third,
        IntervalSize::Fourth,
        IntervalSize::Fifth,
        IntervalSize::Sixth,
        IntervalSize::Seventh,
        IntervalSize::Octave,
    ];

    pub const fn number(&self) -> i32 {
        *self as i32
    }

    pub const fn from_number(number: i32) -> Option<IntervalSize> {
        match number {
            1 => Some(IntervalSize::Unison),
            2 => Some(IntervalSize::Second),
            3 => Some(IntervalSize::Third),
            4 => Some(IntervalSize::Fourth),
            5 => Some(IntervalSize::Fifth),
            6 => Some(IntervalSize::Sixth),
            7 => Some(IntervalSize::Seventh),
            8 => Some(IntervalSize::Octave),
            _ => None,
        }
    }

    /// Semitones of the major or perfect form of this size.
    pub const fn default_semitones(&self) -> i32 {
        match self {
            IntervalSize::Unison => 0,
            IntervalSize::Second => 2,
            IntervalSize::Third => 4,
            IntervalSize::Fourth => 5,
            IntervalSize::Fifth => 7,
            IntervalSize::Sixth => 9,
            IntervalSize::Seventh => 11,
            IntervalSize::Octave => 12,
        }
    }

    /// Qualities a size can legally take. Perfect sizes never take major
    /// or minor; unison and octave take nothing but perfect.
    pub fn qualities(&self) -> &'static [Quality] {
        match self {
            IntervalSize::Unison | IntervalSize::Octave => &[Quality::Perfect],
            IntervalSize::Fourth | IntervalSize::Fifth => {
                &[Quality::Diminished, Quality::Perfect, Quality::Augmented]
            }
            _ => &[
                Quality::Diminished,
                Quality::Minor,
                Quality::Major,
                Quality::Augmented,
            ],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IntervalSize::Unison => "Unison",
            IntervalSize::Second => "Second",
            IntervalSize::Third => "Third",
            IntervalSize::Fourth => "Fourth",
            IntervalSize::Fifth => "Fifth",
            IntervalSize::Sixth => "Sixth",
            IntervalSize::Seventh => "Seventh",
            IntervalSize::Octave => "Octave",
        }
    }
}

/// Interval quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    Diminished,
    Minor,
    Major,
    Perfect,
    Augmented,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::Diminished,
        Quality::Minor,
        Quality::Major,
        Quality::Perfect,
        Quality::Augmented,
    ];

    /// Semitone adjustment against the size's default count. Diminishing
    /// a perfect-class size narrows it by one semitone, a major-class
    /// size by two; the exceptions are part of the interval naming rules.
    pub const fn offset(&self, size: IntervalSize) -> i32 {
        match self {
            Quality::Augmented => 1,
            Quality::Major | Quality::Perfect => 0,
            Quality::Minor => -1,
            Quality::Diminished => match size {
                IntervalSize::Unison
                | IntervalSize::Fourth
                | IntervalSize::Fifth
                | IntervalSize::Octave => -1,
                _ => -2,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Quality::Diminished => "Diminished",
            Quality::Minor => "Minor",
            Quality::Major => "Major",
            Quality::Perfect => "Perfect",
            Quality::Augmented => "Augmented",
        }
    }
}

/// A named simple interval. Only legal quality and size pairings
/// construct, so a value in hand is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    quality: Quality,
    size: IntervalSize,
}

impl Interval {
    pub fn new(quality: Quality, size: IntervalSize) -> Option<Interval> {
        if size.qualities().contains(&quality) {
            Some(Interval { quality, size })
        } else {
            None
        }
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn size(&self) -> IntervalSize {
        self.size
    }

    pub fn semitones(&self) -> i32 {
        self.size.default_semitones() + self.quality.offset(self.size)
    }

    /// Names the interval between two pitches, in either order. `None`
    /// when the letter distance passes an octave or no legal quality
    /// matches the semitone count, as with doubly augmented pairs.
    pub fn between(from: Pitch, to: Pitch) -> Option<Interval> {
        let letters = (to.staff_position() - from.staff_position()).abs();
        let size = IntervalSize::from_number(letters + 1)?;
        let semitones = (to.midi_number() - from.midi_number()).abs();
        size.qualities()
            .iter()
            .copied()
            .find(|quality| size.default_semitones() + quality.offset(size) == semitones)
            .map(|quality| Interval { quality, size })
    }

    /// The pitch this interval reaches above a base. Walks the letter
    /// ladder first, then spells the remaining semitone gap as an
    /// accidental; `None` when no accidental within double-sharp and
    /// double-flat can spell it.
    pub fn above(&self, base: Pitch) -> Option<Pitch> {
        let mut letter = base.note.letter;
        let mut octave = base.octave;
        for _ in 1..self.size.number() {
            letter = letter.next();
            if letter == Letter::C {
                octave += 1;
            }
        }
        let natural = Pitch::new(Note::natural(letter), octave);
        let offset = base.midi_number() + self.semitones() - natural.midi_number();
        let accidental = Accidental::from_offset(offset)?;
        Some(Pitch::new(Note::new(letter, accidental), octave))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quality.name(), self.size.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(letter: Letter, accidental: Accidental, octave: i32) -> Pitch {
        Pitch::new(Note::new(letter, accidental), octave)
    }

    fn natural(letter: Letter, octave: i32) -> Pitch {
        Pitch::new(Note::natural(letter), octave)
    }

    #[test]
    fn only_legal_pairings_construct() {
        assert!(Interval::new(Quality::Major, IntervalSize::Third).is_some());
        assert!(Interval::new(Quality::Diminished, IntervalSize::Fifth).is_some());
        assert!(Interval::new(Quality::Perfect, IntervalSize::Unison).is_some());
        assert!(Interval::new(Quality::Perfect, IntervalSize::Third).is_none());
        assert!(Interval::new(Quality::Major, IntervalSize::Fifth).is_none());
        assert!(Interval::new(Quality::Minor, IntervalSize::Octave).is_none());
        assert!(Interval::new(Quality::Diminished, IntervalSize::Unison).is_none());
    }

    #[test]
    fn diminished_narrows_by_class() {
        for size in [
            IntervalSize::Unison,
            IntervalSize::Fourth,
            IntervalSize::Fifth,
            IntervalSize::Octave,
        ] {
            assert_eq!(Quality::Diminished.offset(size), -1, "{}", size.name());
        }
        for size in [
            IntervalSize::Second,
            IntervalSize::Third,
            IntervalSize::Sixth,
            IntervalSize::Seventh,
        ] {
            assert_eq!(Quality::Diminished.offset(size), -2, "{}", size.name());
        }
        assert_eq!(Quality::Augmented.offset(IntervalSize::Fourth), 1);
        assert_eq!(Quality::Minor.offset(IntervalSize::Third), -1);
        assert_eq!(Quality::Perfect.offset(IntervalSize::Fifth), 0);
    }

    #[test]
    fn classifies_common_intervals() {
        let major_third = Interval::between(natural(Letter::C, 4), natural(Letter::E, 4));
        assert_eq!(major_third, Interval::new(Quality::Major, IntervalSize::Third));

        let tritone = Interval::between(
            natural(Letter::C, 4),
            pitch(Letter::F, Accidental::Sharp, 4),
        );
        assert_eq!(tritone, Interval::new(Quality::Augmented, IntervalSize::Fourth));

        let minor_sixth = Interval::between(natural(Letter::E, 4), natural(Letter::C, 5));
        assert_eq!(minor_sixth, Interval::new(Quality::Minor, IntervalSize::Sixth));

        let octave = Interval::between(natural(Letter::C, 4), natural(Letter::C, 5));
        assert_eq!(octave, Interval::new(Quality::Perfect, IntervalSize::Octave));
    }

    #[test]
    fn direction_does_not_matter() {
        let down = Interval::between(natural(Letter::E, 4), natural(Letter::C, 4));
        assert_eq!(down, Interval::new(Quality::Major, IntervalSize::Third));
    }

    #[test]
    fn unnameable_pairs_are_none() {
        // A doubly augmented second.
        let from_c = Interval::between(
            natural(Letter::C, 4),
            pitch(Letter::D, Accidental::DoubleSharp, 4),
        );
        assert_eq!(from_c, None);

        // An augmented unison is outside the legality table.
        let chromatic = Interval::between(
            natural(Letter::C, 4),
            pitch(Letter::C, Accidental::Sharp, 4),
        );
        assert_eq!(chromatic, None);

        // Past an octave.
        let ninth = Interval::between(natural(Letter::C, 4), natural(Letter::D, 5));
        assert_eq!(ninth, None);
    }

    #[test]
    fn above_spells_the_target() {
        let major_third = Interval::new(Quality::Major, IntervalSize::Third).unwrap();
        assert_eq!(major_third.above(natural(Letter::C, 4)), Some(natural(Letter::E, 4)));

        let augmented_fourth = Interval::new(Quality::Augmented, IntervalSize::Fourth).unwrap();
        assert_eq!(
            augmented_fourth.above(natural(Letter::C, 4)),
            Some(pitch(Letter::F, Accidental::Sharp, 4))
        );

        // The letter ladder forces a flat even from a natural base.
        let diminished_fourth = Interval::new(Quality::Diminished, IntervalSize::Fourth).unwrap();
        assert_eq!(
            diminished_fourth.above(natural(Letter::B, 3)),
            Some(pitch(Letter::E, Accidental::Flat, 4))
        );

        let octave = Interval::new(Quality::Perfect, IntervalSize::Octave).unwrap();
        assert_eq!(
            octave.above(pitch(Letter::A, Accidental::Flat, 3)),
            Some(pitch(Letter::A, Accidental::Flat, 4))
        );
    }

    #[test]
    fn above_fails_past_double_accidentals() {
        let augmented_third = Interval::new(Quality::Augmented, IntervalSize::Third).unwrap();
        assert_eq!(
            augmented_third.above(pitch(Letter::D, Accidental::DoubleSharp, 4)),
            None
        );
    }

    #[test]
    fn between_inverts_above() {
        let bases = [
            natural(Letter::C, 4),
            natural(Letter::G, 3),
            pitch(Letter::B, Accidental::Flat, 4),
            pitch(Letter::F, Accidental::Sharp, 2),
        ];
        for base in bases {
            for size in IntervalSize::ALL {
                for &quality in size.qualities() {
                    let interval = Interval::new(quality, size).unwrap();
                    let Some(target) = interval.above(base) else {
                        continue;
                    };
                    assert_eq!(
                        Interval::between(base, target),
                        Some(interval),
                        "{interval} above {base}"
                    );
                }
            }
        }
    }
}
