//! Legal spellings of the twelve semitone classes and letter-aware
//! transposition between them.

use serde::{Deserialize, Serialize};

use crate::note::{Accidental, Letter, Note};

/// Melodic step between adjacent scale degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Half,
    Whole,
    WholeHalf,
}

impl Step {
    pub const fn semitones(&self) -> i32 {
        match self {
            Step::Half => 1,
            Step::Whole => 2,
            Step::WholeHalf => 3,
        }
    }
}

/// Direction of melodic motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

/// Legal spellings for each semitone class, most conventional first.
/// Class 8 is the only one with two entries; the rest have three.
pub const SPELLINGS: [&[Note]; 12] = {
    use Accidental::{DoubleFlat, DoubleSharp, Flat, Natural, Sharp};
    use Letter::{A, B, C, D, E, F, G};
    [
        &[
            Note::new(C, Natural),
            Note::new(B, Sharp),
            Note::new(D, DoubleFlat),
        ],
        &[
            Note::new(C, Sharp),
            Note::new(D, Flat),
            Note::new(B, DoubleSharp),
        ],
        &[
            Note::new(D, Natural),
            Note::new(C, DoubleSharp),
            Note::new(E, DoubleFlat),
        ],
        &[
            Note::new(D, Sharp),
            Note::new(E, Flat),
            Note::new(F, DoubleFlat),
        ],
        &[
            Note::new(E, Natural),
            Note::new(F, Flat),
            Note::new(D, DoubleSharp),
        ],
        &[
            Note::new(F, Natural),
            Note::new(E, Sharp),
            Note::new(G, DoubleFlat),
        ],
        &[
            Note::new(F, Sharp),
            Note::new(G, Flat),
            Note::new(E, DoubleSharp),
        ],
        &[
            Note::new(G, Natural),
            Note::new(F, DoubleSharp),
            Note::new(A, DoubleFlat),
        ],
        &[Note::new(G, Sharp), Note::new(A, Flat)],
        &[
            Note::new(A, Natural),
            Note::new(G, DoubleSharp),
            Note::new(B, DoubleFlat),
        ],
        &[
            Note::new(A, Sharp),
            Note::new(B, Flat),
            Note::new(C, DoubleFlat),
        ],
        &[
            Note::new(B, Natural),
            Note::new(C, Flat),
            Note::new(A, DoubleSharp),
        ],
    ]
};

/// Spellings of a semitone class. `None` only when the class is outside
/// 0..12.
pub fn spellings(semitone_class: i32) -> Option<&'static [Note]> {
    if (0..12).contains(&semitone_class) {
        Some(SPELLINGS[semitone_class as usize])
    } else {
        None
    }
}

/// Moves a note by one scale step and re-spells the result on the next
/// (or previous) letter name. The letter constraint is what keeps scales
/// from repeating or skipping a letter: a whole step up from B must land
/// on some C spelling, never on a B or D spelling. When the shifted class
/// has no spelling on the expected letter the note comes back unchanged.
pub fn transpose(note: Note, step: Step, direction: Direction) -> Note {
    let (target_letter, shift) = match direction {
        Direction::Forward => (note.letter.next(), step.semitones()),
        Direction::Backward => (note.letter.prev(), -step.semitones()),
    };
    let class = (note.semitone_class() + shift).rem_euclid(12);
    SPELLINGS[class as usize]
        .iter()
        .copied()
        .find(|candidate| candidate.letter == target_letter)
        .unwrap_or(note)
}
