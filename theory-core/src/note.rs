//! Spelled notes and octave-qualified pitches, with their semitone and
//! staff arithmetic.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Letter name of a note, cyclic through the seven staff letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Semitone offset from C within one octave.
    pub const fn semitone(&self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Semitone offset from A within the same octave, used for
    /// equal-tempered frequency math anchored at A4.
    pub const fn frequency_position(&self) -> i32 {
        self.semitone() - 9
    }

    /// Position on the staff ladder, 0 for C through 6 for B.
    pub const fn ordinal(&self) -> i32 {
        *self as i32
    }

    pub const fn next(&self) -> Letter {
        match self {
            Letter::C => Letter::D,
            Letter::D => Letter::E,
            Letter::E => Letter::F,
            Letter::F => Letter::G,
            Letter::G => Letter::A,
            Letter::A => Letter::B,
            Letter::B => Letter::C,
        }
    }

    pub const fn prev(&self) -> Letter {
        match self {
            Letter::C => Letter::B,
            Letter::D => Letter::C,
            Letter::E => Letter::D,
            Letter::F => Letter::E,
            Letter::G => Letter::F,
            Letter::A => Letter::G,
            Letter::B => Letter::A,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        }
    }
}

/// Accidental applied to a letter. Ordering follows the semitone offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    pub const ALL: [Accidental; 5] = [
        Accidental::DoubleFlat,
        Accidental::Flat,
        Accidental::Natural,
        Accidental::Sharp,
        Accidental::DoubleSharp,
    ];

    /// Signed semitone offset, -2 through 2.
    pub const fn offset(&self) -> i32 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    pub const fn from_offset(offset: i32) -> Option<Accidental> {
        match offset {
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    /// Symbol as written next to a note name; naturals render as nothing.
    pub fn symbol(&self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "\u{1D12B}",
            Accidental::Flat => "\u{266D}",
            Accidental::Natural => "",
            Accidental::Sharp => "\u{266F}",
            Accidental::DoubleSharp => "\u{1D12A}",
        }
    }

    /// Symbol with the natural sign made explicit, for signature glyphs.
    pub fn glyph(&self) -> &'static str {
        match self {
            Accidental::Natural => "\u{266E}",
            _ => self.symbol(),
        }
    }
}

/// Whether displays and lookup tables favor sharp or flat spellings for
/// the ambiguous pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccidentalPreference {
    #[default]
    Sharp,
    Flat,
}

/// A spelled note: letter plus accidental. Identity is the spelling,
/// not the sounding pitch class, so C sharp and D flat stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl Note {
    pub const fn new(letter: Letter, accidental: Accidental) -> Note {
        Note { letter, accidental }
    }

    pub const fn natural(letter: Letter) -> Note {
        Note::new(letter, Accidental::Natural)
    }

    /// Sounding pitch class in 0..12.
    pub fn semitone_class(&self) -> i32 {
        (self.letter.semitone() + self.accidental.offset()).rem_euclid(12)
    }

    /// Semitone offset from C of the same octave. Deliberately not reduced
    /// mod 12: B sharp is 12 and C flat is -1, which keeps octave
    /// bookkeeping exact in MIDI arithmetic.
    pub const fn midi_reference(&self) -> i32 {
        self.letter.semitone() + self.accidental.offset()
    }

    /// Semitone offset from A of the same octave, same caveat as
    /// `midi_reference`.
    pub const fn frequency_position(&self) -> i32 {
        self.letter.frequency_position() + self.accidental.offset()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.name(), self.accidental.symbol())
    }
}

/// A note fixed to an octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub note: Note,
    pub octave: i32,
}

impl Pitch {
    pub const fn new(note: Note, octave: i32) -> Pitch {
        Pitch { note, octave }
    }

    /// MIDI note number; C4 is 60 and A4 is 69.
    pub const fn midi_number(&self) -> i32 {
        (self.octave + 1) * 12 + self.note.midi_reference()
    }

    /// Diatonic position on the staff ladder, seven per octave, ignoring
    /// the accidental. Drives ledger-line and interval-size math.
    pub const fn staff_position(&self) -> i32 {
        self.octave * 7 + self.note.letter.ordinal()
    }

    /// Signed semitone distance from A4 in equal temperament.
    pub const fn semitones_from_a4(&self) -> i32 {
        self.note.frequency_position() + 12 * (self.octave - 4)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.note, self.octave)
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Pitch) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pitch {
    /// Staff order: octave, then letter, then accidental. B sharp 4 sorts
    /// below C5 even though both sound the same.
    fn cmp(&self, other: &Pitch) -> Ordering {
        self.staff_position()
            .cmp(&other.staff_position())
            .then(self.note.accidental.cmp(&other.note.accidental))
    }
}

static NOTE_NAMES: Lazy<BTreeMap<String, Note>> = Lazy::new(|| {
    let mut map = BTreeMap::new();
    for letter in Letter::ALL {
        for accidental in Accidental::ALL {
            let note = Note::new(letter, accidental);
            let ascii = match accidental {
                Accidental::DoubleFlat => "bb",
                Accidental::Flat => "b",
                Accidental::Natural => "",
                Accidental::Sharp => "#",
                Accidental::DoubleSharp => "##",
            };
            map.insert(format!("{}{}", letter.name(), ascii), note);
            map.insert(note.to_string(), note);
        }
    }
    map
});

/// Error from parsing a pitch name such as `A4` or `C#3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePitchError {
    input: String,
}

impl fmt::Display for ParsePitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a pitch name: {:?}", self.input)
    }
}

impl std::error::Error for ParsePitchError {}

impl FromStr for Pitch {
    type Err = ParsePitchError;

    /// Accepts a letter, an optional accidental in ASCII (`#`, `b`, `##`,
    /// `bb`) or symbol form, then an octave number: `A4`, `C#3`, `Eb5`.
    fn from_str(s: &str) -> Result<Pitch, ParsePitchError> {
        let err = || ParsePitchError {
            input: s.to_string(),
        };
        let split = s
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() || *c == '-')
            .map(|(i, _)| i)
            .ok_or_else(err)?;
        let (name, octave) = s.split_at(split);
        let note = NOTE_NAMES.get(name).copied().ok_or_else(err)?;
        let octave = octave.parse::<i32>().map_err(|_| err())?;
        Ok(Pitch::new(note, octave))
    }
}
