//! Key signatures: which accidentals a key carries and where their
//! glyphs sit per clef.

use serde::{Deserialize, Serialize};

use crate::clef::Clef;
use crate::note::{Accidental, AccidentalPreference, Letter, Note, Pitch};
use crate::scale::Scale;

/// The eighteen conventional key spellings. Enharmonic pairs such as
/// C sharp and D flat are distinct keys with distinct signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    C,
    CSharp,
    DFlat,
    D,
    DSharp,
    EFlat,
    E,
    F,
    FSharp,
    GFlat,
    G,
    GSharp,
    AFlat,
    A,
    ASharp,
    BFlat,
    B,
    CFlat,
}

impl Key {
    pub const ALL: [Key; 18] = [
        Key::C,
        Key::CSharp,
        Key::DFlat,
        Key::D,
        Key::DSharp,
        Key::EFlat,
        Key::E,
        Key::F,
        Key::FSharp,
        Key::GFlat,
        Key::G,
        Key::GSharp,
        Key::AFlat,
        Key::A,
        Key::ASharp,
        Key::BFlat,
        Key::B,
        Key::CFlat,
    ];

    /// The tonic spelling this key names.
    pub const fn note(&self) -> Note {
        match self {
            Key::C => Note::natural(Letter::C),
            Key::CSharp => Note::new(Letter::C, Accidental::Sharp),
            Key::DFlat => Note::new(Letter::D, Accidental::Flat),
            Key::D => Note::natural(Letter::D),
            Key::DSharp => Note::new(Letter::D, Accidental::Sharp),
            Key::EFlat => Note::new(Letter::E, Accidental::Flat),
            Key::E => Note::natural(Letter::E),
            Key::F => Note::natural(Letter::F),
            Key::FSharp => Note::new(Letter::F, Accidental::Sharp),
            Key::GFlat => Note::new(Letter::G, Accidental::Flat),
            Key::G => Note::natural(Letter::G),
            Key::GSharp => Note::new(Letter::G, Accidental::Sharp),
            Key::AFlat => Note::new(Letter::A, Accidental::Flat),
            Key::A => Note::natural(Letter::A),
            Key::ASharp => Note::new(Letter::A, Accidental::Sharp),
            Key::BFlat => Note::new(Letter::B, Accidental::Flat),
            Key::B => Note::natural(Letter::B),
            Key::CFlat => Note::new(Letter::C, Accidental::Flat),
        }
    }
}

/// Major keys that carry sharps, in signature order: G major has one
/// sharp, D major two, and so on.
pub const SHARP_MAJOR_KEYS: [Key; 7] = [
    Key::G,
    Key::D,
    Key::A,
    Key::E,
    Key::B,
    Key::FSharp,
    Key::CSharp,
];

pub const FLAT_MAJOR_KEYS: [Key; 7] = [
    Key::F,
    Key::BFlat,
    Key::EFlat,
    Key::AFlat,
    Key::DFlat,
    Key::GFlat,
    Key::CFlat,
];

pub const SHARP_MINOR_KEYS: [Key; 7] = [
    Key::E,
    Key::B,
    Key::FSharp,
    Key::CSharp,
    Key::GSharp,
    Key::DSharp,
    Key::ASharp,
];

pub const FLAT_MINOR_KEYS: [Key; 7] = [
    Key::D,
    Key::G,
    Key::C,
    Key::F,
    Key::BFlat,
    Key::EFlat,
    Key::AFlat,
];

/// Letters that take sharps, in the order the glyphs are written. Flats
/// use the same letters reversed.
pub const SHARP_ORDER: [Letter; 7] = [
    Letter::F,
    Letter::C,
    Letter::G,
    Letter::D,
    Letter::A,
    Letter::E,
    Letter::B,
];

pub const CIRCLE_OF_FIFTHS_MAJOR_SHARP: [Key; 12] = [
    Key::C,
    Key::G,
    Key::D,
    Key::A,
    Key::E,
    Key::B,
    Key::FSharp,
    Key::CSharp,
    Key::AFlat,
    Key::EFlat,
    Key::BFlat,
    Key::F,
];

pub const CIRCLE_OF_FIFTHS_MAJOR_FLAT: [Key; 12] = [
    Key::C,
    Key::G,
    Key::D,
    Key::A,
    Key::E,
    Key::CFlat,
    Key::GFlat,
    Key::DFlat,
    Key::AFlat,
    Key::EFlat,
    Key::BFlat,
    Key::F,
];

pub const CIRCLE_OF_FIFTHS_MINOR_SHARP: [Key; 12] = [
    Key::A,
    Key::E,
    Key::B,
    Key::FSharp,
    Key::CSharp,
    Key::GSharp,
    Key::DSharp,
    Key::ASharp,
    Key::F,
    Key::C,
    Key::G,
    Key::D,
];

pub const CIRCLE_OF_FIFTHS_MINOR_FLAT: [Key; 12] = [
    Key::A,
    Key::E,
    Key::B,
    Key::FSharp,
    Key::CSharp,
    Key::AFlat,
    Key::EFlat,
    Key::BFlat,
    Key::F,
    Key::C,
    Key::G,
    Key::D,
];

/// The circle of fifths for a scale family under a spelling preference.
/// Pickers walk these to enumerate the conventional signatures.
pub fn circle_of_fifths(scale: Scale, preference: AccidentalPreference) -> &'static [Key; 12] {
    match (scale, preference) {
        (Scale::Major, AccidentalPreference::Sharp) => &CIRCLE_OF_FIFTHS_MAJOR_SHARP,
        (Scale::Major, AccidentalPreference::Flat) => &CIRCLE_OF_FIFTHS_MAJOR_FLAT,
        (Scale::Minor(_), AccidentalPreference::Sharp) => &CIRCLE_OF_FIFTHS_MINOR_SHARP,
        (Scale::Minor(_), AccidentalPreference::Flat) => &CIRCLE_OF_FIFTHS_MINOR_FLAT,
    }
}

/// A key signature in context: the clef it is drawn on, the scale family
/// that names it, and the key itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySignature {
    pub clef: Clef,
    pub scale: Scale,
    pub key: Key,
}

impl KeySignature {
    pub fn new(clef: Clef, scale: Scale, key: Key) -> KeySignature {
        KeySignature { clef, scale, key }
    }

    fn membership(&self) -> (&'static [Key; 7], &'static [Key; 7]) {
        match self.scale {
            Scale::Major => (&SHARP_MAJOR_KEYS, &FLAT_MAJOR_KEYS),
            Scale::Minor(_) => (&SHARP_MINOR_KEYS, &FLAT_MINOR_KEYS),
        }
    }

    /// Sharp or flat per the key's membership list; Natural for C major,
    /// A minor, and spellings outside the conventional lists.
    pub fn accidental(&self) -> Accidental {
        let (sharps, flats) = self.membership();
        if sharps.contains(&self.key) {
            Accidental::Sharp
        } else if flats.contains(&self.key) {
            Accidental::Flat
        } else {
            Accidental::Natural
        }
    }

    /// How many accidentals the signature carries.
    fn glyph_count(&self) -> Option<usize> {
        let (sharps, flats) = self.membership();
        sharps
            .iter()
            .position(|key| *key == self.key)
            .or_else(|| flats.iter().position(|key| *key == self.key))
            .map(|position| position + 1)
    }

    /// The signature's accidentals in written order. Empty for natural
    /// signatures.
    pub fn accidentals(&self) -> Vec<Note> {
        let Some(count) = self.glyph_count() else {
            return Vec::new();
        };
        let accidental = self.accidental();
        let letters: Vec<Letter> = match accidental {
            Accidental::Sharp => SHARP_ORDER[..count].to_vec(),
            Accidental::Flat => SHARP_ORDER.iter().rev().copied().take(count).collect(),
            _ => return Vec::new(),
        };
        letters
            .into_iter()
            .map(|letter| Note::new(letter, accidental))
            .collect()
    }

    /// Octave of each glyph row on this clef, outermost glyph first. The
    /// sharp layout zig-zags from the top of the staff; flats, and sharps
    /// on the tenor clef, use the lower row pattern.
    pub fn octave_rows(&self) -> [i32; 7] {
        let base = match self.clef {
            Clef::Treble => 4,
            Clef::Alto | Clef::Tenor => 3,
            Clef::Bass => 2,
        };
        let rows = match self.accidental() {
            Accidental::Flat => [0, 1, 0, 1, 0, 1, 0],
            Accidental::Sharp if self.clef == Clef::Tenor => [0, 1, 0, 1, 0, 1, 0],
            Accidental::Sharp => [1, 1, 1, 1, 0, 1, 0],
            _ => [0; 7],
        };
        rows.map(|row| row + base)
    }

    /// The glyphs as positioned pitches, ready to draw.
    pub fn staff_pitches(&self) -> Vec<Pitch> {
        self.accidentals()
            .into_iter()
            .zip(self.octave_rows())
            .map(|(note, octave)| Pitch::new(note, octave))
            .collect()
    }
}
