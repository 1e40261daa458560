//! Scale step patterns and the generator that spells full runs from any
//! key.

use serde::{Deserialize, Serialize};

use crate::enharmonic::{self, Direction, Step};
use crate::key::Key;
use crate::note::{Letter, Note, Pitch};

/// Minor scale variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinorMode {
    Natural,
    Harmonic,
    Melodic,
}

/// Scale family. Melodic minor is the one form whose descent differs
/// from its ascent played backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    Major,
    Minor(MinorMode),
}

impl Scale {
    pub const ALL: [Scale; 4] = [
        Scale::Major,
        Scale::Minor(MinorMode::Natural),
        Scale::Minor(MinorMode::Harmonic),
        Scale::Minor(MinorMode::Melodic),
    ];

    pub fn ascending_steps(&self) -> [Step; 7] {
        use Step::{Half, Whole, WholeHalf};
        match self {
            Scale::Major => [Whole, Whole, Half, Whole, Whole, Whole, Half],
            Scale::Minor(MinorMode::Natural) => {
                [Whole, Half, Whole, Whole, Half, Whole, Whole]
            }
            Scale::Minor(MinorMode::Harmonic) => {
                [Whole, Half, Whole, Whole, Half, WholeHalf, Half]
            }
            Scale::Minor(MinorMode::Melodic) => {
                [Whole, Half, Whole, Whole, Whole, Whole, Half]
            }
        }
    }

    /// Steps of the descending run, in played order from the top. Melodic
    /// minor descends through the natural-minor shape; every other scale
    /// simply retraces its ascent.
    pub fn descending_steps(&self) -> [Step; 7] {
        use Step::{Half, Whole};
        match self {
            Scale::Minor(MinorMode::Melodic) => {
                [Whole, Whole, Half, Whole, Whole, Half, Whole]
            }
            _ => {
                let mut steps = self.ascending_steps();
                steps.reverse();
                steps
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scale::Major => "Major",
            Scale::Minor(MinorMode::Natural) => "Natural Minor",
            Scale::Minor(MinorMode::Harmonic) => "Harmonic Minor",
            Scale::Minor(MinorMode::Melodic) => "Melodic Minor",
        }
    }
}

/// Which run of the scale to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleOrder {
    Ascending,
    Descending,
    Both,
}

/// Builds the scale as played. Ascending runs start at `start_octave`;
/// descending runs start one octave above it and come back down to the
/// tonic, so `Both` closes on its opening pitch. Lengths are 8, 8 and 15.
pub fn generate_scale(scale: Scale, key: Key, start_octave: i32, order: ScaleOrder) -> Vec<Pitch> {
    let tonic = key.note();
    match order {
        ScaleOrder::Ascending => walk(
            scale.ascending_steps(),
            tonic,
            start_octave,
            Direction::Forward,
        ),
        ScaleOrder::Descending => walk(
            scale.descending_steps(),
            tonic,
            start_octave + 1,
            Direction::Backward,
        ),
        ScaleOrder::Both => {
            let mut run = walk(
                scale.ascending_steps(),
                tonic,
                start_octave,
                Direction::Forward,
            );
            run.pop();
            run.extend(walk(
                scale.descending_steps(),
                tonic,
                start_octave + 1,
                Direction::Backward,
            ));
            run
        }
    }
}

/// One pass through a step pattern. The octave advances when the current
/// letter is B moving forward, or C moving backward, before the step is
/// taken; accidentals play no part in that bookkeeping.
fn walk(steps: [Step; 7], start: Note, start_octave: i32, direction: Direction) -> Vec<Pitch> {
    let mut run = Vec::with_capacity(steps.len() + 1);
    let mut octave = start_octave;
    let mut note = start;
    run.push(Pitch::new(note, octave));
    for step in steps {
        match direction {
            Direction::Forward if note.letter == Letter::B => octave += 1,
            Direction::Backward if note.letter == Letter::C => octave -= 1,
            _ => {}
        }
        note = enharmonic::transpose(note, step, direction);
        run.push(Pitch::new(note, octave));
    }
    run
}
