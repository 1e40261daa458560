//! Equal-temperament mapping from detected frequencies to spelled notes,
//! plus the per-frame analysis pipeline that front-ends consume.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::AnalysisResult;
use crate::fft::Spectrum;
use crate::note::{AccidentalPreference, Note, Pitch};
use crate::yin::YinDetector;

/// Chromatic spellings for candidate enumeration, ascending from C.
const SHARP_SPELLINGS: [Note; 12] = {
    use crate::note::Accidental::Sharp;
    use crate::note::Letter::{A, B, C, D, E, F, G};
    [
        Note::natural(C),
        Note::new(C, Sharp),
        Note::natural(D),
        Note::new(D, Sharp),
        Note::natural(E),
        Note::natural(F),
        Note::new(F, Sharp),
        Note::natural(G),
        Note::new(G, Sharp),
        Note::natural(A),
        Note::new(A, Sharp),
        Note::natural(B),
    ]
};

const FLAT_SPELLINGS: [Note; 12] = {
    use crate::note::Accidental::Flat;
    use crate::note::Letter::{A, B, C, D, E, F, G};
    [
        Note::natural(C),
        Note::new(D, Flat),
        Note::natural(D),
        Note::new(E, Flat),
        Note::natural(E),
        Note::natural(F),
        Note::new(G, Flat),
        Note::natural(G),
        Note::new(A, Flat),
        Note::natural(A),
        Note::new(B, Flat),
        Note::natural(B),
    ]
};

/// Caller-owned tuner session state: everything configurable about how
/// frequencies map to note names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TunerSettings {
    /// Reference frequency assigned to A4, in Hz.
    pub pitch_standard: f64,
    /// Whether ambiguous pitch classes read as sharps or flats.
    pub preference: AccidentalPreference,
}

impl Default for TunerSettings {
    fn default() -> TunerSettings {
        TunerSettings {
            pitch_standard: 440.0,
            preference: AccidentalPreference::Sharp,
        }
    }
}

/// What one detected frequency resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunerReading {
    /// The detected frequency itself, in Hz.
    pub frequency: f64,
    pub note: Note,
    pub octave: i32,
    /// Signed distance from the chosen note's target frequency. Positive
    /// means sharp.
    pub cents: f64,
}

/// Signed cent distance between a measured frequency and a reference.
pub fn cents_between(frequency: f64, reference: f64) -> f64 {
    1200.0 * (frequency / reference).log2()
}

/// Equal-tempered frequency of a pitch under a pitch standard.
pub fn equal_tempered_frequency(pitch: Pitch, pitch_standard: f64) -> f64 {
    pitch_standard * 2.0_f64.powf(pitch.semitones_from_a4() as f64 / 12.0)
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    pitch: Pitch,
    frequency: f64,
}

/// Maps frequencies onto the nearest spelled note under the session
/// settings. The candidate table is rebuilt only when settings change,
/// never per frame.
#[derive(Debug, Clone)]
pub struct Tuner {
    settings: TunerSettings,
    candidates: Vec<Candidate>,
}

impl Tuner {
    /// Octaves the candidate table spans.
    pub const OCTAVES: RangeInclusive<i32> = 0..=7;

    pub fn new(settings: TunerSettings) -> Tuner {
        Tuner {
            settings,
            candidates: build_candidates(settings),
        }
    }

    pub fn settings(&self) -> TunerSettings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: TunerSettings) {
        self.settings = settings;
        self.candidates = build_candidates(settings);
    }

    /// The nearest candidate by cent distance, with the signed deviation
    /// toward it. Ties keep the first candidate in table order, so the
    /// result is reproducible. Degenerate frequencies (zero, negative,
    /// non-finite) resolve to no reading instead of non-finite cents.
    pub fn nearest(&self, frequency: f64) -> Option<TunerReading> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return None;
        }
        // The table is never empty: twelve spellings per octave.
        let mut best = &self.candidates[0];
        let mut best_distance = f64::INFINITY;
        for candidate in &self.candidates {
            let distance = cents_between(frequency, candidate.frequency).abs();
            if distance < best_distance {
                best_distance = distance;
                best = candidate;
            }
        }
        Some(TunerReading {
            frequency,
            note: best.pitch.note,
            octave: best.pitch.octave,
            cents: cents_between(frequency, best.frequency),
        })
    }
}

fn build_candidates(settings: TunerSettings) -> Vec<Candidate> {
    let spellings = match settings.preference {
        AccidentalPreference::Sharp => &SHARP_SPELLINGS,
        AccidentalPreference::Flat => &FLAT_SPELLINGS,
    };
    let mut candidates = Vec::with_capacity(spellings.len() * 8);
    for octave in Tuner::OCTAVES {
        for note in spellings {
            let pitch = Pitch::new(*note, octave);
            candidates.push(Candidate {
                pitch,
                frequency: equal_tempered_frequency(pitch, settings.pitch_standard),
            });
        }
    }
    candidates
}

/// Per-frame analysis pipeline: YIN finds the fundamental, the FFT feeds
/// the display spectrum, and the tuner names the note. One instance
/// serves one capture stream; `process_frame` is called once per frame
/// on whatever thread owns the stream's consumer side.
pub struct Analyzer {
    detector: YinDetector,
    spectrum: Spectrum,
    tuner: Tuner,
}

impl Analyzer {
    pub fn new(sample_rate: u32, frame_size: usize, settings: TunerSettings) -> Analyzer {
        Analyzer {
            detector: YinDetector::new(f64::from(sample_rate), frame_size),
            spectrum: Spectrum::new(frame_size, f64::from(sample_rate)),
            tuner: Tuner::new(settings),
        }
    }

    pub fn settings(&self) -> TunerSettings {
        self.tuner.settings()
    }

    pub fn set_settings(&mut self, settings: TunerSettings) {
        self.tuner.set_settings(settings);
    }

    /// Analyzes one captured frame. A frame with no detectable pitch
    /// still carries its spectrum; only the reading is absent.
    pub fn process_frame(&self, samples: &[f32]) -> AnalysisResult {
        let spectrum = self.spectrum.magnitudes(samples);
        let reading = self.tuner.nearest(self.detector.detect(samples));
        AnalysisResult { reading, spectrum }
    }
}
