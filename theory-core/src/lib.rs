// theory-core/src/lib.rs

//! Core music-theory and pitch-analysis engine.
//! This crate covers note arithmetic, enharmonic spelling, scales,
//! intervals, key signatures, and clef geometry, along with the audio
//! capture and YIN analysis pipeline behind the tuner. It is completely
//! headless and contains no terminal or GUI code.

pub mod audio;
pub mod clef;
pub mod enharmonic;
pub mod fft;
pub mod interval;
pub mod key;
pub mod note;
pub mod scale;
pub mod tuning;
pub mod yin;

/// Everything the analysis pipeline produces for one captured frame.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// The nearest spelled note and its deviation, when a pitch was heard.
    pub reading: Option<tuning::TunerReading>,
    /// Linear magnitude spectrum of the frame, for visualization.
    pub spectrum: Vec<f32>,
}
