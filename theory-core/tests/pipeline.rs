use std::f64::consts::TAU;
use std::thread;

use theory_core::AnalysisResult;
use theory_core::clef::Clef;
use theory_core::key::{
    FLAT_MAJOR_KEYS, FLAT_MINOR_KEYS, KeySignature, SHARP_MAJOR_KEYS, SHARP_MINOR_KEYS,
};
use theory_core::interval::{Interval, Quality};
use theory_core::note::{Accidental, AccidentalPreference, Letter, Note, Pitch};
use theory_core::scale::{MinorMode, Scale, ScaleOrder, generate_scale};
use theory_core::tuning::{Analyzer, TunerSettings, cents_between, equal_tempered_frequency};

const SAMPLE_RATE: u32 = 44_100;
const FRAME: usize = 1024;

fn sine_frame(frequency: f64) -> Vec<f32> {
    (0..FRAME)
        .map(|i| (TAU * frequency * i as f64 / f64::from(SAMPLE_RATE)).sin() as f32 * 0.4)
        .collect()
}

// ── Frame analysis end to end ───────────────────────────────────

#[test]
fn analyzer_reads_a440_sine() {
    let analyzer = Analyzer::new(SAMPLE_RATE, FRAME, TunerSettings::default());
    let result = analyzer.process_frame(&sine_frame(440.0));

    let reading = result.reading.expect("a clean sine should produce a reading");
    assert!(
        (reading.frequency - 440.0).abs() <= 2.0,
        "detected {} Hz, expected about 440",
        reading.frequency
    );
    assert_eq!(reading.note, Note::natural(Letter::A));
    assert_eq!(reading.octave, 4);
    assert!(
        reading.cents.abs() < 10.0,
        "deviation {} cents is too large for a 440 Hz sine",
        reading.cents
    );
    assert_eq!(result.spectrum.len(), FRAME / 2);
}

#[test]
fn flat_preference_spells_b_flat() {
    let settings = TunerSettings {
        pitch_standard: 440.0,
        preference: AccidentalPreference::Flat,
    };
    let analyzer = Analyzer::new(SAMPLE_RATE, FRAME, settings);
    let result = analyzer.process_frame(&sine_frame(466.16));

    let reading = result.reading.expect("a clean sine should produce a reading");
    assert_eq!(reading.note, Note::new(Letter::B, Accidental::Flat));
    assert_eq!(reading.octave, 4);
}

#[test]
fn silent_frame_yields_no_reading() {
    let analyzer = Analyzer::new(SAMPLE_RATE, FRAME, TunerSettings::default());
    let result = analyzer.process_frame(&[0.0; FRAME]);

    assert!(result.reading.is_none(), "silence should not resolve to a note");
    assert_eq!(result.spectrum.len(), FRAME / 2, "spectrum is still produced");
}

// ── Worker-thread topology ──────────────────────────────────────

#[test]
fn worker_thread_preserves_frame_order() {
    let (frame_tx, frame_rx) = crossbeam_channel::unbounded::<Vec<f32>>();
    let (result_tx, result_rx) = crossbeam_channel::unbounded::<AnalysisResult>();

    let analyzer = Analyzer::new(SAMPLE_RATE, FRAME, TunerSettings::default());
    let worker = thread::spawn(move || {
        for frame in frame_rx {
            if result_tx.send(analyzer.process_frame(&frame)).is_err() {
                break;
            }
        }
    });

    // A4, C#5, E5: an arpeggio sent one frame at a time.
    for frequency in [440.0, 554.37, 659.26] {
        frame_tx.send(sine_frame(frequency)).unwrap();
    }
    drop(frame_tx);
    worker.join().unwrap();

    let expected = [
        (Note::natural(Letter::A), 4),
        (Note::new(Letter::C, Accidental::Sharp), 5),
        (Note::natural(Letter::E), 5),
    ];
    for (note, octave) in expected {
        let result = result_rx.recv().expect("one result per frame");
        let reading = result.reading.expect("each sine should resolve");
        assert_eq!(reading.note, note);
        assert_eq!(reading.octave, octave);
    }
    assert!(result_rx.try_recv().is_err(), "no extra results expected");
}

// ── Scales agree with key signatures ────────────────────────────

#[test]
fn major_scales_agree_with_signatures() {
    for key in SHARP_MAJOR_KEYS.into_iter().chain(FLAT_MAJOR_KEYS) {
        let signature = KeySignature::new(Clef::Treble, Scale::Major, key).accidentals();
        for pitch in generate_scale(Scale::Major, key, 4, ScaleOrder::Ascending) {
            if pitch.note.accidental != Accidental::Natural {
                assert!(
                    signature.contains(&pitch.note),
                    "{} major spells {} but its signature lacks it",
                    key.note(),
                    pitch.note
                );
            }
        }
    }
}

#[test]
fn minor_scales_agree_with_signatures() {
    let minor = Scale::Minor(MinorMode::Natural);
    for key in SHARP_MINOR_KEYS.into_iter().chain(FLAT_MINOR_KEYS) {
        let signature = KeySignature::new(Clef::Treble, minor, key).accidentals();
        for pitch in generate_scale(minor, key, 4, ScaleOrder::Ascending) {
            if pitch.note.accidental != Accidental::Natural {
                assert!(
                    signature.contains(&pitch.note),
                    "{} minor spells {} but its signature lacks it",
                    key.note(),
                    pitch.note
                );
            }
        }
    }
}

// ── Scale degrees name the expected intervals ───────────────────

#[test]
fn major_degrees_form_the_usual_intervals() {
    use theory_core::key::Key;

    let expected = [
        Quality::Perfect,
        Quality::Major,
        Quality::Major,
        Quality::Perfect,
        Quality::Perfect,
        Quality::Major,
        Quality::Major,
        Quality::Perfect,
    ];
    for key in Key::ALL {
        let run = generate_scale(Scale::Major, key, 4, ScaleOrder::Ascending);
        let tonic = run[0];
        for (degree, pitch) in run.iter().enumerate() {
            let interval = Interval::between(tonic, *pitch)
                .unwrap_or_else(|| panic!("{} to {} should be nameable", tonic, pitch));
            assert_eq!(interval.size().number(), degree as i32 + 1);
            assert_eq!(
                interval.quality(),
                expected[degree],
                "degree {} of {} major",
                degree + 1,
                key.note()
            );
        }
    }
}

// ── Manual targeting as the front end uses it ───────────────────

#[test]
fn manual_target_deviation() {
    let target: Pitch = "A4".parse().unwrap();
    let reference = equal_tempered_frequency(target, 440.0);
    assert_eq!(reference, 440.0);

    let cents = cents_between(442.0, reference);
    assert!((cents - 7.85).abs() < 0.1, "442 Hz reads {} cents sharp", cents);
}
