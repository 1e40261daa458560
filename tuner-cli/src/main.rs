//! # Terminal tuner front end
//!
//! Captures the default input device, runs every frame through the
//! analysis pipeline on a dedicated worker thread, and renders a live
//! one-line meter. With `--note` the meter reads against a fixed target
//! pitch instead of the nearest note.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result, bail};
use cpal::traits::StreamTrait;
use crossbeam_channel::{Receiver, Sender};
use theory_core::AnalysisResult;
use theory_core::audio::{self, FRAME_SIZE};
use theory_core::note::{AccidentalPreference, Pitch};
use theory_core::tuning::{Analyzer, TunerSettings, cents_between, equal_tempered_frequency};

/// Session settings live next to the binary unless `--config` says
/// otherwise.
const SETTINGS_PATH: &str = "tuner_settings.json";

/// Full swing of the meter, in cents either side of the target.
const METER_SPAN_CENTS: f64 = 50.0;
/// Odd, so the in-tune mark sits on the exact center column.
const METER_WIDTH: usize = 41;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    if cli.help {
        print_usage();
        return Ok(());
    }

    let mut settings = load_settings(&cli.config)?;
    if let Some(standard) = cli.standard {
        settings.pitch_standard = standard;
    }
    if let Some(preference) = cli.preference {
        settings.preference = preference;
    }
    save_settings(&cli.config, settings)?;
    log::info!(
        "tuner starting: A4 = {} Hz, {} spellings",
        settings.pitch_standard,
        match settings.preference {
            AccidentalPreference::Sharp => "sharp",
            AccidentalPreference::Flat => "flat",
        }
    );

    let target = cli
        .target
        .map(|pitch| (pitch, equal_tempered_frequency(pitch, settings.pitch_standard)));

    let (analysis_rx, shutdown_tx, worker) = spawn_worker(settings);

    // One detached thread turns the next Enter press into a quit signal.
    let (quit_tx, quit_rx) = crossbeam_channel::bounded::<()>(1);
    thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        let _ = quit_tx.send(());
    });

    match target {
        Some((pitch, frequency)) => {
            println!("Tuning against {pitch} at {frequency:.2} Hz. Press Enter to quit.");
        }
        None => println!("Listening. Press Enter to quit."),
    }

    let mut stdout = std::io::stdout();
    loop {
        crossbeam_channel::select! {
            recv(analysis_rx) -> msg => match msg {
                Ok(result) => {
                    let line = match target {
                        Some((pitch, frequency)) => format_manual(&result, pitch, frequency),
                        None => format_reading(&result),
                    };
                    print!("\r{line:<78}");
                    stdout.flush()?;
                }
                Err(_) => break,
            },
            recv(quit_rx) -> _ => break,
        }
    }
    println!();

    let _ = shutdown_tx.send(());
    if worker.join().is_err() {
        bail!("audio worker panicked");
    }
    Ok(())
}

/// Spawns the audio worker: capture starts inside the thread so the
/// stream handle never crosses threads, and every received frame is
/// analyzed and forwarded until shutdown.
fn spawn_worker(
    settings: TunerSettings,
) -> (Receiver<AnalysisResult>, Sender<()>, thread::JoinHandle<()>) {
    let (analysis_tx, analysis_rx) = crossbeam_channel::unbounded();
    let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);

    let handle = thread::spawn(move || {
        let (frame_tx, frame_rx) = crossbeam_channel::unbounded::<Vec<f32>>();
        let (stream, sample_rate) = match audio::start_capture(frame_tx) {
            Ok(capture) => capture,
            Err(err) => {
                log::error!("could not start audio capture: {err:#}");
                return;
            }
        };
        let analyzer = Analyzer::new(sample_rate, FRAME_SIZE, settings);

        loop {
            crossbeam_channel::select! {
                recv(frame_rx) -> frame => match frame {
                    Ok(frame) => {
                        if analysis_tx.send(analyzer.process_frame(&frame)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                recv(shutdown_rx) -> _ => break,
            }
        }

        if let Err(err) = stream.pause() {
            log::error!("error pausing stream: {err}");
        }
        drop(stream);
    });

    (analysis_rx, shutdown_tx, handle)
}

// --- Meter rendering ---

/// One meter line for free listening: nearest note, its frequency, and
/// the deviation needle.
fn format_reading(result: &AnalysisResult) -> String {
    match &result.reading {
        Some(reading) => format!(
            "{:<4} {:>7.1} Hz  [{}]  {:+6.1} cents",
            format!("{}{}", reading.note, reading.octave),
            reading.frequency,
            render_meter(reading.cents),
            reading.cents
        ),
        None => idle_line(),
    }
}

/// One meter line against a fixed target pitch. The needle reads the
/// detected frequency against the target, whatever note it resolved to.
fn format_manual(result: &AnalysisResult, target: Pitch, target_frequency: f64) -> String {
    match &result.reading {
        Some(reading) => {
            let cents = cents_between(reading.frequency, target_frequency);
            format!(
                "{:<4} {:>7.1} Hz  [{}]  {:+6.1} cents",
                target.to_string(),
                reading.frequency,
                render_meter(cents),
                cents
            )
        }
        None => idle_line(),
    }
}

fn idle_line() -> String {
    format!(
        "{:<4} {:>7} Hz  [{}]  {:>6} cents",
        "--",
        "--",
        "-".repeat(METER_WIDTH),
        "--"
    )
}

/// Draws the needle on a fixed-width track. Deviations beyond the span
/// pin to the end columns.
fn render_meter(cents: f64) -> String {
    let clamped = cents.clamp(-METER_SPAN_CENTS, METER_SPAN_CENTS);
    let half = (METER_WIDTH / 2) as f64;
    let slot = ((clamped / METER_SPAN_CENTS) * half).round() as i64 + METER_WIDTH as i64 / 2;

    let mut meter = String::with_capacity(METER_WIDTH);
    for column in 0..METER_WIDTH {
        if column as i64 == slot {
            meter.push('|');
        } else if column == METER_WIDTH / 2 {
            meter.push('+');
        } else {
            meter.push('-');
        }
    }
    meter
}

// --- Command line ---

#[derive(Debug)]
struct CliArgs {
    standard: Option<f64>,
    preference: Option<AccidentalPreference>,
    target: Option<Pitch>,
    config: PathBuf,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let help = args.iter().any(|a| a == "--help" || a == "-h");

    let standard = args
        .iter()
        .position(|a| a == "--standard")
        .and_then(|i| args.get(i + 1))
        .map(|s| {
            s.parse::<f64>()
                .with_context(|| format!("--standard expects a frequency in Hz, got {s:?}"))
        })
        .transpose()?;
    if let Some(standard) = standard {
        if !standard.is_finite() || standard <= 0.0 {
            bail!("--standard must be a positive frequency, got {standard}");
        }
    }

    let preference = if args.iter().any(|a| a == "--flat") {
        Some(AccidentalPreference::Flat)
    } else if args.iter().any(|a| a == "--sharp") {
        Some(AccidentalPreference::Sharp)
    } else {
        None
    };

    let target = args
        .iter()
        .position(|a| a == "--note")
        .and_then(|i| args.get(i + 1))
        .map(|s| {
            s.parse::<Pitch>()
                .with_context(|| format!("--note expects a pitch name like A4 or Bb3, got {s:?}"))
        })
        .transpose()?;

    let config = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_PATH));

    Ok(CliArgs {
        standard,
        preference,
        target,
        config,
        help,
    })
}

fn print_usage() {
    println!("Usage: tuner-cli [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --standard <HZ>   Reference frequency for A4 (default 440)");
    println!("  --sharp           Read ambiguous pitches as sharps");
    println!("  --flat            Read ambiguous pitches as flats");
    println!("  --note <NAME>     Tune against a fixed pitch, e.g. A4 or Bb3");
    println!("  --config <PATH>   Settings file location (default {SETTINGS_PATH})");
    println!("  --help            Show this help");
}

// --- Settings persistence ---

/// Loads settings from disk, falling back to defaults when the file does
/// not exist yet.
fn load_settings(path: &Path) -> Result<TunerSettings> {
    if !path.exists() {
        return Ok(TunerSettings::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("could not read settings file {}", path.display()))?;
    let settings = serde_json::from_str(&data)
        .with_context(|| format!("settings file {} is not valid JSON", path.display()))?;
    Ok(settings)
}

fn save_settings(path: &Path, settings: TunerSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(&settings)?;
    fs::write(path, json)
        .with_context(|| format!("could not write settings file {}", path.display()))?;
    Ok(())
}
