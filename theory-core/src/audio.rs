//! Microphone capture feeding fixed-size frames to the analysis
//! pipeline.

use anyhow::{Context, Result, anyhow};
use cpal::SupportedStreamConfigRange;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::Sender;

/// Samples per analysis frame: about 23 ms at 44.1 kHz, with enough lag
/// range for the detector to reach the low strings.
pub const FRAME_SIZE: usize = 1024;

/// Preferred capture rate; the device's nearest supported rate wins.
pub const TARGET_SAMPLE_RATE: u32 = 44_100;

/// Opens the default input device and streams non-overlapping
/// `FRAME_SIZE` frames of mono samples into `sender`.
///
/// The callback only copies samples and hands frames off with `try_send`,
/// dropping them when the consumer falls behind rather than ever blocking
/// the audio thread. Frames that do arrive stay in capture order.
///
/// # Returns
/// The live stream handle, which must be kept alive for capture to
/// continue, and the negotiated sample rate.
pub fn start_capture(sender: Sender<Vec<f32>>) -> Result<(cpal::Stream, u32)> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| anyhow!("no audio input device available"))?;
    log::info!("capturing from input device: {}", device.name()?);

    let configs = device.supported_input_configs()?.collect::<Vec<_>>();
    let config_range = find_supported_config(configs, TARGET_SAMPLE_RATE)
        .ok_or_else(|| anyhow!("no mono f32 input config available"))?;

    let rate = TARGET_SAMPLE_RATE.clamp(
        config_range.min_sample_rate().0,
        config_range.max_sample_rate().0,
    );
    let config = config_range.with_sample_rate(cpal::SampleRate(rate));
    let sample_rate = config.sample_rate().0;
    let config: cpal::StreamConfig = config.into();
    log::info!("negotiated sample rate: {sample_rate} Hz");

    let err_fn = |err| log::error!("audio stream error: {err}");

    // Accumulates callback deliveries until a full frame is ready.
    let mut pending: Vec<f32> = Vec::with_capacity(FRAME_SIZE * 2);

    let stream = device.build_input_stream(
        &config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            pending.extend_from_slice(data);
            while pending.len() >= FRAME_SIZE {
                let _ = sender.try_send(pending[..FRAME_SIZE].to_vec());
                pending.drain(..FRAME_SIZE);
            }
        },
        err_fn,
        None,
    )?;
    stream.play().context("failed to start the input stream")?;

    Ok((stream, sample_rate))
}

/// Picks the mono f32 input range closest to the target rate. A range
/// containing the target counts as an exact match.
fn find_supported_config(
    configs: Vec<SupportedStreamConfigRange>,
    target_rate: u32,
) -> Option<SupportedStreamConfigRange> {
    configs
        .into_iter()
        .filter(|config| {
            config.channels() == 1 && config.sample_format() == cpal::SampleFormat::F32
        })
        .min_by_key(|config| {
            let min = i64::from(config.min_sample_rate().0);
            let max = i64::from(config.max_sample_rate().0);
            let target = i64::from(target_rate);
            if (min..=max).contains(&target) {
                0
            } else {
                (min - target).abs().min((max - target).abs())
            }
        })
}
