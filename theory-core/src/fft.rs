//! Magnitude spectrum of captured frames, for display alongside the
//! detected pitch.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Spectrum computer for fixed-size frames. The FFT plan and the Hann
/// window are built once so per-frame work is copy, window, transform.
pub struct Spectrum {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    frame_size: usize,
    sample_rate: f64,
}

impl Spectrum {
    pub fn new(frame_size: usize, sample_rate: f64) -> Spectrum {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(frame_size);
        Spectrum {
            fft,
            window: hann_window(frame_size),
            frame_size,
            sample_rate,
        }
    }

    /// First half of the magnitude spectrum of one frame, after DC
    /// removal and Hann windowing. Short frames are zero-padded and long
    /// ones truncated, so the output length is always `frame_size / 2`.
    pub fn magnitudes(&self, samples: &[f32]) -> Vec<f32> {
        let mut frame = vec![0.0f32; self.frame_size];
        let copied = samples.len().min(self.frame_size);
        frame[..copied].copy_from_slice(&samples[..copied]);

        remove_dc_offset(&mut frame);
        for (sample, factor) in frame.iter_mut().zip(&self.window) {
            *sample *= factor;
        }

        let mut buffer: Vec<Complex<f32>> = frame
            .into_iter()
            .map(|re| Complex { re, im: 0.0 })
            .collect();
        self.fft.process(&mut buffer);

        buffer
            .iter()
            .take(self.frame_size / 2)
            .map(|bin| bin.norm())
            .collect()
    }

    /// Center frequency of a spectrum bin.
    pub fn bin_frequency(&self, index: usize) -> f64 {
        index as f64 * self.sample_rate / self.frame_size as f64
    }
}

/// Centers the signal around zero so the 0 Hz bin does not swamp the
/// display.
fn remove_dc_offset(signal: &mut [f32]) {
    if signal.is_empty() {
        return;
    }
    let avg = signal.iter().sum::<f32>() / signal.len() as f32;
    if avg.abs() > 1e-6 {
        for sample in signal.iter_mut() {
            *sample -= avg;
        }
    }
}

/// Hann window factors, tapering the frame to zero at both edges to
/// limit spectral leakage.
fn hann_window(n: usize) -> Vec<f32> {
    if n < 2 {
        return vec![1.0; n];
    }
    let n_minus_1 = (n - 1) as f32;
    (0..n)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / n_minus_1).cos()))
        .collect()
}
