//! YIN fundamental-frequency estimation.
//!
//! The classic monophonic pipeline: squared difference function over half
//! the frame, cumulative mean normalized difference, absolute-threshold
//! lag search with a descent to the local minimum, then parabolic
//! interpolation for sub-sample precision.

/// Monophonic pitch detector with fixed per-stream configuration.
///
/// `sample_rate` and `frame_size` describe the capture stream; the
/// detector is immutable once built, so one instance can serve an audio
/// thread for its whole lifetime.
#[derive(Debug, Clone)]
pub struct YinDetector {
    sample_rate: f64,
    frame_size: usize,
    threshold: f32,
}

impl YinDetector {
    pub const DEFAULT_THRESHOLD: f32 = 0.1;

    pub fn new(sample_rate: f64, frame_size: usize) -> YinDetector {
        YinDetector::with_threshold(sample_rate, frame_size, YinDetector::DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(sample_rate: f64, frame_size: usize, threshold: f32) -> YinDetector {
        YinDetector {
            sample_rate,
            frame_size,
            threshold,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Estimates the fundamental frequency of one frame of mono samples.
    ///
    /// # Arguments
    /// * `samples` - One captured frame; only the configured `frame_size`
    ///   is considered.
    ///
    /// # Returns
    /// The detected frequency rounded to whole Hz, or `0.0` when no lag
    /// passes the threshold or the interpolation is undefined. The
    /// sentinel avoids ever handing NaN or infinity to callers.
    pub fn detect(&self, samples: &[f32]) -> f64 {
        let max_tau = self.frame_size / 2;
        if samples.is_empty() || max_tau < 2 {
            return 0.0;
        }

        // Step 1: difference function.
        let mut difference = vec![0.0f32; max_tau];
        for (tau, slot) in difference.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for i in 0..max_tau {
                if i + tau < samples.len() {
                    let delta = samples[i] - samples[i + tau];
                    sum += delta * delta;
                }
            }
            *slot = sum;
        }

        // Step 2: cumulative mean normalized difference. A zero running
        // sum means silence; pinning those lags at 1 keeps them out of
        // the threshold search.
        let mut cmndf = vec![0.0f32; max_tau];
        cmndf[0] = 1.0;
        let mut running_sum = 0.0f32;
        for tau in 1..max_tau {
            running_sum += difference[tau];
            cmndf[tau] = if running_sum > 0.0 {
                difference[tau] * tau as f32 / running_sum
            } else {
                1.0
            };
        }

        // Step 3: first lag under the threshold, then slide down to the
        // local minimum so a noisy leading dip cannot win.
        let mut estimate = 0;
        for tau in 2..max_tau {
            if cmndf[tau] < self.threshold {
                let mut lag = tau;
                while lag + 1 < max_tau && cmndf[lag + 1] < cmndf[lag] {
                    lag += 1;
                }
                estimate = lag;
                break;
            }
        }
        if estimate == 0 || estimate + 1 >= max_tau {
            return 0.0;
        }

        // Step 4: parabolic interpolation over the three values around
        // the winning lag.
        let before = f64::from(cmndf[estimate - 1]);
        let at = f64::from(cmndf[estimate]);
        let after = f64::from(cmndf[estimate + 1]);
        let denominator = 2.0 * (2.0 * at - after - before);
        if denominator.abs() < f64::EPSILON {
            return 0.0;
        }
        let refined = estimate as f64 + (after - before) / denominator;
        if refined <= 0.0 {
            return 0.0;
        }
        (self.sample_rate / refined).round()
    }
}
