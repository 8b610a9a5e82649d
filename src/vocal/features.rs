//! Vocal feature extraction
//!
//! Computes the five raw delivery statistics from a canonical sample
//! buffer: volume (frame RMS), pace (onset rate), pitch (autocorrelation
//! contour), clarity proxy (zero-crossing rate), and pause timing
//! (voiced-interval segmentation).

use crate::audio::{dsp, AudioData};
use crate::config::AnalysisConfig;
use crate::{Error, Result, FRAME_LENGTH, HOP_LENGTH};
use num_complex::Complex;
use realfft::RealFftPlanner;

/// Pitch search floor in Hz
const PITCH_MIN_HZ: u32 = 50;
/// Pitch search ceiling in Hz
const PITCH_MAX_HZ: u32 = 500;
/// Normalized autocorrelation below which a frame has no pitch estimate
const PITCH_CORR_FLOOR: f64 = 0.3;
/// Frame RMS below which a frame is skipped for pitch estimation
const PITCH_ENERGY_FLOOR: f32 = 0.01;
/// Minimum spacing between detected onsets in seconds
const ONSET_MIN_GAP_SECONDS: f32 = 0.1;

/// Pitch contour statistics over retained estimates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchStats {
    /// Mean pitch in Hz
    pub mean_hz: f32,
    /// Standard deviation of pitch in Hz
    pub std_hz: f32,
}

/// Raw vocal statistics for one sample buffer
///
/// Immutable once computed. `pitch` is `None` when no frame produced a
/// usable estimate (the "unclear" pitch state, not an error).
#[derive(Debug, Clone)]
pub struct VocalFeatureProfile {
    /// Buffer duration in seconds
    pub duration_seconds: f32,
    /// Mean frame RMS energy
    pub mean_rms: f32,
    /// Standard deviation of frame RMS energy
    pub rms_std: f32,
    /// Detected onsets per second
    pub onset_rate: f32,
    /// Pitch statistics over retained contour estimates
    pub pitch: Option<PitchStats>,
    /// Mean zero-crossing rate across frames
    pub zcr_mean: f32,
    /// Number of silent gaps between voiced intervals
    pub pause_count: usize,
    /// Mean pause length in seconds
    pub mean_pause_seconds: f32,
}

/// Computes a [`VocalFeatureProfile`] from a sample buffer
#[derive(Debug, Clone)]
pub struct VocalFeatureExtractor {
    frame_length: usize,
    hop_length: usize,
    min_duration_seconds: f32,
    silence_floor: f32,
    split_top_db: f32,
}

impl Default for VocalFeatureExtractor {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl VocalFeatureExtractor {
    /// Create an extractor from engine configuration
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            frame_length: FRAME_LENGTH,
            hop_length: HOP_LENGTH,
            min_duration_seconds: config.audio.min_duration_seconds,
            silence_floor: config.audio.silence_floor,
            split_top_db: config.vocal.split_top_db,
        }
    }

    /// Extract the vocal feature profile
    ///
    /// Fails for buffers shorter than the minimum analyzable duration and
    /// for buffers that are entirely silent. Pitch estimation failure is
    /// not an error; the profile carries `pitch: None` instead.
    pub fn extract(&self, audio: &AudioData) -> Result<VocalFeatureProfile> {
        let duration = audio.duration();
        if duration < self.min_duration_seconds {
            return Err(Error::AudioTooShort {
                seconds: duration,
                min_seconds: self.min_duration_seconds,
            });
        }

        let rms = dsp::frame_rms(&audio.samples, self.frame_length, self.hop_length);
        let peak = rms.iter().cloned().fold(0.0f32, f32::max);
        if peak < self.silence_floor {
            return Err(Error::SilentAudio);
        }

        let mean_rms = mean(&rms);
        let rms_std = std_dev(&rms, mean_rms);

        let onsets = self.detect_onsets(&audio.samples, audio.sample_rate)?;
        let onset_rate = onsets.len() as f32 / duration;

        let pitch = self.estimate_pitch(&audio.samples, audio.sample_rate);

        let zcr = dsp::frame_zcr(&audio.samples, self.frame_length, self.hop_length);
        let zcr_mean = mean(&zcr);

        let intervals = dsp::split_voiced(
            &audio.samples,
            self.frame_length,
            self.hop_length,
            self.split_top_db,
        );
        if intervals.is_empty() {
            return Err(Error::SilentAudio);
        }
        let voiced_seconds: f32 = intervals
            .iter()
            .map(|(start, end)| (end - start) as f32)
            .sum::<f32>()
            / audio.sample_rate as f32;
        let pause_count = intervals.len() - 1;
        let mean_pause_seconds =
            (duration - voiced_seconds).max(0.0) / pause_count.max(1) as f32;

        log::debug!(
            "features: rms {:.4}, onsets/s {:.2}, pitch {:?}, zcr {:.4}, pauses {}",
            mean_rms,
            onset_rate,
            pitch,
            zcr_mean,
            pause_count
        );

        Ok(VocalFeatureProfile {
            duration_seconds: duration,
            mean_rms,
            rms_std,
            onset_rate,
            pitch,
            zcr_mean,
            pause_count,
            mean_pause_seconds,
        })
    }

    /// Detect acoustic onsets via half-wave rectified spectral flux
    ///
    /// Peak picking uses an adaptive mean + one-standard-deviation
    /// threshold, a local-maximum condition, and a minimum inter-onset
    /// gap. Returns flux frame indices.
    fn detect_onsets(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<usize>> {
        let flux = self.spectral_flux(samples)?;
        if flux.len() < 3 {
            return Ok(vec![]);
        }

        let flux_mean = mean(&flux);
        let threshold = flux_mean + std_dev(&flux, flux_mean);
        let min_gap = ((ONSET_MIN_GAP_SECONDS * sample_rate as f32 / self.hop_length as f32)
            .round() as usize)
            .max(1);

        let mut onsets = Vec::new();
        let mut last: Option<usize> = None;
        for i in 1..flux.len() - 1 {
            let is_peak = flux[i] > threshold && flux[i] >= flux[i - 1] && flux[i] > flux[i + 1];
            if is_peak && last.map_or(true, |l| i - l >= min_gap) {
                onsets.push(i);
                last = Some(i);
            }
        }
        Ok(onsets)
    }

    /// Hann-windowed STFT magnitude flux between consecutive frames
    fn spectral_flux(&self, samples: &[f32]) -> Result<Vec<f32>> {
        let frame = self.frame_length;
        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(frame);
        let window = hann_window(frame);

        let mut input = fft.make_input_vec();
        let mut spectrum: Vec<Complex<f32>> = fft.make_output_vec();
        let mut prev = vec![0.0f32; spectrum.len()];
        let mut flux = Vec::new();
        let mut first = true;

        let mut start = 0;
        while start < samples.len() {
            let end = (start + frame).min(samples.len());
            let chunk = &samples[start..end];
            for i in 0..frame {
                input[i] = if i < chunk.len() {
                    chunk[i] * window[i]
                } else {
                    0.0
                };
            }

            fft.process(&mut input, &mut spectrum)
                .map_err(|e| Error::FeatureExtraction(format!("FFT failed: {}", e)))?;

            let mut rectified = 0.0f32;
            for (i, bin) in spectrum.iter().enumerate() {
                let mag = bin.norm();
                if !first {
                    rectified += (mag - prev[i]).max(0.0);
                }
                prev[i] = mag;
            }
            flux.push(if first { 0.0 } else { rectified });
            first = false;

            start += self.hop_length;
        }

        Ok(flux)
    }

    /// Estimate the pitch contour and summarize retained estimates
    ///
    /// Each voiced frame contributes a normalized-autocorrelation pitch
    /// candidate tagged with the frame RMS as its magnitude. Only
    /// candidates at or above the median magnitude are retained,
    /// suppressing low-confidence estimates.
    fn estimate_pitch(&self, samples: &[f32], sample_rate: u32) -> Option<PitchStats> {
        let min_lag = (sample_rate / PITCH_MAX_HZ) as usize;
        let max_lag = ((sample_rate / PITCH_MIN_HZ) as usize).min(self.frame_length / 2);
        if min_lag == 0 || min_lag >= max_lag {
            return None;
        }

        let mut candidates: Vec<(f32, f32)> = Vec::new();
        let mut start = 0;
        while start + self.frame_length <= samples.len() {
            let frame = &samples[start..start + self.frame_length];
            start += self.hop_length;

            let energy = dsp::compute_rms(frame);
            if energy < PITCH_ENERGY_FLOOR {
                continue;
            }

            if let Some(lag) = frame_pitch_lag(frame, min_lag, max_lag) {
                candidates.push((sample_rate as f32 / lag as f32, energy));
            }
        }

        if candidates.is_empty() {
            return None;
        }

        let mut magnitudes: Vec<f32> = candidates.iter().map(|c| c.1).collect();
        magnitudes.sort_by(f32::total_cmp);
        let median = magnitudes[magnitudes.len() / 2];

        let retained: Vec<f32> = candidates
            .iter()
            .filter(|c| c.1 >= median)
            .map(|c| c.0)
            .collect();
        if retained.is_empty() {
            return None;
        }

        let mean_hz = mean(&retained);
        let std_hz = std_dev(&retained, mean_hz);
        Some(PitchStats { mean_hz, std_hz })
    }
}

/// Find the best pitch period for one frame via normalized autocorrelation
///
/// Applies a sub-multiple correction: when a fraction of the best lag
/// correlates nearly as well, prefer the shorter period. This resolves the
/// octave errors autocorrelation is prone to on strongly periodic frames.
fn frame_pitch_lag(frame: &[f32], min_lag: usize, max_lag: usize) -> Option<usize> {
    let r0: f64 = frame.iter().map(|s| (*s as f64) * (*s as f64)).sum();
    if r0 < 1e-10 {
        return None;
    }

    let mut best_lag = 0usize;
    let mut best_corr = f64::NEG_INFINITY;
    for lag in min_lag..max_lag {
        let corr = normalized_corr(frame, lag, r0);
        if corr > best_corr {
            best_corr = corr;
            best_lag = lag;
        }
    }

    if best_corr < PITCH_CORR_FLOOR {
        return None;
    }

    for divisor in [4, 3, 2] {
        let candidate = best_lag / divisor;
        if candidate >= min_lag && normalized_corr(frame, candidate, r0) > 0.9 * best_corr {
            return Some(candidate);
        }
    }

    Some(best_lag)
}

fn normalized_corr(frame: &[f32], lag: usize, r0: f64) -> f64 {
    let mut corr = 0.0f64;
    let mut norm = 0.0f64;
    for i in 0..frame.len() - lag {
        corr += frame[i] as f64 * frame[i + lag] as f64;
        norm += frame[i + lag] as f64 * frame[i + lag] as f64;
    }
    if norm > 1e-10 {
        corr / (r0 * norm).sqrt()
    } else {
        0.0
    }
}

fn hann_window(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let x = std::f32::consts::PI * i as f32 / len as f32;
            x.sin() * x.sin()
        })
        .collect()
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

fn std_dev(values: &[f32], mean: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32;
    var.sqrt()
}
