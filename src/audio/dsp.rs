//! Digital Signal Processing primitives
//!
//! Frame-level statistics behind the vocal feature extractor: RMS energy,
//! zero-crossing rate, and voiced-interval segmentation.

/// Compute RMS energy over a whole signal
pub fn compute_rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|x| x * x).sum::<f32>() / signal.len() as f32).sqrt()
}

/// Compute per-frame RMS energy
///
/// The trailing partial frame (shorter than `frame_length`) is included,
/// so short buffers still yield at least one frame.
pub fn frame_rms(signal: &[f32], frame_length: usize, hop_length: usize) -> Vec<f32> {
    frames(signal, frame_length, hop_length)
        .map(compute_rms)
        .collect()
}

/// Compute per-frame zero-crossing rate
///
/// Each value is the fraction of adjacent sample pairs in the frame that
/// change sign, in [0, 1].
pub fn frame_zcr(signal: &[f32], frame_length: usize, hop_length: usize) -> Vec<f32> {
    frames(signal, frame_length, hop_length)
        .map(|frame| {
            if frame.len() < 2 {
                return 0.0;
            }
            let crossings = frame
                .windows(2)
                .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
                .count();
            crossings as f32 / (frame.len() - 1) as f32
        })
        .collect()
}

/// Segment a signal into voiced intervals
///
/// A frame is voiced when its RMS is within `top_db` decibels of the peak
/// frame RMS. Consecutive voiced frames merge into one interval; returned
/// intervals are half-open sample ranges.
pub fn split_voiced(
    signal: &[f32],
    frame_length: usize,
    hop_length: usize,
    top_db: f32,
) -> Vec<(usize, usize)> {
    let rms = frame_rms(signal, frame_length, hop_length);
    let peak = rms.iter().cloned().fold(0.0f32, f32::max);
    if peak <= 0.0 {
        return vec![];
    }

    let threshold = peak * 10f32.powf(-top_db / 20.0);
    let mut intervals = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &energy) in rms.iter().enumerate() {
        if energy > threshold {
            if run_start.is_none() {
                run_start = Some(i);
            }
        } else if let Some(start) = run_start.take() {
            intervals.push(frame_run_to_samples(start, i - 1, frame_length, hop_length, signal.len()));
        }
    }
    if let Some(start) = run_start {
        intervals.push(frame_run_to_samples(
            start,
            rms.len() - 1,
            frame_length,
            hop_length,
            signal.len(),
        ));
    }

    intervals
}

/// Iterate over analysis frames, including trailing partial frames
fn frames<'a>(
    signal: &'a [f32],
    frame_length: usize,
    hop_length: usize,
) -> impl Iterator<Item = &'a [f32]> {
    let len = signal.len();
    (0..len)
        .step_by(hop_length.max(1))
        .map(move |start| &signal[start..(start + frame_length).min(len)])
}

fn frame_run_to_samples(
    first_frame: usize,
    last_frame: usize,
    frame_length: usize,
    hop_length: usize,
    signal_len: usize,
) -> (usize, usize) {
    let start = first_frame * hop_length;
    let end = (last_frame * hop_length + frame_length).min(signal_len);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FRAME_LENGTH, HOP_LENGTH};

    fn sine(freq: f32, sample_rate: u32, duration: f32) -> Vec<f32> {
        let n = (sample_rate as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (2.0 * std::f32::consts::PI * freq * t).sin() * 0.5
            })
            .collect()
    }

    #[test]
    fn test_compute_rms_sine() {
        let signal = sine(440.0, 16_000, 1.0);
        let rms = compute_rms(&signal);
        // Full-scale 0.5 sine has RMS of 0.5 / sqrt(2)
        assert!((rms - 0.3536).abs() < 0.01, "rms = {}", rms);
    }

    #[test]
    fn test_compute_rms_empty() {
        assert_eq!(compute_rms(&[]), 0.0);
    }

    #[test]
    fn test_frame_rms_scales_with_amplitude() {
        let loud = sine(200.0, 16_000, 1.0);
        let quiet: Vec<f32> = loud.iter().map(|s| s * 0.1).collect();

        let loud_mean = mean(&frame_rms(&loud, FRAME_LENGTH, HOP_LENGTH));
        let quiet_mean = mean(&frame_rms(&quiet, FRAME_LENGTH, HOP_LENGTH));
        assert!(loud_mean > quiet_mean * 5.0);
    }

    #[test]
    fn test_frame_zcr_tracks_frequency() {
        let low = sine(100.0, 16_000, 1.0);
        let high = sine(3000.0, 16_000, 1.0);

        let low_zcr = mean(&frame_zcr(&low, FRAME_LENGTH, HOP_LENGTH));
        let high_zcr = mean(&frame_zcr(&high, FRAME_LENGTH, HOP_LENGTH));
        assert!(high_zcr > low_zcr * 5.0, "{} vs {}", high_zcr, low_zcr);
        // ZCR of an f Hz tone is roughly 2f / sample_rate
        assert!((low_zcr - 0.0125).abs() < 0.005, "low_zcr = {}", low_zcr);
    }

    #[test]
    fn test_split_voiced_finds_bursts() {
        let sr = 16_000u32;
        let burst = sine(200.0, sr, 0.3);
        let gap = vec![0.0f32; sr as usize];

        let mut signal = Vec::new();
        signal.extend_from_slice(&burst);
        signal.extend_from_slice(&gap);
        signal.extend_from_slice(&burst);
        signal.extend_from_slice(&gap);
        signal.extend_from_slice(&burst);

        let intervals = split_voiced(&signal, FRAME_LENGTH, HOP_LENGTH, 30.0);
        assert_eq!(intervals.len(), 3, "intervals: {:?}", intervals);
        for (start, end) in &intervals {
            assert!(end > start);
        }
    }

    #[test]
    fn test_split_voiced_silence() {
        let silence = vec![0.0f32; 8000];
        assert!(split_voiced(&silence, FRAME_LENGTH, HOP_LENGTH, 30.0).is_empty());
    }

    fn mean(values: &[f32]) -> f32 {
        values.iter().sum::<f32>() / values.len() as f32
    }
}
