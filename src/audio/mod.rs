//! Audio input module
//!
//! Provides the sample buffer type, multi-format decoding to the canonical
//! mono representation, and the DSP primitives used by feature extraction.

pub mod decode;
pub mod dsp;

pub use decode::{AudioDecoder, DecodedAudio, TempWav, ACCEPTED_EXTENSIONS};
pub use dsp::{compute_rms, frame_rms, frame_zcr, split_voiced};

/// Audio sample buffer
///
/// Mono samples normalized to [-1, 1]. Owned by a single analysis call
/// and never persisted.
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Audio samples (mono, normalized to [-1, 1])
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioData {
    /// Create new audio data
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Get duration in seconds
    pub fn duration(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Get number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
