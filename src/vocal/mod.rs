//! Vocal analysis module
//!
//! Extracts raw delivery statistics from a decoded sample buffer and maps
//! them onto qualitative levels, per-dimension scores, a confidence score,
//! and an emotional-tone label.

pub mod features;
pub mod score;

pub use features::{PitchStats, VocalFeatureExtractor, VocalFeatureProfile};
pub use score::{
    ClarityLevel, EmotionalTone, PaceLevel, PauseLevel, PitchLevel, PitchVariety, VocalProfileScore,
    VocalProfileScorer, VolumeConsistency, VolumeLevel,
};
