//! CommCoach - Communication Analysis Engine
//!
//! Diagnoses a person's communication style from written text and/or a
//! spoken recording and returns a style classification plus targeted
//! coaching.
//!
//! # Features
//! - Vocal feature extraction (volume, pace, pitch, clarity, pauses)
//!   from raw audio with fixed-threshold scoring
//! - Pattern-based text style classification
//!   (aggressive / passive / assertive / empathetic)
//! - Fusion of audio and text signals into one unified analysis
//! - Deterministic coaching and message-rewrite generation
//! - Relationship-specific communication tips
//!
//! # Example
//! ```no_run
//! use commcoach::{AnalysisConfig, AnalysisRequest, CommunicationAnalyzer};
//!
//! let analyzer = CommunicationAnalyzer::new(AnalysisConfig::default()).unwrap();
//! let request = AnalysisRequest::from_text("You always ignore my suggestions");
//! let outcome = analyzer.analyze(&request).unwrap();
//! ```

// Allow traditional for loops - often clearer for audio DSP code
#![allow(clippy::needless_range_loop)]

pub mod audio;
pub mod coach;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod text;
pub mod vocal;

pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use pipeline::{
    AnalysisOutcome, AnalysisReport, AnalysisRequest, CommunicationAnalyzer, Transcriber,
};

// Re-export the core analysis types
pub use coach::{CoachingResult, Relationship};
pub use text::{Style, StyleAnalysis, TextStyleClassifier};
pub use vocal::{EmotionalTone, VocalFeatureProfile, VocalProfileScore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Canonical sample rate the engine operates on (mono, ASR-friendly)
pub const SAMPLE_RATE: u32 = 16_000;

/// Analysis frame length in samples
pub const FRAME_LENGTH: usize = 1024;

/// Hop length between analysis frames
pub const HOP_LENGTH: usize = 256;
