//! Analysis pipeline orchestration
//!
//! Coordinates decoding, transcription, feature extraction, text
//! classification, signal fusion, and coaching into a single entry point.

mod analyzer;
pub mod fusion;

pub use analyzer::{
    AnalysisOutcome, AnalysisReport, AnalysisRequest, CommunicationAnalyzer, StyleReport,
    StyleScores, Transcriber, UsageGuidance,
};
