//! Text style analysis module
//!
//! Scans message text against ordered pattern-rule tables and derives a
//! style label with per-dimension scores.

pub mod classify;
pub mod patterns;

pub use classify::{Style, StyleAnalysis, TextSignalSet, TextStyleClassifier};
pub use patterns::{PatternCategory, FILLER_WORDS};
