//! Text style classification
//!
//! Counts pattern matches per category, applies the fixed precedence
//! ladder to pick a style label, and derives the four sub-scores.

use crate::text::patterns::{self, PatternCategory, FILLER_PATTERNS};
use crate::{Error, Result};
use serde::Serialize;

/// Communication style verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Style {
    Aggressive,
    SomewhatAggressive,
    Passive,
    Assertive,
    AssertiveEmpathetic,
    Neutral,
}

impl Style {
    /// Label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Style::Aggressive => "AGGRESSIVE",
            Style::SomewhatAggressive => "SOMEWHAT_AGGRESSIVE",
            Style::Passive => "PASSIVE",
            Style::Assertive => "ASSERTIVE",
            Style::AssertiveEmpathetic => "ASSERTIVE_EMPATHETIC",
            Style::Neutral => "NEUTRAL",
        }
    }

    /// True for the aggressive family (full or somewhat)
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Style::Aggressive | Style::SomewhatAggressive)
    }

    /// True for the assertive family (plain or empathetic)
    pub fn is_assertive(&self) -> bool {
        matches!(self, Style::Assertive | Style::AssertiveEmpathetic)
    }
}

/// Pattern-match counts and detected fillers for one message
#[derive(Debug, Clone, Default)]
pub struct TextSignalSet {
    pub aggressive: usize,
    pub passive: usize,
    pub assertive: usize,
    pub empathetic: usize,
    /// Distinct filler vocabulary entries found
    pub fillers: Vec<String>,
    /// Issue text from matched aggressive/passive rules, in rule order
    pub issues: Vec<String>,
    /// Strength text from matched assertive/empathetic rules, in rule order
    pub strengths: Vec<String>,
}

/// Fused analysis record for one message
///
/// Created by the classifier from text alone; `SignalFusion` may override
/// clarity, confidence, and tone once when vocal data is present. All
/// sub-scores live in [0, 10].
#[derive(Debug, Clone, Serialize)]
pub struct StyleAnalysis {
    pub style: Style,
    pub tone_score: u8,
    pub clarity_score: u8,
    pub confidence_score: u8,
    pub empathy_score: u8,
    pub overall_score: u8,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
    pub filler_words: Vec<String>,
}

impl StyleAnalysis {
    /// Recompute the overall score as the rounded mean of the sub-scores
    pub fn recompute_overall(&mut self) {
        let sum = self.tone_score as f32
            + self.clarity_score as f32
            + self.confidence_score as f32
            + self.empathy_score as f32;
        self.overall_score = (sum / 4.0).round() as u8;
    }

    /// Check score invariants
    ///
    /// Violations indicate a programming defect, never a user-facing
    /// condition.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("tone", self.tone_score),
            ("clarity", self.clarity_score),
            ("confidence", self.confidence_score),
            ("empathy", self.empathy_score),
            ("overall", self.overall_score),
        ] {
            if value > 10 {
                return Err(Error::Classification(format!(
                    "{} score {} out of range",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Pattern-based text style classifier
#[derive(Debug, Clone, Default)]
pub struct TextStyleClassifier;

impl TextStyleClassifier {
    /// Create a classifier
    pub fn new() -> Self {
        Self
    }

    /// Scan a message against every rule table
    ///
    /// Each rule contributes at most one match, so repeated phrases do not
    /// inflate counts.
    pub fn scan(&self, text: &str) -> TextSignalSet {
        let lower = text.to_lowercase();
        let mut signals = TextSignalSet::default();

        for rule in patterns::rules_for(PatternCategory::Aggressive) {
            if rule.regex.is_match(&lower) {
                signals.aggressive += 1;
                signals.issues.push(rule.description.to_string());
            }
        }
        for rule in patterns::rules_for(PatternCategory::Passive) {
            if rule.regex.is_match(&lower) {
                signals.passive += 1;
                signals.issues.push(rule.description.to_string());
            }
        }
        for rule in patterns::rules_for(PatternCategory::Assertive) {
            if rule.regex.is_match(&lower) {
                signals.assertive += 1;
                signals.strengths.push(rule.description.to_string());
            }
        }
        for rule in patterns::rules_for(PatternCategory::Empathetic) {
            if rule.regex.is_match(&lower) {
                signals.empathetic += 1;
                signals.strengths.push(rule.description.to_string());
            }
        }

        for (word, regex) in FILLER_PATTERNS.iter() {
            if regex.is_match(&lower) {
                signals.fillers.push((*word).to_string());
            }
        }

        signals
    }

    /// Classify a message into a style analysis
    ///
    /// Precedence, first satisfied branch wins: aggressive >= 2, then
    /// aggressive == 1, then passive >= 2, then assertive >= 2 with
    /// empathetic >= 1, then assertive >= 1, otherwise neutral.
    pub fn classify(&self, text: &str) -> StyleAnalysis {
        let signals = self.scan(text);

        // Neutral defaults
        let mut style = Style::Neutral;
        let mut tone: u8 = 6;
        let mut confidence: u8 = 6;
        let mut empathy: u8 = 5;

        if signals.aggressive >= 2 {
            style = Style::Aggressive;
            tone = 3;
            confidence = 7;
            empathy = 2;
        } else if signals.aggressive == 1 {
            style = Style::SomewhatAggressive;
            tone = 5;
        } else if signals.passive >= 2 {
            style = Style::Passive;
            tone = 5;
            confidence = 3;
        } else if signals.assertive >= 2 && signals.empathetic >= 1 {
            style = Style::AssertiveEmpathetic;
            tone = 9;
            confidence = 8;
            empathy = 8;
        } else if signals.assertive >= 1 {
            style = Style::Assertive;
            tone = 8;
            confidence = 7;
        }

        // Filler words cost clarity, floored at 3
        let clarity = 10u8.saturating_sub(2 * signals.fillers.len() as u8).max(3);

        let mut analysis = StyleAnalysis {
            style,
            tone_score: tone,
            clarity_score: clarity,
            confidence_score: confidence,
            empathy_score: empathy,
            overall_score: 0,
            issues: signals.issues,
            strengths: signals.strengths,
            filler_words: signals.fillers,
        };
        analysis.recompute_overall();

        log::debug!(
            "classified as {} (tone {}, clarity {}, confidence {}, empathy {})",
            analysis.style.label(),
            analysis.tone_score,
            analysis.clarity_score,
            analysis.confidence_score,
            analysis.empathy_score
        );

        analysis
    }
}
