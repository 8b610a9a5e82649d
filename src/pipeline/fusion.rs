//! Signal fusion
//!
//! Merges the text-derived style analysis with the vocal profile score.
//! Audio takes priority on clarity and confidence; tone is only clamped
//! toward the vocal emotional tone; empathy stays text-only.

use crate::text::StyleAnalysis;
use crate::vocal::{EmotionalTone, VocalProfileScore};

/// Apply the single vocal override pass to a style analysis
///
/// With no vocal score present, the text-only analysis is final and the
/// record is untouched.
pub fn apply(analysis: &mut StyleAnalysis, vocal: Option<&VocalProfileScore>) {
    let Some(score) = vocal else {
        return;
    };

    analysis.clarity_score = score.clarity.score;
    analysis.confidence_score = score.confidence_score;

    match score.emotional_tone {
        EmotionalTone::Agitated => {
            analysis.tone_score = analysis.tone_score.min(4);
            analysis
                .issues
                .push("Voice sounds agitated or stressed".to_string());
        }
        EmotionalTone::Calm => {
            analysis.tone_score = analysis.tone_score.max(7);
            analysis.strengths.push("Calm vocal tone".to_string());
        }
        EmotionalTone::Engaged => {
            analysis
                .strengths
                .push("Engaged and enthusiastic voice".to_string());
        }
        EmotionalTone::Bored | EmotionalTone::Neutral => {}
    }

    analysis.recompute_overall();
    log::debug!(
        "fused vocal signal: clarity {}, confidence {}, tone {}",
        analysis.clarity_score,
        analysis.confidence_score,
        analysis.tone_score
    );
}
