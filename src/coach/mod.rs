//! Coaching generation
//!
//! Produces ordered coaching statements from fixed per-style templates,
//! applies deterministic phrase substitutions to rewrite aggressive and
//! passive messages, and looks up relationship-specific tips.

use crate::text::Style;
use crate::vocal::{ClarityLevel, PaceLevel, PauseLevel, PitchVariety, VocalProfileScore, VolumeLevel};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Relationship category for contextual tips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Boss,
    Colleague,
    Partner,
    Family,
    Friend,
}

impl Relationship {
    /// Parse a relationship name; unknown categories yield `None`
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "boss" => Some(Relationship::Boss),
            "colleague" => Some(Relationship::Colleague),
            "partner" => Some(Relationship::Partner),
            "family" => Some(Relationship::Family),
            "friend" => Some(Relationship::Friend),
            _ => None,
        }
    }

    /// Static contextual tip for this relationship
    pub fn tip(&self) -> &'static str {
        match self {
            Relationship::Boss => {
                "With your boss: lead with solutions, not just problems. 'I noticed X, I suggest Y.'"
            }
            Relationship::Colleague => {
                "With colleagues: emphasize collaboration. 'How can we solve this together?'"
            }
            Relationship::Partner => {
                "With your partner: choose calm moments, avoid discussing issues when tired."
            }
            Relationship::Family => {
                "With family: acknowledge their perspective first, then share yours."
            }
            Relationship::Friend => {
                "With friends: be direct but kind. Good friends appreciate honesty."
            }
        }
    }
}

/// Tip for an optional relationship; absent or unknown yields an empty tip
pub fn relationship_tip(relationship: Option<Relationship>) -> &'static str {
    relationship.map(|r| r.tip()).unwrap_or("")
}

/// Terminal coaching artifact
#[derive(Debug, Clone, Serialize)]
pub struct CoachingResult {
    /// Ordered coaching statements
    pub coaching: Vec<String>,
    /// Rewritten message, present only when substitutions changed the text
    pub rewritten_message: Option<String>,
    /// Relationship tip, empty when no category was given
    pub relationship_tip: String,
}

lazy_static! {
    static ref AGGRESSIVE_REWRITES: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?i)\byou always\b").unwrap(),
            "when this happens, I feel",
        ),
        (
            Regex::new(r"(?i)\byou never\b").unwrap(),
            "when this doesn't happen, I feel",
        ),
        (
            Regex::new(r"(?i)\byou should\b").unwrap(),
            "I'd appreciate if you could",
        ),
        (Regex::new(r"(?i)\bwhy didn'?t you\b").unwrap(), "I noticed"),
    ];
    static ref PASSIVE_REWRITES: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\bi guess\b").unwrap(), "I think"),
        (Regex::new(r"(?i)\bmaybe we could\b").unwrap(), "I suggest we"),
        (Regex::new(r"(?i)\bsorry,? but\b").unwrap(), ""),
    ];
}

/// Generates coaching and rewrites from the final style and vocal data
#[derive(Debug, Clone, Default)]
pub struct CoachingGenerator;

impl CoachingGenerator {
    /// Create a generator
    pub fn new() -> Self {
        Self
    }

    /// Produce the coaching result for one analysis
    pub fn generate(
        &self,
        style: Style,
        original: &str,
        vocal: Option<&VocalProfileScore>,
        relationship: Option<Relationship>,
    ) -> CoachingResult {
        let mut coaching = self.style_coaching(style);

        if let Some(score) = vocal {
            let vocal_lines = self.vocal_coaching(score);
            if !vocal_lines.is_empty() {
                coaching.push("Vocal delivery:".to_string());
                coaching.extend(vocal_lines);
            }
        }

        CoachingResult {
            coaching,
            rewritten_message: rewrite_message(style, original),
            relationship_tip: relationship_tip(relationship).to_string(),
        }
    }

    /// Fixed coaching template for the style family
    fn style_coaching(&self, style: Style) -> Vec<String> {
        let lines: &[&str] = if style.is_aggressive() {
            &[
                "Replace 'you always/never' with 'When [situation]...'",
                "Pause three seconds before responding when upset",
                "Focus on the behavior, not the person's character",
                "Use the format: 'I feel [emotion] when [situation] because [reason]'",
            ]
        } else if style == Style::Passive {
            &[
                "Remove qualifiers: turn 'maybe' into a direct statement",
                "Only apologize when you have actually done something wrong",
                "Replace 'I guess' with 'I think' or 'I believe'",
                "Your needs matter - state them clearly",
            ]
        } else if style.is_assertive() {
            &[
                "Excellent work - your 'I' statements are effective",
                "To enhance: add clarifying questions like 'What's your perspective?'",
                "Validate others: 'I hear what you're saying, and...'",
            ]
        } else {
            &[]
        };
        lines.iter().map(|s| s.to_string()).collect()
    }

    /// One coaching line per sub-optimal vocal dimension
    fn vocal_coaching(&self, score: &VocalProfileScore) -> Vec<String> {
        let mut lines = Vec::new();

        match score.volume.level {
            VolumeLevel::Loud => {
                lines.push("Lower your volume slightly to sound less aggressive".to_string())
            }
            VolumeLevel::Soft => {
                lines.push("Speak louder to sound more confident".to_string())
            }
            VolumeLevel::Moderate => {}
        }

        match score.pace.level {
            PaceLevel::Fast => lines
                .push("Slow down your speech and take breaths between sentences".to_string()),
            PaceLevel::Slow => lines
                .push("Increase your pace slightly to maintain listener engagement".to_string()),
            PaceLevel::Moderate => {}
        }

        if score.pitch.variety == PitchVariety::Monotone {
            lines.push("Vary your pitch and emphasize key words for impact".to_string());
        }

        if score.clarity.level == ClarityLevel::Unclear {
            lines.push("Enunciate clearly and open your mouth more when speaking".to_string());
        }

        match score.pauses.level {
            PauseLevel::ManyLong => {
                lines.push("Reduce long pauses by preparing your thoughts beforehand".to_string())
            }
            PauseLevel::Few => {
                lines.push("Add strategic pauses to let ideas sink in".to_string())
            }
            PauseLevel::Natural => {}
        }

        lines
    }
}

/// Apply the deterministic substitutions for aggressive/passive styles
///
/// Returns `None` when the style has no rewrite rules or no substitution
/// changed the text.
pub fn rewrite_message(style: Style, text: &str) -> Option<String> {
    let rules: &[(Regex, &'static str)] = if style.is_aggressive() {
        &AGGRESSIVE_REWRITES
    } else if style == Style::Passive {
        &PASSIVE_REWRITES
    } else {
        return None;
    };

    let mut rewritten = text.to_string();
    for (regex, replacement) in rules {
        rewritten = regex.replace_all(&rewritten, *replacement).into_owned();
    }

    if rewritten == text {
        None
    } else {
        Some(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VocalThresholds;
    use crate::text::TextStyleClassifier;
    use crate::vocal::features::{PitchStats, VocalFeatureProfile};
    use crate::vocal::VocalProfileScorer;

    fn vocal_score(profile: &VocalFeatureProfile) -> VocalProfileScore {
        VocalProfileScorer::new(VocalThresholds::default()).score(profile)
    }

    fn base_profile() -> VocalFeatureProfile {
        VocalFeatureProfile {
            duration_seconds: 5.0,
            mean_rms: 0.08,
            rms_std: 0.02,
            onset_rate: 3.0,
            pitch: Some(PitchStats {
                mean_hz: 180.0,
                std_hz: 80.0,
            }),
            zcr_mean: 0.2,
            pause_count: 3,
            mean_pause_seconds: 0.8,
        }
    }

    #[test]
    fn test_aggressive_rewrite_starts_with_feeling_opener() {
        let rewritten =
            rewrite_message(Style::Aggressive, "You always ignore my suggestions").unwrap();
        assert!(rewritten.starts_with("when this happens, I feel"));
    }

    #[test]
    fn test_aggressive_rewrite_no_longer_aggressive() {
        let classifier = TextStyleClassifier::new();
        let original = "You always interrupt me and you never apologize";
        let analysis = classifier.classify(original);
        assert_eq!(analysis.style, Style::Aggressive);

        let rewritten = rewrite_message(analysis.style, original).unwrap();
        let reclassified = classifier.classify(&rewritten);
        assert_ne!(reclassified.style, Style::Aggressive);
    }

    #[test]
    fn test_passive_rewrite() {
        let rewritten = rewrite_message(
            Style::Passive,
            "Sorry, but I guess maybe we could try another approach",
        )
        .unwrap();
        assert!(rewritten.contains("I think"));
        assert!(rewritten.contains("I suggest we"));
        assert!(!rewritten.to_lowercase().contains("sorry, but"));
    }

    #[test]
    fn test_no_rewrite_for_assertive_or_neutral() {
        assert!(rewrite_message(Style::Assertive, "I think this works").is_none());
        assert!(rewrite_message(Style::Neutral, "The meeting is at three").is_none());
    }

    #[test]
    fn test_no_rewrite_when_nothing_matches() {
        // Aggressive via "you need to", which has no substitution rule
        assert!(rewrite_message(Style::SomewhatAggressive, "you need to stop").is_none());
    }

    #[test]
    fn test_style_templates() {
        let coach = CoachingGenerator::new();

        let aggressive = coach.generate(Style::Aggressive, "x", None, None);
        assert_eq!(aggressive.coaching.len(), 4);
        assert!(aggressive.coaching[0].contains("you always/never"));

        let somewhat = coach.generate(Style::SomewhatAggressive, "x", None, None);
        assert_eq!(somewhat.coaching, aggressive.coaching);

        let passive = coach.generate(Style::Passive, "x", None, None);
        assert_eq!(passive.coaching.len(), 4);

        let assertive = coach.generate(Style::Assertive, "x", None, None);
        assert_eq!(assertive.coaching.len(), 3);
        let empathetic = coach.generate(Style::AssertiveEmpathetic, "x", None, None);
        assert_eq!(empathetic.coaching, assertive.coaching);

        let neutral = coach.generate(Style::Neutral, "x", None, None);
        assert!(neutral.coaching.is_empty());
    }

    #[test]
    fn test_vocal_coaching_only_for_suboptimal_dimensions() {
        let coach = CoachingGenerator::new();

        // Everything optimal: moderate volume and pace, expressive pitch,
        // clear enunciation, natural pauses
        let score = vocal_score(&base_profile());
        let result = coach.generate(Style::Neutral, "x", Some(&score), None);
        assert!(result.coaching.is_empty());

        // Every dimension sub-optimal yields the header plus five lines
        let mut profile = base_profile();
        profile.mean_rms = 0.2;
        profile.onset_rate = 5.0;
        profile.pitch = Some(PitchStats {
            mean_hz: 180.0,
            std_hz: 10.0,
        });
        profile.zcr_mean = 0.01;
        profile.mean_pause_seconds = 2.0;
        let score = vocal_score(&profile);
        let result = coach.generate(Style::Neutral, "x", Some(&score), None);
        assert_eq!(result.coaching.len(), 6);
        assert_eq!(result.coaching[0], "Vocal delivery:");
    }

    #[test]
    fn test_vocal_coaching_appended_after_style_coaching() {
        let coach = CoachingGenerator::new();
        let mut profile = base_profile();
        profile.mean_rms = 0.02;
        let score = vocal_score(&profile);

        let result = coach.generate(Style::Aggressive, "x", Some(&score), None);
        assert_eq!(result.coaching.len(), 4 + 2);
        assert_eq!(result.coaching[4], "Vocal delivery:");
        assert!(result.coaching[5].contains("Speak louder"));
    }

    #[test]
    fn test_relationship_tips() {
        assert!(Relationship::Boss.tip().contains("boss"));
        assert_eq!(Relationship::parse("Partner"), Some(Relationship::Partner));
        assert_eq!(Relationship::parse("stranger"), None);
        assert_eq!(relationship_tip(None), "");
        assert!(relationship_tip(Some(Relationship::Friend)).contains("direct but kind"));
    }
}
