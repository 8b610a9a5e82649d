//! Vocal profile scoring
//!
//! Maps a raw [`VocalFeatureProfile`] onto qualitative levels, fixed
//! per-dimension scores, an aggregate confidence score, and a coarse
//! emotional-tone label.

use crate::config::VocalThresholds;
use crate::vocal::features::VocalFeatureProfile;
use serde::Serialize;

/// Volume level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeLevel {
    Loud,
    Moderate,
    Soft,
}

/// Whether frame energy stays steady or swings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeConsistency {
    Varied,
    Steady,
}

/// Speaking pace classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceLevel {
    Fast,
    Moderate,
    Slow,
}

/// Mean pitch register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchLevel {
    High,
    Medium,
    Low,
    Unclear,
}

/// Pitch variety classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchVariety {
    Expressive,
    Monotone,
    Unclear,
}

/// Enunciation clarity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClarityLevel {
    Clear,
    Moderate,
    Unclear,
}

/// Pause pattern classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseLevel {
    ManyLong,
    Natural,
    Few,
}

/// Coarse mood label derived from vocal delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmotionalTone {
    #[serde(rename = "agitated/stressed")]
    Agitated,
    #[serde(rename = "calm/sad")]
    Calm,
    #[serde(rename = "engaged/enthusiastic")]
    Engaged,
    #[serde(rename = "bored/disengaged")]
    Bored,
    #[serde(rename = "neutral/controlled")]
    Neutral,
}

impl EmotionalTone {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            EmotionalTone::Agitated => "agitated/stressed",
            EmotionalTone::Calm => "calm/sad",
            EmotionalTone::Engaged => "engaged/enthusiastic",
            EmotionalTone::Bored => "bored/disengaged",
            EmotionalTone::Neutral => "neutral/controlled",
        }
    }
}

/// Volume dimension score
#[derive(Debug, Clone, Serialize)]
pub struct VolumeScore {
    pub level: VolumeLevel,
    pub consistency: VolumeConsistency,
    pub score: u8,
    pub note: &'static str,
}

/// Pace dimension score
#[derive(Debug, Clone, Serialize)]
pub struct PaceScore {
    pub level: PaceLevel,
    /// Onset events per second
    pub rate_per_sec: f32,
    pub score: u8,
    pub note: &'static str,
}

/// Pitch dimension score
#[derive(Debug, Clone, Serialize)]
pub struct PitchScore {
    pub level: PitchLevel,
    pub variety: PitchVariety,
    pub score: u8,
    pub note: &'static str,
    pub variety_note: &'static str,
}

/// Clarity dimension score
#[derive(Debug, Clone, Serialize)]
pub struct ClarityScore {
    pub level: ClarityLevel,
    pub score: u8,
    pub note: &'static str,
}

/// Pause dimension score
#[derive(Debug, Clone, Serialize)]
pub struct PauseScore {
    pub level: PauseLevel,
    pub average_seconds: f32,
    pub score: u8,
    pub note: &'static str,
}

/// Scored vocal profile
///
/// Per-dimension levels and scores, the aggregate confidence score
/// (always clamped to [1, 10]), the emotional-tone label, and the overall
/// vocal score (unweighted mean of the five dimension scores, one
/// decimal).
#[derive(Debug, Clone, Serialize)]
pub struct VocalProfileScore {
    pub duration_seconds: f32,
    pub volume: VolumeScore,
    pub pace: PaceScore,
    pub pitch: PitchScore,
    pub clarity: ClarityScore,
    pub pauses: PauseScore,
    pub confidence_score: u8,
    pub emotional_tone: EmotionalTone,
    pub overall_score: f32,
}

/// Maps feature profiles to scores using fixed thresholds
#[derive(Debug, Clone)]
pub struct VocalProfileScorer {
    thresholds: VocalThresholds,
}

impl Default for VocalProfileScorer {
    fn default() -> Self {
        Self::new(VocalThresholds::default())
    }
}

impl VocalProfileScorer {
    /// Create a scorer with the given thresholds
    pub fn new(thresholds: VocalThresholds) -> Self {
        Self { thresholds }
    }

    /// Score a vocal feature profile
    pub fn score(&self, profile: &VocalFeatureProfile) -> VocalProfileScore {
        let t = &self.thresholds;

        let volume = self.score_volume(profile);
        let pace = self.score_pace(profile);
        let pitch = self.score_pitch(profile);
        let clarity = self.score_clarity(profile);
        let pauses = self.score_pauses(profile);

        // Confidence: baseline 5, fixed per-dimension deltas, clamped 1..=10
        let mut confidence: i32 = 5;
        confidence += match volume.level {
            VolumeLevel::Moderate => 2,
            VolumeLevel::Loud => 1,
            VolumeLevel::Soft => -2,
        };
        confidence += match pace.level {
            PaceLevel::Moderate => 2,
            PaceLevel::Fast | PaceLevel::Slow => -1,
        };
        confidence += match pitch.variety {
            PitchVariety::Expressive => 2,
            PitchVariety::Monotone => -2,
            PitchVariety::Unclear => 0,
        };
        confidence += match clarity.level {
            ClarityLevel::Clear => 2,
            ClarityLevel::Unclear => -2,
            ClarityLevel::Moderate => 0,
        };
        confidence += match pauses.level {
            PauseLevel::Natural => 1,
            PauseLevel::ManyLong => -2,
            PauseLevel::Few => 0,
        };
        let confidence_score = confidence.clamp(1, 10) as u8;

        // Emotional tone: ordered rules, first match wins
        let emotional_tone = if volume.level == VolumeLevel::Loud && pace.level == PaceLevel::Fast {
            EmotionalTone::Agitated
        } else if profile.mean_rms < t.calm_volume && pitch.level == PitchLevel::Low {
            EmotionalTone::Calm
        } else if pitch.variety == PitchVariety::Expressive && volume.level == VolumeLevel::Moderate
        {
            EmotionalTone::Engaged
        } else if pitch.variety == PitchVariety::Monotone && pace.level == PaceLevel::Slow {
            EmotionalTone::Bored
        } else {
            EmotionalTone::Neutral
        };

        let dimension_sum = volume.score as f32
            + pace.score as f32
            + pitch.score as f32
            + clarity.score as f32
            + pauses.score as f32;
        let overall_score = (dimension_sum / 5.0 * 10.0).round() / 10.0;

        VocalProfileScore {
            duration_seconds: profile.duration_seconds,
            volume,
            pace,
            pitch,
            clarity,
            pauses,
            confidence_score,
            emotional_tone,
            overall_score,
        }
    }

    fn score_volume(&self, profile: &VocalFeatureProfile) -> VolumeScore {
        let t = &self.thresholds;
        let (level, score, note) = if profile.mean_rms > t.volume_loud {
            (
                VolumeLevel::Loud,
                5,
                "Speaking loudly - may come across as aggressive",
            )
        } else if profile.mean_rms < t.volume_soft {
            (
                VolumeLevel::Soft,
                4,
                "Speaking softly - may seem unconfident or passive",
            )
        } else {
            (VolumeLevel::Moderate, 8, "Good volume - clear and audible")
        };
        let consistency = if profile.rms_std > t.volume_varied_std {
            VolumeConsistency::Varied
        } else {
            VolumeConsistency::Steady
        };
        VolumeScore {
            level,
            consistency,
            score,
            note,
        }
    }

    fn score_pace(&self, profile: &VocalFeatureProfile) -> PaceScore {
        let t = &self.thresholds;
        let (level, score, note) = if profile.onset_rate > t.pace_fast {
            (
                PaceLevel::Fast,
                6,
                "Speaking quickly - may indicate nervousness or excitement",
            )
        } else if profile.onset_rate < t.pace_slow {
            (
                PaceLevel::Slow,
                6,
                "Speaking slowly - sounds thoughtful but may lose attention",
            )
        } else {
            (
                PaceLevel::Moderate,
                8,
                "Good speaking pace - easy to follow",
            )
        };
        PaceScore {
            level,
            rate_per_sec: (profile.onset_rate * 100.0).round() / 100.0,
            score,
            note,
        }
    }

    fn score_pitch(&self, profile: &VocalFeatureProfile) -> PitchScore {
        let t = &self.thresholds;
        match &profile.pitch {
            Some(stats) => {
                let (level, note) = if stats.mean_hz > t.pitch_high_hz {
                    (
                        PitchLevel::High,
                        "Higher pitch - may indicate stress or excitement",
                    )
                } else if stats.mean_hz < t.pitch_low_hz {
                    (PitchLevel::Low, "Lower pitch - sounds calm and authoritative")
                } else {
                    (PitchLevel::Medium, "Natural pitch range")
                };
                let (variety, score, variety_note) = if stats.std_hz > t.pitch_expressive_std {
                    (
                        PitchVariety::Expressive,
                        8,
                        "Good vocal variety - engaging to listen to",
                    )
                } else {
                    (
                        PitchVariety::Monotone,
                        4,
                        "Monotone delivery - may sound disengaged",
                    )
                };
                PitchScore {
                    level,
                    variety,
                    score,
                    note,
                    variety_note,
                }
            }
            None => PitchScore {
                level: PitchLevel::Unclear,
                variety: PitchVariety::Unclear,
                score: 4,
                note: "Could not analyze pitch",
                variety_note: "",
            },
        }
    }

    fn score_clarity(&self, profile: &VocalFeatureProfile) -> ClarityScore {
        let t = &self.thresholds;
        let (level, score, note) = if profile.zcr_mean > t.clarity_clear {
            (
                ClarityLevel::Clear,
                9,
                "Clear enunciation - easy to understand",
            )
        } else if profile.zcr_mean < t.clarity_unclear {
            (
                ClarityLevel::Unclear,
                3,
                "Mumbled or unclear speech - work on articulation",
            )
        } else {
            (
                ClarityLevel::Moderate,
                6,
                "Acceptable clarity - could improve enunciation",
            )
        };
        ClarityScore { level, score, note }
    }

    fn score_pauses(&self, profile: &VocalFeatureProfile) -> PauseScore {
        let t = &self.thresholds;
        let (level, score, note) = if profile.mean_pause_seconds > t.pause_long_seconds {
            (
                PauseLevel::ManyLong,
                5,
                "Long pauses - may indicate uncertainty or search for words",
            )
        } else if profile.mean_pause_seconds > t.pause_natural_seconds {
            (
                PauseLevel::Natural,
                8,
                "Natural pausing - allows the listener to process",
            )
        } else {
            (
                PauseLevel::Few,
                5,
                "Few pauses - may sound rushed or nervous",
            )
        };
        PauseScore {
            level,
            average_seconds: (profile.mean_pause_seconds * 100.0).round() / 100.0,
            score,
            note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocal::features::PitchStats;

    fn profile() -> VocalFeatureProfile {
        VocalFeatureProfile {
            duration_seconds: 10.0,
            mean_rms: 0.08,
            rms_std: 0.02,
            onset_rate: 3.0,
            pitch: Some(PitchStats {
                mean_hz: 180.0,
                std_hz: 30.0,
            }),
            zcr_mean: 0.10,
            pause_count: 4,
            mean_pause_seconds: 0.8,
        }
    }

    #[test]
    fn test_moderate_profile_scores() {
        let score = VocalProfileScorer::default().score(&profile());
        assert_eq!(score.volume.level, VolumeLevel::Moderate);
        assert_eq!(score.volume.score, 8);
        assert_eq!(score.pace.level, PaceLevel::Moderate);
        assert_eq!(score.pace.score, 8);
        assert_eq!(score.pitch.variety, PitchVariety::Monotone);
        assert_eq!(score.pitch.score, 4);
        assert_eq!(score.clarity.level, ClarityLevel::Moderate);
        assert_eq!(score.clarity.score, 6);
        assert_eq!(score.pauses.level, PauseLevel::Natural);
        assert_eq!(score.pauses.score, 8);
        // 5 + 2 (vol) + 2 (pace) - 2 (monotone) + 0 + 1 (pauses) = 8
        assert_eq!(score.confidence_score, 8);
        // (8 + 8 + 4 + 6 + 8) / 5 = 6.8
        assert!((score.overall_score - 6.8).abs() < 1e-6);
    }

    #[test]
    fn test_soft_slow_confidence_is_two() {
        // Soft voice at 1.5 onsets/s with otherwise neutral dimensions:
        // 5 - 2 (soft) - 1 (slow) = 2
        let mut p = profile();
        p.mean_rms = 0.02;
        p.onset_rate = 1.5;
        p.pitch = None;
        p.zcr_mean = 0.10;
        p.mean_pause_seconds = 0.3;

        let score = VocalProfileScorer::default().score(&p);
        assert_eq!(score.volume.level, VolumeLevel::Soft);
        assert_eq!(score.pace.level, PaceLevel::Slow);
        assert_eq!(score.pitch.variety, PitchVariety::Unclear);
        assert_eq!(score.confidence_score, 2);
    }

    #[test]
    fn test_confidence_clamped_to_range() {
        // Worst case: soft, slow, monotone, unclear, many long pauses
        let mut p = profile();
        p.mean_rms = 0.01;
        p.onset_rate = 0.5;
        p.pitch = Some(PitchStats {
            mean_hz: 120.0,
            std_hz: 5.0,
        });
        p.zcr_mean = 0.01;
        p.mean_pause_seconds = 2.5;
        let score = VocalProfileScorer::default().score(&p);
        // 5 - 2 - 1 - 2 - 2 - 2 = -4, clamped to 1
        assert_eq!(score.confidence_score, 1);

        // Best case: moderate, moderate, expressive, clear, natural
        let mut p = profile();
        p.mean_rms = 0.08;
        p.onset_rate = 3.0;
        p.pitch = Some(PitchStats {
            mean_hz: 180.0,
            std_hz: 80.0,
        });
        p.zcr_mean = 0.20;
        p.mean_pause_seconds = 0.8;
        let score = VocalProfileScorer::default().score(&p);
        // 5 + 2 + 2 + 2 + 2 + 1 = 14, clamped to 10
        assert_eq!(score.confidence_score, 10);
    }

    #[test]
    fn test_emotional_tone_rules_in_order() {
        let scorer = VocalProfileScorer::default();

        // Loud and fast wins first
        let mut p = profile();
        p.mean_rms = 0.2;
        p.onset_rate = 5.0;
        assert_eq!(scorer.score(&p).emotional_tone, EmotionalTone::Agitated);

        // Soft with low pitch
        let mut p = profile();
        p.mean_rms = 0.02;
        p.pitch = Some(PitchStats {
            mean_hz: 90.0,
            std_hz: 10.0,
        });
        assert_eq!(scorer.score(&p).emotional_tone, EmotionalTone::Calm);

        // Expressive at moderate volume
        let mut p = profile();
        p.pitch = Some(PitchStats {
            mean_hz: 180.0,
            std_hz: 80.0,
        });
        assert_eq!(scorer.score(&p).emotional_tone, EmotionalTone::Engaged);

        // Monotone and slow
        let mut p = profile();
        p.onset_rate = 1.0;
        assert_eq!(scorer.score(&p).emotional_tone, EmotionalTone::Bored);

        // Nothing matches
        let p = profile();
        assert_eq!(scorer.score(&p).emotional_tone, EmotionalTone::Neutral);
    }

    #[test]
    fn test_agitated_beats_engaged() {
        // Loud and fast AND expressive: the agitated rule is checked first
        let mut p = profile();
        p.mean_rms = 0.2;
        p.onset_rate = 5.0;
        p.pitch = Some(PitchStats {
            mean_hz: 250.0,
            std_hz: 90.0,
        });
        let score = VocalProfileScorer::default().score(&p);
        assert_eq!(score.emotional_tone, EmotionalTone::Agitated);
    }

    #[test]
    fn test_unclear_pitch_scores_four() {
        let mut p = profile();
        p.pitch = None;
        let score = VocalProfileScorer::default().score(&p);
        assert_eq!(score.pitch.level, PitchLevel::Unclear);
        assert_eq!(score.pitch.variety, PitchVariety::Unclear);
        assert_eq!(score.pitch.score, 4);
    }

    #[test]
    fn test_volume_consistency() {
        let scorer = VocalProfileScorer::default();
        let mut p = profile();
        p.rms_std = 0.08;
        assert_eq!(
            scorer.score(&p).volume.consistency,
            VolumeConsistency::Varied
        );
        p.rms_std = 0.01;
        assert_eq!(
            scorer.score(&p).volume.consistency,
            VolumeConsistency::Steady
        );
    }

    #[test]
    fn test_overall_uses_dimension_scores() {
        // loud (5), fast (6), expressive (8), clear (9), few (5) -> 6.6
        let mut p = profile();
        p.mean_rms = 0.2;
        p.onset_rate = 5.0;
        p.pitch = Some(PitchStats {
            mean_hz: 250.0,
            std_hz: 90.0,
        });
        p.zcr_mean = 0.2;
        p.mean_pause_seconds = 0.2;
        let score = VocalProfileScorer::default().score(&p);
        assert!((score.overall_score - 6.6).abs() < 1e-6);
    }

    #[test]
    fn test_tone_labels() {
        assert_eq!(EmotionalTone::Agitated.label(), "agitated/stressed");
        assert_eq!(EmotionalTone::Neutral.label(), "neutral/controlled");
    }
}
