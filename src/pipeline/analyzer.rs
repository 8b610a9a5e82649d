//! Communication analyzer entry point
//!
//! Single public surface of the engine: validates input, runs the audio
//! path when a recording is supplied, classifies the final text, fuses the
//! signals, and assembles the report.

use crate::audio::decode::AudioDecoder;
use crate::coach::{CoachingGenerator, Relationship};
use crate::config::AnalysisConfig;
use crate::pipeline::fusion;
use crate::text::{StyleAnalysis, TextStyleClassifier};
use crate::vocal::{VocalFeatureExtractor, VocalProfileScore, VocalProfileScorer};
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// External transcription collaborator
///
/// Receives the canonical mono WAV produced by the decoder. Implementations
/// surface failure as [`Error::Unintelligible`] or
/// [`Error::TranscriptionService`]; the engine never retries.
pub trait Transcriber: Send + Sync {
    /// Transcribe the canonical WAV at `canonical_wav` to text
    fn transcribe(&self, canonical_wav: &Path) -> Result<String>;
}

/// One analysis request
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    /// Message text to analyze (replaced by the transcript when audio is
    /// supplied and a transcriber is configured)
    pub text: Option<String>,
    /// Path to an audio recording
    pub audio_path: Option<PathBuf>,
    /// Relationship category for the contextual tip
    pub relationship: Option<Relationship>,
}

impl AnalysisRequest {
    /// Request for plain text analysis
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Request for audio analysis
    pub fn from_audio(path: impl Into<PathBuf>) -> Self {
        Self {
            audio_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Attach a relationship category
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = Some(relationship);
        self
    }
}

/// Guidance returned when a request carries neither text nor audio
#[derive(Debug, Clone, Serialize)]
pub struct UsageGuidance {
    pub message: &'static str,
    pub features: Vec<&'static str>,
    pub options: Vec<&'static str>,
    pub examples: Vec<&'static str>,
    pub audio_tips: &'static str,
}

impl Default for UsageGuidance {
    fn default() -> Self {
        Self {
            message: "Provide a message or a recording to analyze your communication style",
            features: vec![
                "TEXT: analyze word choice, tone, assertiveness",
                "AUDIO: analyze speech plus volume, pace, clarity, pitch, confidence",
            ],
            options: vec![
                "Type the message you want to say",
                "Upload an audio file (WAV recommended; MP3, M4A, MP4, OGG, FLAC also accepted)",
            ],
            examples: vec![
                "You always ignore my suggestions",
                "I feel frustrated when meetings run late",
            ],
            audio_tips: "For best results use WAV, speak clearly, and minimize background noise",
        }
    }
}

/// Sub-scores of the final style analysis
#[derive(Debug, Clone, Serialize)]
pub struct StyleScores {
    pub tone: u8,
    pub clarity: u8,
    pub confidence: u8,
    pub empathy: u8,
    pub overall: u8,
}

/// Serialized style analysis block
#[derive(Debug, Clone, Serialize)]
pub struct StyleReport {
    pub style: &'static str,
    pub scores: StyleScores,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
    pub filler_words: Vec<String>,
}

impl StyleReport {
    fn from_analysis(analysis: &StyleAnalysis) -> Self {
        Self {
            style: analysis.style.label(),
            scores: StyleScores {
                tone: analysis.tone_score,
                clarity: analysis.clarity_score,
                confidence: analysis.confidence_score,
                empathy: analysis.empathy_score,
                overall: analysis.overall_score,
            },
            issues: analysis.issues.clone(),
            strengths: analysis.strengths.clone(),
            filler_words: analysis.filler_words.clone(),
        }
    }
}

/// Terminal analysis artifact
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub status: &'static str,
    pub original_message: String,
    pub transcribed_from_audio: bool,
    pub style_analysis: StyleReport,
    pub coaching: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten_message: Option<String>,
    pub relationship_tip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocal_analysis: Option<VocalProfileScore>,
}

/// Outcome of one analysis call
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// Neither text nor audio was supplied; not an error
    NeedsInput(UsageGuidance),
    /// Completed analysis
    Report(Box<AnalysisReport>),
}

impl AnalysisOutcome {
    /// Completed report, if the outcome is one
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisOutcome::Report(report) => Some(report),
            AnalysisOutcome::NeedsInput(_) => None,
        }
    }
}

/// The communication analysis engine
///
/// Stateless across calls: each invocation owns its buffers and produces
/// its own result, so concurrent use from multiple callers is safe by
/// construction.
pub struct CommunicationAnalyzer {
    decoder: AudioDecoder,
    extractor: VocalFeatureExtractor,
    scorer: VocalProfileScorer,
    classifier: TextStyleClassifier,
    coach: CoachingGenerator,
    transcriber: Option<Box<dyn Transcriber>>,
}

impl CommunicationAnalyzer {
    /// Create an analyzer from configuration
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            decoder: AudioDecoder::new(config.audio.clone()),
            extractor: VocalFeatureExtractor::from_config(&config),
            scorer: VocalProfileScorer::new(config.vocal.clone()),
            classifier: TextStyleClassifier::new(),
            coach: CoachingGenerator::new(),
            transcriber: None,
        })
    }

    /// Attach the external transcription collaborator
    pub fn with_transcriber(mut self, transcriber: Box<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    /// Analyze one request
    ///
    /// Validation, transcode, and transcription failures abort with a
    /// typed error. Vocal feature extraction failures degrade to
    /// text-only analysis and leave `vocal_analysis` absent.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome> {
        let mut text = request
            .text
            .clone()
            .filter(|t| !t.trim().is_empty());

        if text.is_none() && request.audio_path.is_none() {
            return Ok(AnalysisOutcome::NeedsInput(UsageGuidance::default()));
        }

        let mut transcribed = false;
        let mut vocal: Option<VocalProfileScore> = None;

        if let Some(path) = &request.audio_path {
            let decoded = self.decoder.decode(path)?;

            if let Some(transcriber) = &self.transcriber {
                let transcript = transcriber.transcribe(decoded.canonical_wav.path())?;
                log::info!("transcribed {} characters from audio", transcript.len());
                // Transcript replaces caller text; an empty transcript falls
                // through to the needs-input outcome below
                text = Some(transcript).filter(|t| !t.trim().is_empty());
                transcribed = true;
            } else if text.is_none() {
                return Err(Error::TranscriptionService(
                    "no transcription service configured".into(),
                ));
            }

            match self.extractor.extract(&decoded.audio) {
                Ok(profile) => vocal = Some(self.scorer.score(&profile)),
                Err(e) if e.is_degradable() => {
                    log::warn!("vocal analysis degraded to text-only: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        let text = match text {
            Some(t) => t,
            None => return Ok(AnalysisOutcome::NeedsInput(UsageGuidance::default())),
        };

        let mut analysis = self.classifier.classify(&text);
        fusion::apply(&mut analysis, vocal.as_ref());
        analysis.validate()?;

        let coaching =
            self.coach
                .generate(analysis.style, &text, vocal.as_ref(), request.relationship);

        let report = AnalysisReport {
            status: "analyzed",
            original_message: text,
            transcribed_from_audio: transcribed,
            style_analysis: StyleReport::from_analysis(&analysis),
            coaching: coaching.coaching,
            rewritten_message: coaching.rewritten_message,
            relationship_tip: coaching.relationship_tip,
            vocal_analysis: vocal,
        };

        Ok(AnalysisOutcome::Report(Box::new(report)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_input_when_empty() {
        let analyzer = CommunicationAnalyzer::new(AnalysisConfig::default()).unwrap();
        let outcome = analyzer.analyze(&AnalysisRequest::default()).unwrap();
        assert!(matches!(outcome, AnalysisOutcome::NeedsInput(_)));
    }

    #[test]
    fn test_blank_text_counts_as_missing() {
        let analyzer = CommunicationAnalyzer::new(AnalysisConfig::default()).unwrap();
        let outcome = analyzer
            .analyze(&AnalysisRequest::from_text("   "))
            .unwrap();
        assert!(matches!(outcome, AnalysisOutcome::NeedsInput(_)));
    }

    #[test]
    fn test_text_only_analysis() {
        let analyzer = CommunicationAnalyzer::new(AnalysisConfig::default()).unwrap();
        let outcome = analyzer
            .analyze(&AnalysisRequest::from_text("You always ignore my suggestions"))
            .unwrap();
        let report = outcome.report().unwrap();

        assert_eq!(report.status, "analyzed");
        assert!(!report.transcribed_from_audio);
        assert_eq!(report.style_analysis.style, "SOMEWHAT_AGGRESSIVE");
        assert!(report.vocal_analysis.is_none());
        assert!(report
            .rewritten_message
            .as_ref()
            .unwrap()
            .starts_with("when this happens, I feel"));
    }

    #[test]
    fn test_relationship_tip_included() {
        let analyzer = CommunicationAnalyzer::new(AnalysisConfig::default()).unwrap();
        let request =
            AnalysisRequest::from_text("I think we can fix this").with_relationship(Relationship::Boss);
        let outcome = analyzer.analyze(&request).unwrap();
        assert!(outcome.report().unwrap().relationship_tip.contains("boss"));
    }

    #[test]
    fn test_audio_without_transcriber_or_text_fails() {
        let analyzer = CommunicationAnalyzer::new(AnalysisConfig::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_tone_wav(&path, 1.0);

        let err = analyzer
            .analyze(&AnalysisRequest::from_audio(&path))
            .unwrap_err();
        assert_eq!(err.kind(), "transcription_error");
    }

    #[test]
    fn test_invalid_extension_rejected_before_decode() {
        let analyzer = CommunicationAnalyzer::new(AnalysisConfig::default()).unwrap();
        let err = analyzer
            .analyze(&AnalysisRequest::from_audio("nope.aac"))
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
    }

    fn write_tone_wav(path: &Path, duration: f32) {
        use crate::SAMPLE_RATE;
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        for i in 0..n {
            let t = i as f32 / SAMPLE_RATE as f32;
            let s = (2.0 * std::f32::consts::PI * 200.0 * t).sin() * 0.5;
            writer.write_sample((s * i16::MAX as f32) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
}
