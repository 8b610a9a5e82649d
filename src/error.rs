//! Error types for the communication analysis engine

use thiserror::Error;

/// Main error type for analysis operations
///
/// Every user-reachable variant carries an actionable message: validation
/// failures name the accepted formats, transcode/transcription failures
/// invite the caller to supply WAV or typed text instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported audio format: {extension}. Please upload WAV, MP3, M4A, MP4, OGG, or FLAC")]
    UnsupportedFormat { extension: String },

    #[error("Audio file not found: {0}")]
    FileNotFound(String),

    #[error("Audio file is empty. Please upload a valid audio recording")]
    EmptyAudio,

    #[error("Audio file too large ({size_mb:.1} MB). Maximum size is {limit_mb} MB")]
    AudioTooLarge { size_mb: f64, limit_mb: u64 },

    #[error("Could not convert audio to WAV: {0}. Try uploading a WAV file instead, or type your message directly")]
    Transcode(String),

    #[error("Could not understand the audio. Ensure clear speech and minimal background noise, or type your message instead")]
    Unintelligible,

    #[error("Speech transcription service unavailable: {0}. Try again in a moment, or type your message instead")]
    TranscriptionService(String),

    #[error("Audio too short to analyze ({seconds:.2} s). Minimum is {min_seconds} s")]
    AudioTooShort { seconds: f32, min_seconds: f32 },

    #[error("Audio appears to be silent or unreadable")]
    SilentAudio,

    #[error("Vocal feature extraction failed: {0}")]
    FeatureExtraction(String),

    #[error("Classification invariant violated: {0}")]
    Classification(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio processing error: {0}")]
    Audio(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// String-tagged error kind for callers that report errors by category
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnsupportedFormat { .. }
            | Error::FileNotFound(_)
            | Error::EmptyAudio
            | Error::AudioTooLarge { .. } => "invalid_input",
            Error::Transcode(_) => "transcode_error",
            Error::Unintelligible | Error::TranscriptionService(_) => "transcription_error",
            Error::AudioTooShort { .. } | Error::SilentAudio | Error::FeatureExtraction(_) => {
                "feature_extraction"
            }
            Error::Classification(_) => "classification_error",
            Error::Config(_) => "config_error",
            Error::Audio(_) => "audio_error",
            Error::Io(_) => "io_error",
        }
    }

    /// True for failures that degrade to text-only analysis instead of
    /// aborting the request
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            Error::AudioTooShort { .. } | Error::SilentAudio | Error::FeatureExtraction(_)
        )
    }
}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        Error::Audio(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = Error::UnsupportedFormat {
            extension: ".aac".into(),
        };
        assert_eq!(err.kind(), "invalid_input");
        assert_eq!(Error::Transcode("no codec".into()).kind(), "transcode_error");
        assert_eq!(Error::Unintelligible.kind(), "transcription_error");
        assert_eq!(Error::SilentAudio.kind(), "feature_extraction");
    }

    #[test]
    fn test_degradable_errors() {
        assert!(Error::SilentAudio.is_degradable());
        assert!(Error::AudioTooShort {
            seconds: 0.2,
            min_seconds: 0.5
        }
        .is_degradable());
        assert!(!Error::EmptyAudio.is_degradable());
        assert!(!Error::Unintelligible.is_degradable());
    }

    #[test]
    fn test_messages_are_actionable() {
        let err = Error::UnsupportedFormat {
            extension: ".aac".into(),
        };
        assert!(err.to_string().contains("WAV"));
        let err = Error::Transcode("ffmpeg missing".into());
        assert!(err.to_string().contains("WAV"));
        let err = Error::Unintelligible;
        assert!(err.to_string().contains("type your message"));
    }
}
