//! Configuration management for the analysis engine

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the communication analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Audio input guards
    pub audio: AudioLimits,
    /// Vocal scoring thresholds
    pub vocal: VocalThresholds,
}

/// Guards applied to audio resources before any decode work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioLimits {
    /// Maximum audio resource size in bytes
    pub max_file_bytes: u64,
    /// Minimum analyzable duration in seconds
    pub min_duration_seconds: f32,
    /// Frame RMS floor below which a buffer counts as silent
    pub silence_floor: f32,
}

/// Fixed thresholds mapping raw vocal statistics to qualitative levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocalThresholds {
    /// Mean frame RMS above which speech is "loud"
    pub volume_loud: f32,
    /// Mean frame RMS below which speech is "soft"
    pub volume_soft: f32,
    /// Frame RMS standard deviation above which volume is "varied"
    pub volume_varied_std: f32,
    /// Mean frame RMS below which the calm/sad tone rule may fire
    pub calm_volume: f32,
    /// Onsets per second above which pace is "fast"
    pub pace_fast: f32,
    /// Onsets per second below which pace is "slow"
    pub pace_slow: f32,
    /// Mean pitch in Hz above which pitch level is "high"
    pub pitch_high_hz: f32,
    /// Mean pitch in Hz below which pitch level is "low"
    pub pitch_low_hz: f32,
    /// Pitch standard deviation in Hz above which delivery is "expressive"
    pub pitch_expressive_std: f32,
    /// Mean zero-crossing rate above which enunciation is "clear"
    pub clarity_clear: f32,
    /// Mean zero-crossing rate below which enunciation is "unclear"
    pub clarity_unclear: f32,
    /// Mean pause length in seconds above which pausing is "many_long"
    pub pause_long_seconds: f32,
    /// Mean pause length in seconds above which pausing is "natural"
    pub pause_natural_seconds: f32,
    /// Decibels below peak frame energy used to segment voiced intervals
    pub split_top_db: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            audio: AudioLimits::default(),
            vocal: VocalThresholds::default(),
        }
    }
}

impl Default for AudioLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: 50 * 1024 * 1024,
            min_duration_seconds: 0.5,
            silence_floor: 1e-4,
        }
    }
}

impl Default for VocalThresholds {
    fn default() -> Self {
        Self {
            volume_loud: 0.15,
            volume_soft: 0.03,
            volume_varied_std: 0.05,
            calm_volume: 0.05,
            pace_fast: 4.0,
            pace_slow: 2.0,
            pitch_high_hz: 220.0,
            pitch_low_hz: 100.0,
            pitch_expressive_std: 50.0,
            clarity_clear: 0.15,
            clarity_unclear: 0.05,
            pause_long_seconds: 1.5,
            pause_natural_seconds: 0.5,
            split_top_db: 30.0,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.audio.max_file_bytes == 0 {
            return Err(Error::Config("max_file_bytes must be > 0".into()));
        }
        if self.audio.min_duration_seconds <= 0.0 {
            return Err(Error::Config("min_duration_seconds must be > 0".into()));
        }

        let v = &self.vocal;
        if v.volume_soft >= v.volume_loud {
            return Err(Error::Config("volume_soft must be < volume_loud".into()));
        }
        if v.pace_slow >= v.pace_fast {
            return Err(Error::Config("pace_slow must be < pace_fast".into()));
        }
        if v.pitch_low_hz >= v.pitch_high_hz {
            return Err(Error::Config("pitch_low_hz must be < pitch_high_hz".into()));
        }
        if v.clarity_unclear >= v.clarity_clear {
            return Err(Error::Config(
                "clarity_unclear must be < clarity_clear".into(),
            ));
        }
        if v.pause_natural_seconds >= v.pause_long_seconds {
            return Err(Error::Config(
                "pause_natural_seconds must be < pause_long_seconds".into(),
            ));
        }
        if v.split_top_db <= 0.0 {
            return Err(Error::Config("split_top_db must be > 0".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.audio.max_file_bytes, 50 * 1024 * 1024);
        assert_eq!(config.vocal.pitch_expressive_std, 50.0);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = AnalysisConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: AnalysisConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.vocal.volume_loud, config.vocal.volume_loud);
        assert_eq!(parsed.audio.max_file_bytes, config.audio.max_file_bytes);
    }

    #[test]
    fn test_validation_rejects_inverted_thresholds() {
        let mut config = AnalysisConfig::default();
        config.vocal.volume_soft = 0.5;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.vocal.pace_slow = 10.0;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.audio.min_duration_seconds = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let config = AnalysisConfig::default();
        config.save(&path).unwrap();
        let loaded = AnalysisConfig::load(&path).unwrap();
        assert_eq!(loaded.vocal.pause_long_seconds, 1.5);
    }
}
