//! Configuration schema definitions

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Main configuration for Vamp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VampConfig {
    /// Audio output settings
    #[serde(default)]
    pub audio: AudioConfig,

    /// Master settings (volume, mute)
    #[serde(default)]
    pub master: MasterConfig,
}

impl VampConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.audio.sample_rate < 8000 || self.audio.sample_rate > 192000 {
            bail!("Sample rate must be between 8000 and 192000");
        }
        if let Some(frames) = self.audio.buffer_size {
            if !(64..=8192).contains(&frames) {
                bail!("Buffer size must be between 64 and 8192 frames");
            }
        }
        if self.master.volume < 0.0 || self.master.volume > 1.0 {
            bail!("Master volume must be between 0.0 and 1.0");
        }
        Ok(())
    }
}

/// Audio output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Sample rate in Hz for deviceless rendering; live playback follows
    /// the output device's rate (default: 44100)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Requested stream buffer size in frames (None = device default)
    pub buffer_size: Option<u32>,

    /// Output device name (None = default device)
    pub device: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            buffer_size: None,
            device: None,
        }
    }
}

fn default_sample_rate() -> u32 {
    44100
}

/// Master settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterConfig {
    /// Master volume 0.0-1.0 (default: 0.7)
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Start with one-shot effects muted (default: false).
    /// Background music is never gated by this flag.
    #[serde(default)]
    pub muted: bool,
}

impl Default for MasterConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            muted: false,
        }
    }
}

fn default_volume() -> f32 {
    0.7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VampConfig::default();
        assert_eq!(config.audio.sample_rate, 44100);
        assert_eq!(config.audio.buffer_size, None);
        assert_eq!(config.master.volume, 0.7);
        assert!(!config.master.muted);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "audio:\n  sample_rate: 48000\n";
        let config: VampConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.audio.sample_rate, 48000);
        assert_eq!(config.master.volume, 0.7);
    }

    #[test]
    fn test_invalid_sample_rate() {
        let mut config = VampConfig::default();
        config.audio.sample_rate = 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_buffer_size() {
        let mut config = VampConfig::default();
        config.audio.buffer_size = Some(16);
        assert!(config.validate().is_err());
        config.audio.buffer_size = Some(512);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_volume() {
        let mut config = VampConfig::default();
        config.master.volume = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_muted_flag_round_trip() {
        let yaml = "master:\n  muted: true\n";
        let config: VampConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.master.muted);
    }
}
