use std::env;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Speech service output rate, used as the default device rate
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;

fn default_voice() -> String {
    "Kore".to_string()
}

fn default_sample_rate() -> u32 {
    SPEECH_SAMPLE_RATE
}

fn default_channels() -> u16 {
    1
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AudioConfig {
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Output device rate
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Output device channel count; mono speech is copied to every channel
    #[serde(default = "default_channels")]
    pub channels: u16,
    /// Keep decoded speech in memory instead of opening an output device
    #[serde(default)]
    pub headless: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            headless: false,
        }
    }
}

impl AudioConfig {
    pub fn new() -> Self {
        let voice = env::var("WORDBOOK_VOICE").unwrap_or_else(|_| default_voice());
        let headless = env::var("WORDBOOK_HEADLESS_AUDIO")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Self {
            voice,
            headless,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channels == 0 {
            return Err(ConfigError::Invalid("audio.channels must be at least 1".to_string()));
        }
        if self.sample_rate == 0 {
            return Err(ConfigError::Invalid("audio.sample_rate must be positive".to_string()));
        }
        Ok(())
    }
}
