use serde::{Deserialize, Serialize};

use self::audio::AudioConfig;
use self::genai::GenAiConfig;
use self::storage::StorageConfig;
use self::story::StoryConfig;

pub mod audio;
pub mod genai;
pub mod storage;
pub mod story;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub genai: GenAiConfig,
    pub audio: AudioConfig,
    pub storage: StorageConfig,
    pub story: StoryConfig,
}

impl Config {
    /// Build from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            genai: GenAiConfig::new(),
            audio: AudioConfig::new(),
            storage: StorageConfig::new(),
            story: StoryConfig::new(),
        }
    }

    /// Reject values the audio path cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.audio.validate()
    }
}
