use std::env;

use serde::{Deserialize, Serialize};

fn default_target_words() -> u32 {
    150
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct StoryConfig {
    /// Approximate story length asked of the model. Not enforced.
    #[serde(default = "default_target_words")]
    pub target_words: u32,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            target_words: default_target_words(),
        }
    }
}

impl StoryConfig {
    pub fn new() -> Self {
        let target_words = env::var("WORDBOOK_STORY_WORDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_target_words);

        Self { target_words }
    }
}
