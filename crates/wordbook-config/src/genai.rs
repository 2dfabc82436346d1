use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_speech_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_chat_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    60
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct GenAiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Structured lookups and stories
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_speech_model")]
    pub speech_model: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            speech_model: default_speech_model(),
            chat_model: default_chat_model(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl GenAiConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        Self {
            api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            api_url: env::var("GEMINI_API_URL").unwrap_or(defaults.api_url),
            text_model: env::var("WORDBOOK_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: env::var("WORDBOOK_IMAGE_MODEL").unwrap_or(defaults.image_model),
            speech_model: env::var("WORDBOOK_TTS_MODEL").unwrap_or(defaults.speech_model),
            chat_model: env::var("WORDBOOK_CHAT_MODEL").unwrap_or(defaults.chat_model),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }
}
