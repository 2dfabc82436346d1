//! Scripted service doubles with call counters

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use wordbook_genai::{
    ChatModel, ContentPart, GenAiError, ImageGenerator, SpeechSynthesizer, TextGenerator,
};
use wordbook_types::{ChatMessage, Example, WordEntry};

pub fn sample_entry(id: &str, word: &str) -> WordEntry {
    WordEntry {
        id: id.to_string(),
        word: word.to_string(),
        definition: format!("meaning of {word}"),
        examples: vec![Example {
            target: format!("{word}!"),
            native: format!("¡{word}!"),
        }],
        usage: "everyday".to_string(),
        image_url: None,
        target_lang: "en".to_string(),
        native_lang: "es".to_string(),
    }
}

pub const HELLO_JSON: &str = r#"{"word":"hello","definition":"a greeting","examples":[{"target":"Hello!","native":"¡Hola!"}],"usage":"casual greeting"}"#;

/// Replies with `reply` (or fails when `None`) and records prompts
pub struct MockText {
    reply: Option<String>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl MockText {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().ok().and_then(|p| p.last().cloned())
    }

    fn answer(&self, prompt: &str) -> Result<String, GenAiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.reply
            .clone()
            .ok_or_else(|| GenAiError::ApiError("HTTP 500".to_string()))
    }
}

#[async_trait]
impl TextGenerator for MockText {
    async fn generate_json(
        &self,
        prompt: &str,
        _schema: &serde_json::Value,
    ) -> Result<String, GenAiError> {
        self.answer(prompt)
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenAiError> {
        self.answer(prompt)
    }
}

pub struct MockImages {
    parts: Option<Vec<ContentPart>>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl MockImages {
    pub fn returning(parts: Vec<ContentPart>) -> Self {
        Self {
            parts: Some(parts),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            parts: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for MockImages {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<ContentPart>, GenAiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.parts
            .clone()
            .ok_or_else(|| GenAiError::ApiError("HTTP 503".to_string()))
    }
}

/// Chat double that remembers the history length of each call
pub struct MockChat {
    reply: Option<String>,
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<(String, usize)>>,
}

impl MockChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for MockChat {
    async fn chat(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
        _message: &str,
    ) -> Result<String, GenAiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push((system_instruction.to_string(), history.len()));
        }
        self.reply.clone().ok_or(GenAiError::EmptyResponse)
    }
}

/// Speech double returning a fixed base64 payload
pub struct MockSpeech {
    payload: Option<String>,
    pub calls: AtomicUsize,
    pub texts: Mutex<Vec<String>>,
}

impl MockSpeech {
    pub fn returning(payload_b64: &str) -> Self {
        Self {
            payload: Some(payload_b64.to_string()),
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            payload: None,
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, text: &str, _voice: &str) -> Result<String, GenAiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut texts) = self.texts.lock() {
            texts.push(text.to_string());
        }
        self.payload.clone().ok_or(GenAiError::EmptyResponse)
    }
}
