use wordbook_types::ChatMessage;

pub mod gemini;

pub use gemini::GeminiClient;

/// Structured (JSON-constrained) and free-form text generation
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text constrained to `schema`. Returns the raw model text,
    /// which the caller still has to parse.
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, GenAiError>;

    /// Generate unconstrained text
    async fn generate_text(&self, prompt: &str) -> Result<String, GenAiError>;
}

/// Illustration provider
#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns every output part; at most one is expected to carry image bytes.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<ContentPart>, GenAiError>;
}

/// Text-to-speech provider
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Base64-encoded raw PCM16 mono audio
    async fn synthesize(&self, text: &str, voice: &str) -> Result<String, GenAiError>;
}

/// Single conversational turn
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, GenAiError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    /// Base64 payload as delivered by the service
    InlineData { mime_type: String, data: String },
}

impl ContentPart {
    /// `data:` URI for inline payloads
    pub fn as_data_uri(&self) -> Option<String> {
        match self {
            ContentPart::InlineData { mime_type, data } if !data.is_empty() => {
                Some(format!("data:{mime_type};base64,{data}"))
            }
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Service returned no content")]
    EmptyResponse,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Malformed service payload: {0}")]
    DecodeError(#[from] serde_json::Error),
}
