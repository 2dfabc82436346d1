use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use wordbook_types::{ChatMessage, Role};

use crate::{ChatModel, ContentPart, GenAiError, ImageGenerator, SpeechSynthesizer, TextGenerator};

/// Model names used for each kind of request
#[derive(Debug, Clone)]
pub struct GeminiModels {
    pub text: String,
    pub image: String,
    pub speech: String,
    pub chat: String,
}

/// Client for the Gemini `generateContent` REST endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    models: GeminiModels,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        api_url: String,
        models: GeminiModels,
        timeout: Duration,
    ) -> Result<Self, GenAiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            models,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_url, model)
    }

    async fn generate(&self, model: &str, body: Value) -> Result<GenerateContentResponse, GenAiError> {
        if self.api_key.is_empty() {
            return Err(GenAiError::AuthenticationError);
        }

        tracing::debug!("Gemini request to {}", model);

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(GenAiError::AuthenticationError);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, GenAiError> {
        let response = self
            .generate(&self.models.text, structured_body(prompt, schema))
            .await?;
        response.text().ok_or(GenAiError::EmptyResponse)
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenAiError> {
        let response = self.generate(&self.models.text, text_body(prompt)).await?;
        response.text().ok_or(GenAiError::EmptyResponse)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<ContentPart>, GenAiError> {
        let response = self.generate(&self.models.image, image_body(prompt)).await?;
        Ok(response.into_parts())
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiClient {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<String, GenAiError> {
        let response = self
            .generate(&self.models.speech, speech_body(text, voice))
            .await?;

        response
            .into_parts()
            .into_iter()
            .find_map(|part| match part {
                ContentPart::InlineData { data, .. } if !data.is_empty() => Some(data),
                _ => None,
            })
            .ok_or(GenAiError::EmptyResponse)
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn chat(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, GenAiError> {
        let response = self
            .generate(
                &self.models.chat,
                chat_body(system_instruction, history, message),
            )
            .await?;
        response.text().ok_or(GenAiError::EmptyResponse)
    }
}

fn user_content(text: &str) -> Value {
    json!({ "role": "user", "parts": [{ "text": text }] })
}

fn structured_body(prompt: &str, schema: &Value) -> Value {
    json!({
        "contents": [user_content(prompt)],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema,
        }
    })
}

fn text_body(prompt: &str) -> Value {
    json!({ "contents": [user_content(prompt)] })
}

fn image_body(prompt: &str) -> Value {
    json!({
        "contents": [user_content(prompt)],
        "generationConfig": { "responseModalities": ["IMAGE", "TEXT"] }
    })
}

fn speech_body(text: &str, voice: &str) -> Value {
    json!({
        "contents": [user_content(text)],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": voice } }
            }
        }
    })
}

fn chat_body(system_instruction: &str, history: &[ChatMessage], message: &str) -> Value {
    let mut contents: Vec<Value> = history
        .iter()
        .map(|m| {
            let role = match m.role {
                Role::User => "user",
                Role::Model => "model",
            };
            json!({ "role": role, "parts": [{ "text": m.text }] })
        })
        .collect();
    contents.push(user_content(message));

    json!({
        "systemInstruction": { "parts": [{ "text": system_instruction }] },
        "contents": contents,
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateContentResponse {
    /// Parts of the first candidate
    fn into_parts(self) -> Vec<ContentPart> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| match (part.inline_data, part.text) {
                        (Some(inline), _) => Some(ContentPart::InlineData {
                            mime_type: inline.mime_type,
                            data: inline.data,
                        }),
                        (None, Some(text)) => Some(ContentPart::Text(text)),
                        (None, None) => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Concatenated text of the first candidate, `None` when blank
    fn text(self) -> Option<String> {
        let text: String = self
            .into_parts()
            .into_iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) => Some(text),
                ContentPart::InlineData { .. } => None,
            })
            .collect();

        if text.trim().is_empty() { None } else { Some(text) }
    }
}
