use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;
use wordbook_genai::{ContentPart, ImageGenerator, TextGenerator};
use wordbook_types::{Example, WordEntry};

use crate::error::LookupError;
use crate::language::LanguagePair;

/// Shape the text service is constrained to
#[derive(Debug, Clone, Deserialize)]
pub struct EntryPayload {
    pub word: String,
    pub definition: String,
    pub examples: Vec<Example>,
    pub usage: String,
}

/// Builds one `WordEntry` from a text request followed by an image request.
///
/// The image prompt includes the generated definition, so the two calls are
/// strictly sequential.
pub struct EntryFetcher {
    text: Arc<dyn TextGenerator>,
    images: Arc<dyn ImageGenerator>,
}

impl EntryFetcher {
    pub fn new(text: Arc<dyn TextGenerator>, images: Arc<dyn ImageGenerator>) -> Self {
        Self { text, images }
    }

    pub async fn lookup(&self, query: &str, pair: &LanguagePair) -> Result<WordEntry, LookupError> {
        if query.trim().is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let raw = self
            .text
            .generate_json(&lookup_prompt(query, pair), &entry_schema())
            .await?;
        let payload = parse_entry_payload(&raw)?;
        tracing::debug!(
            "Parsed entry for '{}' with {} examples",
            query,
            payload.examples.len()
        );

        let image_url = self.illustrate(query, &payload.definition).await;

        Ok(WordEntry {
            id: Uuid::new_v4().to_string(),
            word: query.to_string(),
            definition: payload.definition,
            examples: payload.examples,
            usage: payload.usage,
            image_url,
            target_lang: pair.target_code(),
            native_lang: pair.native_code(),
        })
    }

    /// Missing images are not an error
    async fn illustrate(&self, query: &str, definition: &str) -> Option<String> {
        match self.images.generate_image(&image_prompt(query, definition)).await {
            Ok(parts) => {
                let image = first_inline_image(&parts);
                if image.is_none() {
                    tracing::debug!("Image response for '{}' had no inline image", query);
                }
                image
            }
            Err(e) => {
                tracing::warn!("Image generation failed for '{}': {}", query, e);
                None
            }
        }
    }
}

pub fn entry_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "word": { "type": "STRING" },
            "definition": { "type": "STRING" },
            "examples": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "target": { "type": "STRING" },
                        "native": { "type": "STRING" }
                    },
                    "required": ["target", "native"]
                }
            },
            "usage": { "type": "STRING" }
        },
        "required": ["word", "definition", "examples", "usage"]
    })
}

pub fn lookup_prompt(query: &str, pair: &LanguagePair) -> String {
    let target = pair.target_label();
    let native = pair.native_label();

    format!(
        "The user is a native {native} speaker learning {target}. \
         Explain the {target} word or phrase \"{query}\".\n\
         - definition: a short, friendly explanation written in {native}\n\
         - examples: two or three natural sentences in {target}, each with a {native} translation\n\
         - usage: a brief note in {native} on register, nuance or cultural context\n\
         Answer with JSON only."
    )
}

pub fn image_prompt(query: &str, definition: &str) -> String {
    format!(
        "A simple, colorful illustration that conveys the meaning of \"{query}\" ({definition}). \
         No text or letters in the image."
    )
}

/// Parse the text service answer against the entry shape.
///
/// Tolerates a surrounding markdown code fence; anything else that is not
/// exactly the schema is `MalformedResponse`.
pub fn parse_entry_payload(raw: &str) -> Result<EntryPayload, LookupError> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    if body.is_empty() {
        return Err(LookupError::MalformedResponse("empty response".to_string()));
    }

    serde_json::from_str(body).map_err(|e| LookupError::MalformedResponse(e.to_string()))
}

/// First part carrying inline image data, as a `data:` URI
pub fn first_inline_image(parts: &[ContentPart]) -> Option<String> {
    parts.iter().find_map(ContentPart::as_data_uri)
}
