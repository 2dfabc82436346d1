use std::sync::Arc;

use wordbook_genai::ChatModel;
use wordbook_types::{ChatMessage, WordEntry};

use crate::language::LanguagePair;

/// Shown in place of the model's answer when the turn fails
pub const TUTOR_FALLBACK: &str = "Sorry, I couldn't answer that right now. Please try again.";

/// One question/answer exchange about the displayed entry.
///
/// Each call opens a fresh conversation; continuity comes only from the
/// transcript the caller passes in.
pub struct TutorSession {
    chat: Arc<dyn ChatModel>,
}

impl TutorSession {
    pub fn new(chat: Arc<dyn ChatModel>) -> Self {
        Self { chat }
    }

    /// Returns `None` for blank questions without issuing a request.
    /// Service failures come back as [`TUTOR_FALLBACK`].
    pub async fn ask(
        &self,
        question: &str,
        entry: &WordEntry,
        pair: &LanguagePair,
        history: &[ChatMessage],
    ) -> Option<ChatMessage> {
        if !is_askable(question) {
            return None;
        }

        let instruction = system_instruction(entry, pair);
        let reply = match self.chat.chat(&instruction, history, question.trim()).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!("Tutor returned an empty reply about '{}'", entry.word);
                TUTOR_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::warn!("Tutor turn about '{}' failed: {}", entry.word, e);
                TUTOR_FALLBACK.to_string()
            }
        };

        Some(ChatMessage::model(reply))
    }
}

pub fn is_askable(question: &str) -> bool {
    !question.trim().is_empty()
}

pub fn system_instruction(entry: &WordEntry, pair: &LanguagePair) -> String {
    let target = pair.target_label();
    let native = pair.native_label();

    format!(
        "You are a patient {target} tutor for a native {native} speaker. \
         The student is studying the {target} word \"{word}\", defined as: {definition}. \
         Answer questions about this word, its grammar, nuance and usage. \
         Reply mostly in {native}, quoting {target} where helpful, and keep answers short.",
        word = entry.word,
        definition = entry.definition,
    )
}
