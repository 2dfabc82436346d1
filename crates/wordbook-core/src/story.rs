use std::sync::Arc;

use wordbook_genai::TextGenerator;

/// Fewest saved words a story is composed from
pub const MIN_STORY_WORDS: usize = 2;

pub const STORY_FALLBACK: &str = "The story could not be written this time. Please try again.";

pub fn can_compose(word_count: usize) -> bool {
    word_count >= MIN_STORY_WORDS
}

/// Short bilingual narrative woven from saved words
pub struct StoryComposer {
    text: Arc<dyn TextGenerator>,
    target_words: u32,
}

impl StoryComposer {
    pub fn new(text: Arc<dyn TextGenerator>, target_words: u32) -> Self {
        Self { text, target_words }
    }

    /// Callers check [`can_compose`] first. The reply is returned verbatim;
    /// failures come back as [`STORY_FALLBACK`].
    pub async fn compose(&self, words: &[String], target_label: &str, native_label: &str) -> String {
        let prompt = story_prompt(words, target_label, native_label, self.target_words);

        match self.text.generate_text(&prompt).await {
            Ok(story) if !story.trim().is_empty() => story,
            Ok(_) => {
                tracing::warn!("Story service returned nothing");
                STORY_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::warn!("Story composition failed: {}", e);
                STORY_FALLBACK.to_string()
            }
        }
    }
}

pub fn story_prompt(words: &[String], target_label: &str, native_label: &str, target_words: u32) -> String {
    format!(
        "Write a short, light-hearted story in {target_label} of about {target_words} words \
         that uses every one of these words: {list}. \
         After each paragraph give its {native_label} translation.",
        list = words.join(", "),
    )
}
