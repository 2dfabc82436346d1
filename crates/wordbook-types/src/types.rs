use serde::{Deserialize, Deserializer, Serialize};

pub type LanguageCode = String;

/// Monotonic request number used to drop stale completions
pub type Seq = u64;

/// One example sentence with its native-language translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub target: String,
    pub native: String,
}

/// A looked-up or saved lexical item.
///
/// Entries are never edited after creation; the notebook only adds and removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: String,
    /// Raw query string, verbatim. Also the notebook dedup key.
    pub word: String,
    pub definition: String,
    pub examples: Vec<Example>,
    pub usage: String,
    /// `data:` URI of the illustration
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    pub target_lang: LanguageCode,
    pub native_lang: LanguageCode,
}

impl WordEntry {
    /// Example shown on the flashcard. Entries may carry no examples at all.
    pub fn primary_example(&self) -> Option<&Example> {
        self.examples.first()
    }

    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Language pair chosen during onboarding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupProfile {
    #[serde(rename = "native")]
    pub native_lang: LanguageCode,
    #[serde(rename = "target")]
    pub target_lang: LanguageCode,
}

/// Catalog row used to turn a code into a prompt label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

/// What `speak` should read aloud
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakTarget {
    Word,
    Example,
    Reply,
}

/// Commands coming from the terminal front-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Setup { native: String, target: String },
    Languages,
    Lookup(String),
    Save,
    Notebook,
    Remove(String),
    /// 1-based notebook position
    Open(usize),
    Ask(String),
    Speak(SpeakTarget),
    Study,
    Next,
    Previous,
    Flip,
    Story,
    Help,
    Quit,
}

/// Everything the front-end knows how to draw
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    SetupRequired,
    Status(String),
    Loading(String),
    /// Loading finished without a result
    Idle,
    Entry { entry: WordEntry, saved: bool },
    Notebook(Vec<WordEntry>),
    ChatReply(ChatMessage),
    Card {
        position: usize,
        total: usize,
        entry: WordEntry,
        flipped: bool,
    },
    EmptyStudy,
    Story(String),
    Languages(Vec<Language>),
    Help,
}
