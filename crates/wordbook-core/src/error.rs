use wordbook_genai::GenAiError;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Query is empty")]
    EmptyQuery,

    /// Text service answered with something that is not the entry schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Text service failed: {0}")]
    Service(#[from] GenAiError),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}
