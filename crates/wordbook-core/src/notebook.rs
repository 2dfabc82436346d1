use std::ops::Deref;
use std::sync::Arc;

use wordbook_types::WordEntry;

use crate::error::StorageError;
use crate::storage::{BlobStore, NOTEBOOK_KEY};

/// Outcome of saving an entry that may already be in the notebook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Saved,
    Removed,
}

/// Saved entries in save order, unique by raw `word` (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotebookStore {
    entries: Vec<WordEntry>,
}

impl NotebookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted blob. Missing or unreadable blobs give an empty store.
    pub fn hydrate(blob: Option<&str>) -> Self {
        let Some(blob) = blob else {
            return Self::new();
        };

        match serde_json::from_str::<Vec<WordEntry>>(blob) {
            Ok(entries) => {
                let mut store = Self::new();
                for entry in entries {
                    // Keep the first occurrence if a hand-edited blob repeats a word
                    if !store.contains(&entry.word) {
                        store.entries.push(entry);
                    }
                }
                store
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable notebook: {}", e);
                Self::new()
            }
        }
    }

    /// Unsave when `entry.word` is already present, otherwise append
    pub fn toggle(&mut self, entry: WordEntry) -> Toggle {
        if let Some(pos) = self.entries.iter().position(|e| e.word == entry.word) {
            self.entries.remove(pos);
            Toggle::Removed
        } else {
            self.entries.push(entry);
            Toggle::Saved
        }
    }

    /// Returns whether anything was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.iter().any(|e| e.word == word)
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn words(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.word.clone()).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }
}

/// Notebook bound to its persisted blob.
///
/// Every mutation rewrites the whole blob. The in-memory change is kept even
/// when the write fails; the error only reports that persistence lagged.
pub struct Notebook {
    store: NotebookStore,
    blobs: Arc<dyn BlobStore>,
}

impl Notebook {
    pub fn load(blobs: Arc<dyn BlobStore>) -> Self {
        let blob = blobs.read(NOTEBOOK_KEY).unwrap_or_else(|e| {
            tracing::warn!("Could not read notebook: {}", e);
            None
        });
        let store = NotebookStore::hydrate(blob.as_deref());
        tracing::info!("Loaded notebook with {} entries", store.len());

        Self { store, blobs }
    }

    pub fn toggle(&mut self, entry: WordEntry) -> Result<Toggle, StorageError> {
        let outcome = self.store.toggle(entry);
        self.persist()?;
        Ok(outcome)
    }

    pub fn remove(&mut self, id: &str) -> Result<bool, StorageError> {
        let removed = self.store.remove(id);
        self.persist()?;
        Ok(removed)
    }

    /// Store the notebook persists into
    pub fn blobs(&self) -> &dyn BlobStore {
        self.blobs.as_ref()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let json = self.store.to_json()?;
        self.blobs.write(NOTEBOOK_KEY, &json)
    }
}

impl Deref for Notebook {
    type Target = NotebookStore;

    fn deref(&self) -> &NotebookStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::sample_entry;
    use crate::storage::MemoryBlobStore;

    #[test]
    fn test_toggle_appends_at_end() {
        let mut store = NotebookStore::new();
        assert_eq!(store.toggle(sample_entry("1", "b")), Toggle::Saved);
        assert_eq!(store.toggle(sample_entry("2", "a")), Toggle::Saved);

        assert_eq!(store.words(), vec!["b", "a"]);
        assert!(store.contains("a"));
    }

    #[test]
    fn test_toggle_twice_restores_store() {
        let mut store = NotebookStore::new();
        store.toggle(sample_entry("1", "gato"));
        store.toggle(sample_entry("2", "perro"));
        let before = store.clone();

        assert_eq!(store.toggle(sample_entry("3", "casa")), Toggle::Saved);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(2).unwrap().word, "casa");

        // Different id, same word: still an unsave
        assert_eq!(store.toggle(sample_entry("4", "casa")), Toggle::Removed);
        assert_eq!(store, before);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut store = NotebookStore::new();
        store.toggle(sample_entry("1", "Hello"));
        store.toggle(sample_entry("2", "hello"));
        store.toggle(sample_entry("3", "hello "));

        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = NotebookStore::new();
        store.toggle(sample_entry("1", "a"));
        store.toggle(sample_entry("2", "b"));

        assert!(store.remove("1"));
        assert!(!store.remove("1"));
        assert!(!store.remove("missing"));
        assert_eq!(store.words(), vec!["b"]);
    }

    #[test]
    fn test_hydrate_tolerates_garbage() {
        assert!(NotebookStore::hydrate(None).is_empty());
        assert!(NotebookStore::hydrate(Some("{not json")).is_empty());
        assert!(NotebookStore::hydrate(Some(r#"{"word":"x"}"#)).is_empty());
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let mut notebook = Notebook::load(blobs.clone());
        assert!(notebook.is_empty());

        notebook.toggle(sample_entry("1", "uno")).unwrap();
        notebook.toggle(sample_entry("2", "dos")).unwrap();
        let reloaded = Notebook::load(blobs.clone());
        assert_eq!(reloaded.words(), vec!["uno", "dos"]);

        notebook.remove("1").unwrap();
        let reloaded = Notebook::load(blobs.clone());
        assert_eq!(reloaded.words(), vec!["dos"]);
        assert_eq!(reloaded.entries(), notebook.entries());
    }
}
