pub mod error;
pub mod fetcher;
pub mod language;
pub mod notebook;
pub mod profile;
pub mod storage;
pub mod story;
pub mod study;
pub mod tutor;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{LookupError, StorageError};
pub use fetcher::EntryFetcher;
pub use language::LanguagePair;
pub use notebook::{Notebook, NotebookStore, Toggle};
pub use profile::{load_profile, save_profile};
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use story::StoryComposer;
pub use study::StudyNavigator;
pub use tutor::TutorSession;
