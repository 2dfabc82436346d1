use std::sync::Arc;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use kanal::AsyncReceiver;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use wordbook_audio::{PlaybackScheduler, RecordingSink};
use wordbook_core::language::find;
use wordbook_core::mock::{MockChat, MockImages, MockSpeech, MockText};
use wordbook_core::{
    BlobStore, EntryFetcher, LanguagePair, MemoryBlobStore, Notebook, StorageError, StoryComposer,
    TutorSession,
};
use wordbook_types::View;

use crate::context::{EventContext, Services};
use crate::events::{AppEvent, handle_event};
use crate::state::AppState;

mod channel_tests;

/// Controller wired to scripted services and in-memory storage
pub struct Harness {
    pub state: AppState,
    pub ctx: EventContext,
    pub events_rx: AsyncReceiver<AppEvent>,
    pub views_rx: AsyncReceiver<View>,
    pub text: Arc<MockText>,
    pub images: Arc<MockImages>,
    pub chat: Arc<MockChat>,
    pub speech: Arc<MockSpeech>,
    pub sink: Arc<RecordingSink>,
    pub blobs: Arc<MemoryBlobStore>,
}

/// Reads nothing and refuses every write
pub struct ReadOnlyBlobStore;

impl BlobStore for ReadOnlyBlobStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::IoError(std::io::Error::other("read-only")))
    }
}

pub fn spanish_speaker_learning_english() -> LanguagePair {
    LanguagePair {
        native: find("es").unwrap(),
        target: find("en").unwrap(),
    }
}

impl Harness {
    pub fn new(text: MockText, images: MockImages, chat: MockChat) -> Self {
        let mut harness = Self::without_setup(text, images, chat);
        harness.state.pair = Some(spanish_speaker_learning_english());
        harness
    }

    pub fn without_setup(text: MockText, images: MockImages, chat: MockChat) -> Self {
        let text = Arc::new(text);
        let images = Arc::new(images);
        let chat = Arc::new(chat);
        // Two samples of PCM16 silence
        let speech = Arc::new(MockSpeech::returning(&BASE64.encode([0u8, 0, 0, 0])));
        let (playback, sink) = PlaybackScheduler::recording(speech.clone());

        let services = Services {
            fetcher: Arc::new(EntryFetcher::new(text.clone(), images.clone())),
            tutor: Arc::new(TutorSession::new(chat.clone())),
            composer: Arc::new(StoryComposer::new(text.clone(), 150)),
            playback: Some(Arc::new(playback)),
            voice: "Kore".to_string(),
        };

        let (events_tx, events_rx) = kanal::bounded_async(64);
        let (views_tx, views_rx) = kanal::bounded_async(256);
        let ctx = EventContext::new(services, events_tx, views_tx, CancellationToken::new());

        let blobs = Arc::new(MemoryBlobStore::new());
        let state = AppState::new(None, Notebook::load(blobs.clone()));

        Self {
            state,
            ctx,
            events_rx,
            views_rx,
            text,
            images,
            chat,
            speech,
            sink,
            blobs,
        }
    }

    pub async fn apply(&mut self, event: AppEvent) {
        handle_event(&mut self.state, &self.ctx, event).await.unwrap();
    }

    pub async fn command(&mut self, command: wordbook_types::UiCommand) {
        self.apply(AppEvent::Command(command)).await;
    }

    /// Next completion posted by a spawned request
    pub async fn completion(&self) -> AppEvent {
        timeout(Duration::from_secs(2), self.events_rx.recv())
            .await
            .expect("no completion arrived")
            .unwrap()
    }

    /// Wait for one completion and apply it
    pub async fn settle(&mut self) {
        let event = self.completion().await;
        self.apply(event).await;
    }

    pub fn views(&self) -> Vec<View> {
        let mut views = Vec::new();
        while let Ok(Some(view)) = self.views_rx.try_recv() {
            views.push(view);
        }
        views
    }
}
