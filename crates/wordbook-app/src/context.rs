use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;
use wordbook_audio::PlaybackScheduler;
use wordbook_config::Config;
use wordbook_core::{EntryFetcher, StoryComposer, TutorSession};
use wordbook_genai::GeminiClient;
use wordbook_genai::gemini::GeminiModels;
use wordbook_types::View;

use crate::events::AppEvent;

/// Components the handlers dispatch work to
#[derive(Clone)]
pub struct Services {
    pub fetcher: Arc<EntryFetcher>,
    pub tutor: Arc<TutorSession>,
    pub composer: Arc<StoryComposer>,
    /// `None` when this build cannot play audio
    pub playback: Option<Arc<PlaybackScheduler>>,
    pub voice: String,
}

impl Services {
    /// Wire every component to one Gemini client
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let genai = &config.genai;
        if genai.api_key.is_empty() {
            tracing::warn!("GEMINI_API_KEY is not set; every service call will fail");
        }

        let client = Arc::new(GeminiClient::new(
            genai.api_key.clone(),
            genai.api_url.clone(),
            GeminiModels {
                text: genai.text_model.clone(),
                image: genai.image_model.clone(),
                speech: genai.speech_model.clone(),
                chat: genai.chat_model.clone(),
            },
            Duration::from_secs(genai.request_timeout_seconds),
        )?);

        let playback = if config.audio.headless {
            tracing::info!("Audio output disabled; speech is decoded but not played");
            Some(PlaybackScheduler::headless(client.clone()))
        } else {
            device_playback(client.clone(), config.audio.sample_rate, config.audio.channels)
        };

        Ok(Self {
            fetcher: Arc::new(EntryFetcher::new(client.clone(), client.clone())),
            tutor: Arc::new(TutorSession::new(client.clone())),
            composer: Arc::new(StoryComposer::new(client, config.story.target_words)),
            playback: playback.map(Arc::new),
            voice: config.audio.voice.clone(),
        })
    }
}

#[cfg(feature = "device-audio")]
fn device_playback(
    speech: Arc<GeminiClient>,
    sample_rate: u32,
    channels: u16,
) -> Option<PlaybackScheduler> {
    use wordbook_audio::{AudioError, AudioSink, DeviceSink};

    Some(PlaybackScheduler::new(
        speech,
        Arc::new(move || {
            let sink = DeviceSink::open(sample_rate, channels)?;
            Ok::<_, AudioError>(Arc::new(sink) as Arc<dyn AudioSink>)
        }),
    ))
}

#[cfg(not(feature = "device-audio"))]
fn device_playback(
    _speech: Arc<GeminiClient>,
    _sample_rate: u32,
    _channels: u16,
) -> Option<PlaybackScheduler> {
    tracing::warn!(
        "Built without the device-audio feature; `speak` is unavailable (use --headless-audio to exercise synthesis)"
    );
    None
}

/// Shared handles every event handler needs
#[derive(Clone)]
pub struct EventContext {
    pub services: Services,
    /// Completions of spawned requests come back through here
    pub events_tx: AsyncSender<AppEvent>,
    pub views_tx: AsyncSender<View>,
    pub cancel: CancellationToken,
}

impl EventContext {
    pub fn new(
        services: Services,
        events_tx: AsyncSender<AppEvent>,
        views_tx: AsyncSender<View>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            services,
            events_tx,
            views_tx,
            cancel,
        }
    }

    pub async fn show(&self, view: View) -> anyhow::Result<()> {
        self.views_tx.send(view).await?;
        Ok(())
    }

    pub async fn status(&self, message: impl Into<String>) -> anyhow::Result<()> {
        self.show(View::Status(message.into())).await
    }
}
