use std::sync::Arc;

use tokio::sync::OnceCell;
use wordbook_genai::SpeechSynthesizer;

#[cfg(any(test, feature = "mock"))]
use crate::RecordingSink;
use crate::{AudioError, AudioSink, DiscardSink, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE, decode_base64};

pub type SinkFactory = Arc<dyn Fn() -> Result<Arc<dyn AudioSink>, AudioError> + Send + Sync>;

/// Turns text into speech on the shared output context.
///
/// The context is opened on first use and kept for the life of the process.
/// Speech is always decoded as the service emits it; the sink maps it onto
/// its own channel layout.
pub struct PlaybackScheduler {
    speech: Arc<dyn SpeechSynthesizer>,
    open_sink: SinkFactory,
    context: OnceCell<Arc<dyn AudioSink>>,
}

impl PlaybackScheduler {
    pub fn new(speech: Arc<dyn SpeechSynthesizer>, open_sink: SinkFactory) -> Self {
        Self {
            speech,
            open_sink,
            context: OnceCell::new(),
        }
    }

    /// Scheduler that synthesizes and decodes, then drops the audio
    pub fn headless(speech: Arc<dyn SpeechSynthesizer>) -> Self {
        let sink: Arc<dyn AudioSink> = Arc::new(DiscardSink::new(SPEECH_SAMPLE_RATE));
        Self::new(speech, Arc::new(move || Ok::<_, AudioError>(sink.clone())))
    }

    /// Scheduler that keeps every decoded buffer in memory
    #[cfg(any(test, feature = "mock"))]
    pub fn recording(speech: Arc<dyn SpeechSynthesizer>) -> (Self, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new(SPEECH_SAMPLE_RATE));
        let shared = sink.clone();
        let scheduler = Self::new(
            speech,
            Arc::new(move || Ok::<_, AudioError>(shared.clone() as Arc<dyn AudioSink>)),
        );
        (scheduler, sink)
    }

    pub fn is_open(&self) -> bool {
        self.context.initialized()
    }

    async fn context(&self) -> Result<&Arc<dyn AudioSink>, AudioError> {
        self.context
            .get_or_try_init(|| async {
                let open = self.open_sink.clone();
                tokio::task::spawn_blocking(move || open())
                    .await
                    .map_err(|e| AudioError::Device(e.to_string()))?
            })
            .await
    }

    /// Fire-and-forget playback. Failures are logged, never returned.
    pub async fn speak(&self, text: &str, voice: &str) {
        if let Err(e) = self.try_speak(text, voice).await {
            tracing::warn!("Speech playback skipped: {}", e);
        }
    }

    pub async fn try_speak(&self, text: &str, voice: &str) -> Result<(), AudioError> {
        let sink = self.context().await?;
        let payload = self.speech.synthesize(text, voice).await?;
        let buffer = decode_base64(&payload, SPEECH_SAMPLE_RATE, SPEECH_CHANNELS)?;

        tracing::debug!(
            "Scheduling {:.2}s of speech for '{}'",
            buffer.duration_secs(),
            text
        );
        sink.play(buffer)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
    use wordbook_genai::GenAiError;

    use super::*;

    struct FixedSpeech {
        payload: Option<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SpeechSynthesizer for FixedSpeech {
        async fn synthesize(&self, _text: &str, _voice: &str) -> Result<String, GenAiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payload.clone().ok_or(GenAiError::EmptyResponse)
        }
    }

    fn speech(payload: Option<&[u8]>) -> Arc<FixedSpeech> {
        Arc::new(FixedSpeech {
            payload: payload.map(|bytes| BASE64.encode(bytes)),
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_speak_decodes_and_plays() {
        let (scheduler, sink) = PlaybackScheduler::recording(speech(Some(&[0, 64, 0, 192])));

        scheduler.speak("hola", "Kore").await;

        let played = sink.played();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].channels[0], vec![0.5, -0.5]);
        assert_eq!(played[0].sample_rate, 24_000);
    }

    #[tokio::test]
    async fn test_stereo_device_keeps_speech_mono() {
        let device = Arc::new(RecordingSink::new(48_000));
        let shared = device.clone();
        let scheduler = PlaybackScheduler::new(
            speech(Some(&[0, 64, 0, 64, 0, 192, 0, 192])),
            Arc::new(move || Ok::<_, AudioError>(shared.clone() as Arc<dyn AudioSink>)),
        );

        scheduler.speak("hola", "Kore").await;

        let played = device.played();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].channel_count(), 1);
        assert_eq!(played[0].channels[0], vec![0.5, 0.5, -0.5, -0.5]);
        assert_eq!(played[0].sample_rate, SPEECH_SAMPLE_RATE);
    }

    #[tokio::test]
    async fn test_headless_drops_audio() {
        let service = speech(Some(&[0, 64]));
        let scheduler = PlaybackScheduler::headless(service.clone());

        assert!(scheduler.try_speak("hola", "Kore").await.is_ok());
        assert!(scheduler.is_open());
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_context_opens_once() {
        let opened = Arc::new(AtomicUsize::new(0));
        let sink = Arc::new(RecordingSink::new(24_000));

        let counter = opened.clone();
        let shared = sink.clone();
        let scheduler = PlaybackScheduler::new(
            speech(Some(&[1, 0])),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, AudioError>(shared.clone() as Arc<dyn AudioSink>)
            }),
        );

        assert!(!scheduler.is_open());
        scheduler.speak("a", "Kore").await;
        scheduler.speak("b", "Kore").await;
        scheduler.speak("c", "Kore").await;

        assert!(scheduler.is_open());
        assert_eq!(opened.load(Ordering::SeqCst), 1);
        assert_eq!(sink.played().len(), 3);
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let service = speech(None);
        let (scheduler, sink) = PlaybackScheduler::recording(service.clone());

        scheduler.speak("hola", "Kore").await;

        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert!(sink.played().is_empty());
        assert!(matches!(
            scheduler.try_speak("hola", "Kore").await,
            Err(AudioError::Synthesis(GenAiError::EmptyResponse))
        ));
    }

    #[tokio::test]
    async fn test_device_failure_skips_request() {
        let service = speech(Some(&[0, 0]));
        let scheduler = PlaybackScheduler::new(
            service.clone(),
            Arc::new(|| {
                Err::<Arc<dyn AudioSink>, _>(AudioError::Device("no output device".to_string()))
            }),
        );

        scheduler.speak("hola", "Kore").await;

        assert!(!scheduler.is_open());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }
}
