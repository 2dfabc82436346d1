//! Speech playback
//!
//! - `decoder`: raw PCM16 payload to normalized floating point buffers
//! - `sink`: output back-ends a decoded buffer is handed to
//! - `playback`: lazily opened shared output context and the `speak` entry point

pub mod decoder;
pub mod playback;
pub mod sink;

pub use decoder::{AudioBuffer, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE, decode, decode_base64};
pub use playback::PlaybackScheduler;
pub use sink::{AudioSink, DiscardSink};

#[cfg(any(test, feature = "mock"))]
pub use sink::RecordingSink;

#[cfg(feature = "device-audio")]
pub use sink::DeviceSink;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Invalid base64 audio payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Speech service returned no audio")]
    Empty,

    #[error("Audio device error: {0}")]
    Device(String),

    #[error("Speech request failed: {0}")]
    Synthesis(#[from] wordbook_genai::GenAiError),
}
