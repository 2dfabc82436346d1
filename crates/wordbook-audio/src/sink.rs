#[cfg(any(test, feature = "mock"))]
use std::sync::Mutex;

use crate::{AudioBuffer, AudioError};

/// Output context that decoded buffers are scheduled on.
///
/// Every `play` call starts an independent voice immediately; overlapping
/// calls overlap.
pub trait AudioSink: Send + Sync {
    fn play(&self, buffer: AudioBuffer) -> Result<(), AudioError>;

    fn sample_rate(&self) -> u32;
}

/// Logs each buffer and lets it go. Used when no output device is wanted.
pub struct DiscardSink {
    sample_rate: u32,
}

impl DiscardSink {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl AudioSink for DiscardSink {
    fn play(&self, buffer: AudioBuffer) -> Result<(), AudioError> {
        tracing::debug!(
            "Discarded {} frames ({:.2}s) of speech",
            buffer.frame_count(),
            buffer.duration_secs()
        );
        Ok(())
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Keeps every scheduled buffer in memory for later inspection
#[cfg(any(test, feature = "mock"))]
pub struct RecordingSink {
    sample_rate: u32,
    played: Mutex<Vec<AudioBuffer>>,
}

#[cfg(any(test, feature = "mock"))]
impl RecordingSink {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            played: Mutex::new(Vec::new()),
        }
    }

    pub fn played(&self) -> Vec<AudioBuffer> {
        self.played
            .lock()
            .map(|played| played.clone())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "mock"))]
impl AudioSink for RecordingSink {
    fn play(&self, buffer: AudioBuffer) -> Result<(), AudioError> {
        self.played
            .lock()
            .map_err(|_| AudioError::Device("recording sink poisoned".to_string()))?
            .push(buffer);
        Ok(())
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

#[cfg(feature = "device-audio")]
pub use device::DeviceSink;

#[cfg(feature = "device-audio")]
mod device {
    use std::sync::{Arc, Mutex, mpsc};

    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

    use crate::{AudioBuffer, AudioError, AudioSink};

    struct Voice {
        buffer: AudioBuffer,
        position: usize,
    }

    /// Default output device, opened once at a fixed rate.
    ///
    /// `cpal::Stream` is not `Send` on every platform, so the stream lives on
    /// its own thread for the rest of the process.
    pub struct DeviceSink {
        sample_rate: u32,
        voices: Arc<Mutex<Vec<Voice>>>,
    }

    impl DeviceSink {
        pub fn open(sample_rate: u32, channels: u16) -> Result<Self, AudioError> {
            if channels == 0 {
                return Err(AudioError::Device("output needs at least one channel".to_string()));
            }
            let voices: Arc<Mutex<Vec<Voice>>> = Arc::new(Mutex::new(Vec::new()));
            let (ready_tx, ready_rx) = mpsc::channel::<Result<(), AudioError>>();

            let stream_voices = voices.clone();
            std::thread::Builder::new()
                .name("wordbook-audio".to_string())
                .spawn(move || {
                    let stream = match build_stream(sample_rate, channels, stream_voices) {
                        Ok(stream) => stream,
                        Err(e) => {
                            let _ = ready_tx.send(Err(e));
                            return;
                        }
                    };
                    let _ = ready_tx.send(Ok(()));

                    // Process-lifetime stream
                    let _stream = stream;
                    loop {
                        std::thread::park();
                    }
                })
                .map_err(|e| AudioError::Device(e.to_string()))?;

            ready_rx
                .recv()
                .map_err(|_| AudioError::Device("audio thread exited".to_string()))??;

            tracing::info!("Opened output device at {} Hz", sample_rate);
            Ok(Self {
                sample_rate,
                voices,
            })
        }
    }

    fn build_stream(
        sample_rate: u32,
        channels: u16,
        voices: Arc<Mutex<Vec<Voice>>>,
    ) -> Result<cpal::Stream, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::Device("no output device".to_string()))?;

        let config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };
        let out_channels = channels as usize;

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    data.fill(0.0);
                    let Ok(mut voices) = voices.lock() else {
                        return;
                    };

                    for frame in data.chunks_mut(out_channels) {
                        for voice in voices.iter_mut() {
                            if voice.position >= voice.buffer.frame_count() {
                                continue;
                            }
                            let source_channels = voice.buffer.channel_count();
                            for (c, sample) in frame.iter_mut().enumerate() {
                                *sample += voice.buffer.channels[c % source_channels][voice.position];
                            }
                            voice.position += 1;
                        }
                        for sample in frame.iter_mut() {
                            *sample = sample.clamp(-1.0, 1.0);
                        }
                    }

                    voices.retain(|v| v.position < v.buffer.frame_count());
                },
                |e| tracing::error!("Output stream error: {}", e),
                None,
            )
            .map_err(|e| AudioError::Device(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::Device(e.to_string()))?;
        Ok(stream)
    }

    impl AudioSink for DeviceSink {
        fn play(&self, buffer: AudioBuffer) -> Result<(), AudioError> {
            if buffer.is_empty() {
                return Ok(());
            }
            if buffer.sample_rate != self.sample_rate {
                tracing::warn!(
                    "Playing {} Hz buffer on {} Hz device without resampling",
                    buffer.sample_rate,
                    self.sample_rate
                );
            }

            self.voices
                .lock()
                .map_err(|_| AudioError::Device("voice list poisoned".to_string()))?
                .push(Voice {
                    buffer,
                    position: 0,
                });
            Ok(())
        }

        fn sample_rate(&self) -> u32 {
            self.sample_rate
        }
    }
}
