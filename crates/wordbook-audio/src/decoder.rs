use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::AudioError;

/// Speech service output: mono PCM16 at 24 kHz
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;
pub const SPEECH_CHANNELS: usize = 1;

/// Planar, normalized audio ready for playback
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub sample_rate: u32,
    /// One vector per channel, all of equal length
    pub channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f32 / self.sample_rate as f32
    }
}

/// Decode headerless little-endian signed 16-bit PCM, interleaved by channel.
///
/// Frame count is `(len / 2) / channel_count`; a trailing odd byte and a
/// trailing partial frame are dropped.
pub fn decode(payload: &[u8], sample_rate: u32, channel_count: usize) -> AudioBuffer {
    if channel_count == 0 {
        return AudioBuffer {
            sample_rate,
            channels: Vec::new(),
        };
    }

    let samples: Vec<i16> = payload
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let frame_count = samples.len() / channel_count;

    let channels = (0..channel_count)
        .map(|c| {
            (0..frame_count)
                .map(|i| samples[i * channel_count + c] as f32 / 32768.0)
                .collect()
        })
        .collect();

    AudioBuffer {
        sample_rate,
        channels,
    }
}

/// Decode the speech service's base64 payload
pub fn decode_base64(
    payload: &str,
    sample_rate: u32,
    channel_count: usize,
) -> Result<AudioBuffer, AudioError> {
    let bytes = BASE64.decode(payload.trim())?;
    if bytes.is_empty() {
        return Err(AudioError::Empty);
    }
    Ok(decode(&bytes, sample_rate, channel_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcm(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn test_boundary_values_are_exact() {
        let buffer = decode(&pcm(&[i16::MIN, 0, i16::MAX]), 24_000, 1);

        assert_eq!(buffer.channels[0][0], -1.0);
        assert_eq!(buffer.channels[0][1], 0.0);
        assert_eq!(buffer.channels[0][2], 32767.0 / 32768.0);
        assert!(buffer.channels[0][2] < 1.0);
    }

    #[test]
    fn test_frame_count_truncates() {
        for (len, channels) in [(0usize, 1usize), (1, 1), (2, 1), (7, 1), (10, 2), (12, 2), (14, 3), (18, 3)] {
            let payload = vec![0u8; len];
            let buffer = decode(&payload, 24_000, channels);
            assert_eq!(
                buffer.frame_count(),
                len / 2 / channels,
                "len={len} channels={channels}"
            );
            assert_eq!(buffer.channel_count(), channels);
        }
    }

    #[test]
    fn test_channels_are_deinterleaved_in_order() {
        // L R L R L (trailing partial frame)
        let buffer = decode(&pcm(&[100, -100, 200, -200, 300]), 48_000, 2);

        assert_eq!(buffer.frame_count(), 2);
        assert_eq!(buffer.channels[0], vec![100.0 / 32768.0, 200.0 / 32768.0]);
        assert_eq!(buffer.channels[1], vec![-100.0 / 32768.0, -200.0 / 32768.0]);
        assert_eq!(buffer.sample_rate, 48_000);
    }

    #[test]
    fn test_zero_channels_yields_empty_buffer() {
        let buffer = decode(&pcm(&[1, 2, 3]), 24_000, 0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.channel_count(), 0);
    }

    #[test]
    fn test_base64_payload() {
        let encoded = BASE64.encode(pcm(&[16384, -16384]));
        let buffer = decode_base64(&encoded, 24_000, 1).unwrap();
        assert_eq!(buffer.channels[0], vec![0.5, -0.5]);
        assert!((buffer.duration_secs() - 2.0 / 24_000.0).abs() < f32::EPSILON);

        assert!(matches!(decode_base64("", 24_000, 1), Err(AudioError::Empty)));
        assert!(matches!(
            decode_base64("not base64!", 24_000, 1),
            Err(AudioError::Base64(_))
        ));
    }
}
