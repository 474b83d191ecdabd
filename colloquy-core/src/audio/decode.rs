//! Sample decoder: base64 payload → raw PCM bytes → `AudioBuffer`.
//!
//! ## Algorithm
//!
//! 1. Decode the base64 payload with the standard alphabet.
//! 2. Read the byte buffer two bytes at a time as signed 16-bit
//!    little-endian integers.
//! 3. Normalize each sample by dividing by 32768.0, yielding [-1.0, 1.0).
//! 4. De-interleave: frame `i`, channel `c` lives at byte offset
//!    `(i * channels + c) * 2`.
//!
//! Frame count floors: a stray trailing byte (or a trailing partial frame in
//! multi-channel input) is truncated rather than rejected.

use base64::Engine as _;
use tracing::{debug, warn};

use super::AudioBuffer;
use crate::error::{ColloquyError, Result};

/// Divisor for normalizing signed 16-bit samples. The negative bound of the
/// i16 range, so -32768 maps to exactly -1.0.
const I16_SCALE: f32 = 32_768.0;

/// Decode a base64 audio payload into raw bytes.
///
/// Deterministic: the same payload always yields byte-identical output.
///
/// # Errors
/// Returns `ColloquyError::Base64` on any invalid input character or bad
/// padding.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>> {
    Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
}

/// Interpret raw bytes as interleaved i16 LE PCM and de-interleave into an
/// `AudioBuffer`.
///
/// `sample_rate` and `channels` are taken on trust — the wire format carries
/// no self-description. Callers pass [`super::GENERATION_SAMPLE_RATE`] and
/// [`super::GENERATION_CHANNELS`].
///
/// # Errors
/// Returns `ColloquyError::EmptyAudio` when the buffer holds zero complete
/// frames. Callers must surface this as a failed generation, never as a
/// silent empty file.
pub fn decode_audio_data(bytes: &[u8], sample_rate: u32, channels: u16) -> Result<AudioBuffer> {
    let channels = channels.max(1) as usize;
    let frames = bytes.len() / 2 / channels;
    if frames == 0 {
        return Err(ColloquyError::EmptyAudio);
    }

    let consumed = frames * channels * 2;
    if consumed != bytes.len() {
        warn!(
            dropped_bytes = bytes.len() - consumed,
            "PCM payload is not a whole number of frames, truncating"
        );
    }

    let mut samples: Vec<Vec<f32>> = (0..channels).map(|_| Vec::with_capacity(frames)).collect();
    for frame in 0..frames {
        for (ch, out) in samples.iter_mut().enumerate() {
            let at = (frame * channels + ch) * 2;
            let raw = i16::from_le_bytes([bytes[at], bytes[at + 1]]);
            out.push(raw as f32 / I16_SCALE);
        }
    }

    debug!(frames, channels, sample_rate, "decoded PCM payload");
    Ok(AudioBuffer::new(sample_rate, samples))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::audio::{GENERATION_CHANNELS, GENERATION_SAMPLE_RATE};

    #[test]
    fn base64_decode_is_deterministic() {
        let payload = base64::engine::general_purpose::STANDARD.encode([1u8, 2, 3, 4, 5, 6]);
        let a = decode_base64(&payload).unwrap();
        let b = decode_base64(&payload).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn invalid_base64_is_rejected() {
        assert!(matches!(
            decode_base64("not@valid!"),
            Err(ColloquyError::Base64(_))
        ));
    }

    #[test]
    fn empty_payload_decodes_to_zero_bytes_then_fails_as_audio() {
        let bytes = decode_base64("").unwrap();
        assert!(bytes.is_empty());
        assert!(matches!(
            decode_audio_data(&bytes, GENERATION_SAMPLE_RATE, GENERATION_CHANNELS),
            Err(ColloquyError::EmptyAudio)
        ));
    }

    #[test]
    fn known_extremes_normalize_exactly() {
        // Zero, i16::MAX, i16::MIN, and one LSB.
        let bytes = [0x00, 0x00, 0xFF, 0x7F, 0x00, 0x80, 0x01, 0x00];
        let buf = decode_audio_data(&bytes, GENERATION_SAMPLE_RATE, 1).unwrap();
        assert_eq!(buf.len(), 4);
        let ch = buf.channel(0);
        assert_eq!(ch[0], 0.0);
        assert_relative_eq!(ch[1], 32767.0 / 32768.0, max_relative = 1e-7);
        assert_eq!(ch[2], -1.0);
        assert_relative_eq!(ch[3], 1.0 / 32768.0, max_relative = 1e-7);
    }

    #[test]
    fn trailing_odd_byte_is_truncated() {
        let bytes = [0x00, 0x00, 0x01, 0x00, 0xAB];
        let buf = decode_audio_data(&bytes, GENERATION_SAMPLE_RATE, 1).unwrap();
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn stereo_payload_deinterleaves() {
        // Frames: (L=100, R=-100), (L=200, R=-200)
        let mut bytes = Vec::new();
        for v in [100i16, -100, 200, -200] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let buf = decode_audio_data(&bytes, 48_000, 2).unwrap();
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.channels(), 2);
        assert_relative_eq!(buf.channel(0)[1], 200.0 / 32768.0, max_relative = 1e-7);
        assert_relative_eq!(buf.channel(1)[0], -100.0 / 32768.0, max_relative = 1e-7);
    }

    #[test]
    fn single_partial_frame_is_empty_audio() {
        // One byte cannot hold a sample.
        assert!(matches!(
            decode_audio_data(&[0x7F], GENERATION_SAMPLE_RATE, 1),
            Err(ColloquyError::EmptyAudio)
        ));
    }
}
