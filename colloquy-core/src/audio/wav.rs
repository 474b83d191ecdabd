//! Container encoder: `AudioBuffer` → uncompressed WAV bytes.
//!
//! ## Layout
//!
//! A 44-byte RIFF/WAVE header followed by interleaved signed 16-bit
//! little-endian PCM. Every multi-byte field is little-endian regardless of
//! host byte order. Given the same buffer the output is byte-identical,
//! which the round-trip tests rely on.
//!
//! ## Sample conversion
//!
//! Each f32 sample is clamped to [-1.0, 1.0] and scaled asymmetrically:
//! negatives by 32768, non-negatives by 32767. The i16 range itself is
//! asymmetric, so a shared constant would either clip -1.0 or overflow +1.0.

use super::AudioBuffer;

/// MIME type declared for encoded output.
pub const WAV_MIME: &str = "audio/wav";

/// Header length in bytes: RIFF chunk descriptor + fmt + data chunk headers.
const HEADER_LEN: usize = 44;

/// PCM bit depth written by this encoder.
const BITS_PER_SAMPLE: u16 = 16;

fn sample_to_i16(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    if s < 0.0 {
        (s * 32_768.0).round() as i16
    } else {
        (s * 32_767.0).round() as i16
    }
}

/// Serialize an audio buffer into a complete WAV file blob.
///
/// Pure and deterministic; performs no I/O.
pub fn audio_buffer_to_wav(buffer: &AudioBuffer) -> Vec<u8> {
    let channels = buffer.channels() as u32;
    let sample_rate = buffer.sample_rate();
    let bytes_per_sample = u32::from(BITS_PER_SAMPLE) / 8;
    let data_size = buffer.len() as u32 * channels * bytes_per_sample;
    let byte_rate = sample_rate * channels * bytes_per_sample;
    let block_align = (channels * bytes_per_sample) as u16;

    let mut out = Vec::with_capacity(HEADER_LEN + data_size as usize);

    // RIFF chunk descriptor
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_size).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt sub-chunk (16-byte PCM variant)
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // AudioFormat = PCM
    out.extend_from_slice(&(channels as u16).to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data sub-chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    for frame in 0..buffer.len() {
        for ch in 0..buffer.channels() as usize {
            let quantized = sample_to_i16(buffer.channel(ch)[frame]);
            out.extend_from_slice(&quantized.to_le_bytes());
        }
    }

    out
}
