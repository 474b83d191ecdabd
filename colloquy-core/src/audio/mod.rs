//! In-memory audio representation and the decode/encode stages.
//!
//! The remote service returns raw signed 16-bit little-endian PCM at a fixed
//! rate and channel count. Neither is negotiated or auto-detected — they are
//! pipeline constants threaded through explicitly.

pub mod decode;
pub mod wav;

/// Sample rate of audio returned by the generation service (Hz).
pub const GENERATION_SAMPLE_RATE: u32 = 24_000;

/// Channel count of audio returned by the generation service.
pub const GENERATION_CHANNELS: u16 = 1;

/// A decoded block of PCM audio: one f32 sample vec per channel.
///
/// Allocated once per successful generation and never mutated afterwards.
/// Invariant: every channel vec holds exactly `len()` samples, each in
/// [-1.0, 1.0].
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    sample_rate: u32,
    /// De-interleaved samples, one inner vec per channel.
    samples: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Build a buffer from de-interleaved channel data.
    ///
    /// # Panics
    /// Panics if `samples` is empty or the channel vecs have unequal lengths.
    /// Both are construction bugs, not runtime conditions.
    pub fn new(sample_rate: u32, samples: Vec<Vec<f32>>) -> Self {
        assert!(!samples.is_empty(), "AudioBuffer requires at least one channel");
        let frames = samples[0].len();
        assert!(
            samples.iter().all(|ch| ch.len() == frames),
            "AudioBuffer channels must have equal length"
        );
        Self {
            sample_rate,
            samples,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.samples.len() as u16
    }

    /// Number of sample frames per channel.
    pub fn len(&self) -> usize {
        self.samples[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Samples for one channel.
    ///
    /// # Panics
    /// Panics if `channel >= channels()`.
    pub fn channel(&self, channel: usize) -> &[f32] {
        &self.samples[channel]
    }

    /// Returns the duration of this buffer in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }
}
