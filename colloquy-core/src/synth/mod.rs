//! Speech synthesis backends.
//!
//! The pipeline talks to synthesis through the [`SpeechSynthesizer`] trait:
//! hand in dialogue turns plus voice assignments, get back a base64-encoded
//! blob of raw PCM. [`GeminiSynthesizer`] is the production backend;
//! [`StubSynthesizer`] generates deterministic tones offline for tests and
//! dry runs.

pub mod gemini;
pub mod stub;

use async_trait::async_trait;

pub use gemini::GeminiSynthesizer;
pub use stub::StubSynthesizer;

use crate::error::Result;
use crate::transcript::DialogueTurn;
use crate::voice::VoiceAssignments;

/// A backend that turns dialogue into encoded audio samples.
///
/// Implementations return the payload exactly as produced by the service:
/// base64 text wrapping interleaved i16 LE PCM. Decoding is the caller's
/// job so backends stay trivially swappable.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        turns: &[DialogueTurn],
        voices: &VoiceAssignments,
    ) -> Result<String>;
}

/// Render dialogue turns into the single prompt the service reads aloud.
///
/// Speaker labels in the prompt must match the speaker names in the voice
/// configuration, otherwise the service cannot route voices.
pub fn build_prompt(turns: &[DialogueTurn]) -> String {
    let mut prompt =
        String::from("TTS the following conversation between User and Assistant:\n");
    for turn in turns {
        prompt.push_str(turn.speaker.label());
        prompt.push_str(": ");
        prompt.push_str(&turn.text);
        prompt.push('\n');
    }
    prompt
}
